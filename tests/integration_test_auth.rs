mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};
use serde_json::json;
use tokio::task::JoinSet;

#[tokio::test]
async fn test_first_registration_is_admin_then_managers() {
    let app = TestApp::new().await;

    let first = app.register("first@example.com", "password1").await;
    let second = app.register("second@example.com", "password2").await;

    let me = parse_body(app.request("GET", "/api/auth/me", Some(&first), None).await).await;
    assert_eq!(me["role"], "admin");
    assert_eq!(me["email"], "first@example.com");
    assert!(me.get("password_hash").is_none());

    let me = parse_body(app.request("GET", "/api/auth/me", Some(&second), None).await).await;
    assert_eq!(me["role"], "manager");
    assert_eq!(me["managed_guild_ids"], json!([]));
}

#[tokio::test]
async fn test_restart_does_not_mint_second_admin() {
    let app = TestApp::new().await;
    app.register("first@example.com", "password1").await;

    let restarted = app.reopen().await;
    let token = restarted.register("second@example.com", "password2").await;

    let me = parse_body(restarted.request("GET", "/api/auth/me", Some(&token), None).await).await;
    assert_eq!(me["role"], "manager");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_registrations_yield_exactly_one_admin() {
    let app = TestApp::new().await;

    let mut set = JoinSet::new();
    for i in 0..8 {
        let router = app.router.clone();
        set.spawn(async move {
            use tower::ServiceExt;
            let request = axum::http::Request::builder()
                .method("POST")
                .uri("/api/auth/register")
                .header("Content-Type", "application/json")
                .body(axum::body::Body::from(
                    json!({ "email": format!("user{}@example.com", i), "password": "password" }).to_string(),
                ))
                .unwrap();
            router.oneshot(request).await.unwrap().status()
        });
    }

    while let Some(status) = set.join_next().await {
        assert_eq!(status.unwrap(), StatusCode::OK);
    }

    let admins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role = 'admin'")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(admins, 1);
    assert_eq!(total, 8);
}

#[tokio::test]
async fn test_duplicate_email_conflicts() {
    let app = TestApp::new().await;
    app.register("dup@example.com", "password1").await;

    let res = app.request(
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "DUP@example.com", "password": "password2" })),
    ).await;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    assert_eq!(parse_body(res).await["msg"], "User already exists");
}

#[tokio::test]
async fn test_register_validates_input() {
    let app = TestApp::new().await;

    let res = app.request(
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "not-an-email", "password": "123" })),
    ).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["msg"], "Validation Error");
    assert!(body["errors"].get("email").is_some());
    assert!(body["errors"].get("password").is_some());

    let res = app.request("POST", "/api/auth/register", None, Some(json!({ "email": "a@example.com" }))).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_does_not_reveal_which_part_failed() {
    let app = TestApp::new().await;
    app.register("user@example.com", "correct-horse").await;

    let wrong_password = app.request(
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "user@example.com", "password": "wrong-horse" })),
    ).await;
    let unknown_email = app.request(
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "nobody@example.com", "password": "correct-horse" })),
    ).await;

    assert_eq!(wrong_password.status(), unknown_email.status());
    let a = parse_body(wrong_password).await;
    let b = parse_body(unknown_email).await;
    assert_eq!(a, b);
    assert_eq!(a["msg"], "Invalid Credentials");

    let ok = app.request(
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "user@example.com", "password": "correct-horse" })),
    ).await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert!(parse_body(ok).await["token"].as_str().is_some());
}

#[tokio::test]
async fn test_bad_tokens_are_unauthenticated() {
    let app = TestApp::new().await;
    let token = app.register("user@example.com", "password").await;

    let res = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(parse_body(res).await["msg"], "Not authorized");

    let res = app.request("GET", "/api/auth/me", Some("garbage.token.value"), None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let mut tampered = token.clone();
    tampered.push('x');
    let res = app.request("GET", "/api/auth/me", Some(&tampered), None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_of_deleted_user_is_rejected() {
    let app = TestApp::new().await;
    let admin = app.admin().await;
    let manager = app.register("gone@example.com", "password").await;
    let manager_id = app.user_id(&manager).await;

    let res = app.request("DELETE", &format!("/api/users/{}", manager_id), Some(&admin), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("GET", "/api/auth/me", Some(&manager), None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::new().await;
    let res = app.request("GET", "/health", None, None).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(parse_body(res).await["status"], "ok");
}
