mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};

async fn seed_directory(app: &TestApp) {
    for (guild, id, name, display) in [
        ("g1", "100", "alice", "Alice"),
        ("g1", "101", "bob", "Bob"),
        ("g2", "200", "carol", "Carol"),
    ] {
        sqlx::query("INSERT INTO guild_members (guild_id, id, name, display_name) VALUES (?, ?, ?, ?)")
            .bind(guild)
            .bind(id)
            .bind(name)
            .bind(display)
            .execute(&app.pool)
            .await
            .unwrap();
    }
    sqlx::query("INSERT INTO guild_roles (guild_id, id, name) VALUES ('g1', '900', 'Chatter')")
        .execute(&app.pool)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_guild_directory_is_tenant_scoped() {
    let app = TestApp::new().await;
    seed_directory(&app).await;
    let admin = app.admin().await;
    let manager = app.manager(&admin, "m@example.com", &["g1"]).await;

    let members = parse_body(app.request("GET", "/api/guilds/members/g1", Some(&manager), None).await).await;
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 2);
    assert_eq!(members[0]["display_name"], "Alice");

    let roles = parse_body(app.request("GET", "/api/guilds/roles/g1", Some(&manager), None).await).await;
    assert_eq!(roles.as_array().unwrap().len(), 1);
    assert_eq!(roles[0]["name"], "Chatter");

    let res = app.request("GET", "/api/guilds/members/g2", Some(&manager), None).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.request("GET", "/api/guilds/members/g2", Some(&admin), None).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.request("GET", "/api/guilds/roles/g1", None, None).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}
