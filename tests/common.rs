use shift_calculator_backend::{
    api::router::create_router,
    config::Config,
    infra::factory::sqlite_state,
    state::AppState,
};
use sqlx::{sqlite::{SqliteConnectOptions, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;
use serde_json::{json, Value};

pub const TEST_JWT_SECRET: &str = "test-secret-do-not-use";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    owns_db: bool,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        Self::open(db_filename, true).await
    }

    /// A second app instance over the same database file, as after a restart.
    pub async fn reopen(&self) -> Self {
        Self::open(self.db_filename.clone(), false).await
    }

    async fn open(db_filename: String, owns_db: bool) -> Self {
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            jwt_secret: TEST_JWT_SECRET.to_string(),
            frontend_origins: vec!["http://localhost:3000".to_string()],
        };

        let state = Arc::new(sqlite_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            owns_db,
        }
    }

    pub async fn request(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(v.to_string())
            }
            None => Body::empty(),
        };
        self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
    }

    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self.request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({ "email": email, "password": password })),
        ).await;

        if response.status() != StatusCode::OK {
            let status = response.status();
            let body = parse_body(response).await;
            panic!("Register failed in test helper: status {}, body: {:?}", status, body);
        }
        parse_body(response).await["token"].as_str().expect("No token in body").to_string()
    }

    pub async fn user_id(&self, token: &str) -> String {
        let response = self.request("GET", "/api/auth/me", Some(token), None).await;
        assert_eq!(response.status(), StatusCode::OK);
        parse_body(response).await["id"].as_str().unwrap().to_string()
    }

    /// Registers the first (admin) account and returns its token.
    pub async fn admin(&self) -> String {
        self.register("admin@example.com", "admin-password").await
    }

    /// Registers a manager and grants it `guilds` through the admin endpoint.
    pub async fn manager(&self, admin_token: &str, email: &str, guilds: &[&str]) -> String {
        let token = self.register(email, "manager-password").await;
        let id = self.user_id(&token).await;

        let response = self.request(
            "PUT",
            &format!("/api/users/{}", id),
            Some(admin_token),
            Some(json!({ "managed_guild_ids": guilds })),
        ).await;
        assert_eq!(response.status(), StatusCode::OK);
        token
    }

    pub async fn create_config(&self, token: &str, guild_id: &str, body: Value) -> Response {
        let mut body = body;
        body["guild_id"] = json!(guild_id);
        self.request("POST", "/api/config", Some(token), Some(body)).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if self.owns_db {
            let _ = std::fs::remove_file(&self.db_filename);
        }
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: Response) -> Value {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        panic!("Response body is empty. Status: {}", status);
    }
    match serde_json::from_slice(&bytes) {
        Ok(v) => v,
        Err(e) => panic!("Failed to parse JSON: {:?}. Status: {}. Body: {:?}", e, status, String::from_utf8_lossy(&bytes))
    }
}

#[allow(dead_code)]
pub fn earning_payload(id: &str) -> Value {
    json!({
        "id": id,
        "date": "2025-03-01",
        "total_cut": 120.5,
        "gross_revenue": 900.0,
        "period": "March A",
        "shift": "Night",
        "role": "Chatter",
        "models": ["Alice", "Bea"],
        "hours_worked": 8.0,
        "user_mention": "<@1234>"
    })
}
