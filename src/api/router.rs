use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{auth, config, earning, guild, health, user};
use tower_http::{
    cors::CorsLayer,
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info, warn};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    let cors = build_cors_layer(&state.config.frontend_origins);

    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))

        // Guild config
        .route("/api/config", get(config::list_configs).post(config::create_or_update_config))
        .route("/api/config/{guild_id}", get(config::get_config).put(config::set_config).delete(config::delete_config))
        .route("/api/config/{guild_id}/{field}", get(config::get_config_field).put(config::update_config_field))

        // Earnings
        .route("/api/earnings", get(earning::list_all_earnings))
        .route("/api/earnings/{guild_id}", get(earning::list_guild_earnings).post(earning::create_earning))
        .route("/api/earnings/entry/{earning_id}", get(earning::get_earning).put(earning::update_earning).delete(earning::delete_earning))

        // User administration
        .route("/api/users", get(user::list_users))
        .route("/api/users/managed-guilds/available", get(user::available_guilds))
        .route("/api/users/{user_id}", get(user::get_user).put(user::update_user).delete(user::delete_user))

        // Guild directory
        .route("/api/guilds/members/{guild_id}", get(guild::list_members))
        .route("/api/guilds/roles/{guild_id}", get(guild::list_roles))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        tenant_id = tracing::field::Empty,
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .layer(cors)
        .with_state(state)
}

// tower-http panics when credentials are combined with a wildcard origin.
fn allowed_origins(origins: &[String]) -> Vec<HeaderValue> {
    origins
        .iter()
        .map(|o| o.trim())
        .filter_map(|o| {
            if o == "*" {
                warn!("Ignoring wildcard CORS origin; list each frontend origin explicitly");
                return None;
            }
            match o.parse() {
                Ok(v) => Some(v),
                Err(_) => {
                    warn!("Ignoring invalid CORS origin: {}", o);
                    None
                }
            }
        })
        .collect()
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origins(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true)
}
