use serde::Serialize;

pub use crate::domain::models::auth::TokenResponse;

#[derive(Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
