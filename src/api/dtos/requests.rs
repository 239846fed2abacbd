use crate::domain::models::tenant_config::TenantConfigPatch;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Please include a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Please enter a password with 6 or more characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Please include a valid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct SetConfigRequest {
    pub guild_id: String,
    #[serde(flatten)]
    pub patch: TenantConfigPatch,
}

#[derive(Debug, Deserialize)]
pub struct FieldUpdateRequest {
    // `None` only when the key is absent; an explicit null is `Some(Value::Null)`.
    #[serde(default, deserialize_with = "present")]
    pub value: Option<Value>,
}

fn present<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(deserializer).map(Some)
}
