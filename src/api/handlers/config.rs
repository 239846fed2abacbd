use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::{
    requests::{FieldUpdateRequest, SetConfigRequest},
    responses::MessageResponse,
};
use crate::api::extractors::{auth::AuthUser, json::AppJson};
use crate::domain::models::tenant_config::{ConfigField, TenantConfigPatch};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::info;

const CONFIG_NOT_FOUND: &str = "Guild configuration not found";

pub async fn list_configs(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let configs = state.tenant_config_repo.list().await?;
    let visible: Vec<_> = if user.is_admin() {
        configs
    } else {
        configs.into_iter().filter(|c| user.manages(&c.guild_id)).collect()
    };
    Ok(Json(visible))
}

pub async fn create_or_update_config(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
    AppJson(payload): AppJson<SetConfigRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.guild_id.trim().is_empty() {
        return Err(AppError::Validation("guild_id is required".into()));
    }
    auth.require_tenant(&payload.guild_id)?;
    payload.patch.validate()?;

    let config = state.tenant_config_repo.upsert(&payload.guild_id, &payload.patch).await?;
    info!(guild_id = %config.guild_id, "Guild configuration saved");
    Ok(Json(config))
}

pub async fn set_config(
    State(state): State<Arc<AppState>>,
    Path(guild_id): Path<String>,
    auth: AuthUser,
    AppJson(patch): AppJson<TenantConfigPatch>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_tenant(&guild_id)?;
    patch.validate()?;

    let config = state.tenant_config_repo.upsert(&guild_id, &patch).await?;
    info!(guild_id = %config.guild_id, "Guild configuration saved");
    Ok(Json(config))
}

pub async fn get_config(
    State(state): State<Arc<AppState>>,
    Path(guild_id): Path<String>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_tenant(&guild_id)?;

    let config = state.tenant_config_repo.find(&guild_id).await?
        .ok_or_else(|| AppError::NotFound(CONFIG_NOT_FOUND.into()))?;
    Ok(Json(config))
}

pub async fn delete_config(
    State(state): State<Arc<AppState>>,
    Path(guild_id): Path<String>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    if !state.tenant_config_repo.delete(&guild_id).await? {
        return Err(AppError::NotFound(CONFIG_NOT_FOUND.into()));
    }

    info!(guild_id = %guild_id, admin_id = %auth.0.id, "Guild configuration removed");
    Ok(Json(MessageResponse::new("Guild configuration removed")))
}

pub async fn get_config_field(
    State(state): State<Arc<AppState>>,
    Path((guild_id, field)): Path<(String, String)>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_tenant(&guild_id)?;
    let field: ConfigField = field.parse()?;

    let config = state.tenant_config_repo.find(&guild_id).await?
        .ok_or_else(|| AppError::NotFound(CONFIG_NOT_FOUND.into()))?;

    let mut body = Map::new();
    body.insert(field.to_string(), field.value_of(&config)?);
    Ok(Json(Value::Object(body)))
}

pub async fn update_config_field(
    State(state): State<Arc<AppState>>,
    Path((guild_id, field)): Path<(String, String)>,
    auth: AuthUser,
    AppJson(payload): AppJson<FieldUpdateRequest>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_tenant(&guild_id)?;

    let value = payload.value
        .ok_or_else(|| AppError::Validation("Request body must contain a 'value' field.".into()))?;
    let field: ConfigField = field.parse()?;

    let patch = field.patch_with(value)?;
    patch.validate()?;

    let config = state.tenant_config_repo.update(&guild_id, &patch).await?
        .ok_or_else(|| AppError::NotFound(CONFIG_NOT_FOUND.into()))?;

    info!(guild_id = %guild_id, field = %field, "Guild configuration field updated");
    Ok(Json(config))
}
