use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::responses::MessageResponse;
use crate::api::extractors::{auth::AuthUser, json::AppJson};
use crate::domain::models::user::UserUpdate;
use crate::domain::services::access::{check_user_delete, check_user_update};
use std::sync::Arc;
use tracing::{info, warn};

const USER_NOT_FOUND: &str = "User not found";

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;
    let users = state.user_repo.list().await?;
    Ok(Json(users))
}

pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;
    let user = state.user_repo.find_by_id(&user_id).await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))?;
    Ok(Json(user))
}

pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    auth: AuthUser,
    AppJson(update): AppJson<UserUpdate>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;

    let target = state.user_repo.find_by_id(&user_id).await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))?;

    if let Err(e) = check_user_update(&auth.0, &target, &update) {
        warn!(admin_id = %auth.0.id, target_id = %target.id, "Rejected user update: {}", e);
        return Err(e);
    }

    let (role, managed) = target.resolve_update(&update);
    let updated = state.user_repo.update_access(&target.id, role, &managed).await?
        .ok_or_else(|| AppError::NotFound(USER_NOT_FOUND.into()))?;

    info!(admin_id = %auth.0.id, target_id = %updated.id, role = %updated.role, "User access updated");
    Ok(Json(updated))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;
    check_user_delete(&auth.0, &user_id)?;

    if !state.user_repo.delete(&user_id).await? {
        return Err(AppError::NotFound(USER_NOT_FOUND.into()));
    }

    info!(admin_id = %auth.0.id, target_id = %user_id, "User deleted");
    Ok(Json(MessageResponse::new("User deleted")))
}

pub async fn available_guilds(
    State(state): State<Arc<AppState>>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_admin()?;
    let guild_ids = state.tenant_config_repo.list_guild_ids().await?;
    Ok(Json(guild_ids))
}
