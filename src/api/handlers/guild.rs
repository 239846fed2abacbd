use axum::{extract::{State, Path}, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::extractors::auth::AuthUser;
use std::sync::Arc;

pub async fn list_members(
    State(state): State<Arc<AppState>>,
    Path(guild_id): Path<String>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_tenant(&guild_id)?;
    let members = state.guild_repo.list_members(&guild_id).await?;
    Ok(Json(members))
}

pub async fn list_roles(
    State(state): State<Arc<AppState>>,
    Path(guild_id): Path<String>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_tenant(&guild_id)?;
    let roles = state.guild_repo.list_roles(&guild_id).await?;
    Ok(Json(roles))
}
