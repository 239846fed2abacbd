use axum::{extract::{State, Path}, response::IntoResponse, Json, http::StatusCode};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::responses::MessageResponse;
use crate::api::extractors::{auth::AuthUser, json::AppJson};
use crate::domain::models::earning::{EarningPatch, EarningRecord, NewEarning};
use std::sync::Arc;
use tracing::info;
use validator::Validate;

pub async fn list_all_earnings(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let earnings = state.earning_repo.list_all().await?;
    let visible: Vec<_> = if user.is_admin() {
        earnings
    } else {
        earnings.into_iter().filter(|e| user.manages(&e.guild_id)).collect()
    };
    Ok(Json(visible))
}

pub async fn list_guild_earnings(
    State(state): State<Arc<AppState>>,
    Path(guild_id): Path<String>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    auth.require_tenant(&guild_id)?;
    let earnings = state.earning_repo.list_by_guild(&guild_id).await?;
    Ok(Json(earnings))
}

pub async fn create_earning(
    State(state): State<Arc<AppState>>,
    Path(guild_id): Path<String>,
    auth: AuthUser,
    AppJson(payload): AppJson<NewEarning>,
) -> Result<impl IntoResponse, AppError> {
    auth.require_tenant(&guild_id)?;
    payload.validate()?;

    // Ids are unique across guilds. A concurrent insert that slips past this
    // check still fails on the primary key and surfaces as 409.
    if state.earning_repo.find_by_id(&payload.id).await?.is_some() {
        return Err(AppError::Conflict("Earning with this id already exists".into()));
    }

    let record = EarningRecord::new(guild_id, payload);
    let created = state.earning_repo.create(&record).await?;

    info!(guild_id = %created.guild_id, earning_id = %created.id, "Earning created");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_earning(
    State(state): State<Arc<AppState>>,
    Path(earning_id): Path<String>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let record = state.earning_repo.find_by_id(&earning_id).await?;
    let record = auth.require_record(record)?;
    Ok(Json(record))
}

pub async fn update_earning(
    State(state): State<Arc<AppState>>,
    Path(earning_id): Path<String>,
    auth: AuthUser,
    AppJson(patch): AppJson<EarningPatch>,
) -> Result<impl IntoResponse, AppError> {
    let record = state.earning_repo.find_by_id(&earning_id).await?;
    let record = auth.require_record(record)?;
    patch.validate()?;

    let updated = state.earning_repo.update(&record.id, &patch).await?
        .ok_or_else(|| AppError::NotFound("Earning not found".into()))?;

    info!(guild_id = %updated.guild_id, earning_id = %updated.id, "Earning updated");
    Ok(Json(updated))
}

pub async fn delete_earning(
    State(state): State<Arc<AppState>>,
    Path(earning_id): Path<String>,
    auth: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let record = state.earning_repo.find_by_id(&earning_id).await?;
    let record = auth.require_record(record)?;

    if !state.earning_repo.delete(&record.id).await? {
        return Err(AppError::NotFound("Earning not found".into()));
    }

    info!(guild_id = %record.guild_id, earning_id = %record.id, "Earning removed");
    Ok(Json(MessageResponse::new("Earning removed")))
}
