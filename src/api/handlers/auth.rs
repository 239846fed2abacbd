use axum::{extract::State, response::IntoResponse, Json};
use crate::state::AppState;
use crate::error::AppError;
use crate::api::dtos::{
    requests::{LoginRequest, RegisterRequest},
    responses::TokenResponse,
};
use crate::api::extractors::{auth::AuthUser, json::AppJson};
use std::sync::Arc;
use validator::Validate;

pub async fn register(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (_, token) = state.auth_service.register(&payload.email, &payload.password).await?;

    Ok(Json(TokenResponse { token }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let (_, token) = state.auth_service.login(&payload.email, &payload.password).await?;

    Ok(Json(TokenResponse { token }))
}

pub async fn me(AuthUser(user): AuthUser) -> Result<impl IntoResponse, AppError> {
    Ok(Json(user))
}
