use axum::{
    extract::{FromRequestParts, FromRef},
    http::{header, request::Parts},
};
use crate::state::AppState;
use crate::domain::models::user::User;
use crate::error::AppError;
use std::sync::Arc;
use tracing::{debug, Span};

/// The principal behind the request, if any. Rejects only on store failures;
/// a missing or unusable token leaves the request anonymous.
pub struct MaybeAuthUser(pub Option<User>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl<S> FromRequestParts<S> for MaybeAuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(MaybeAuthUser(None));
        };

        let app_state = <Arc<AppState> as FromRef<S>>::from_ref(state);

        match app_state.auth_service.authenticate(token).await {
            Ok(user) => {
                Span::current().record("user_id", user.id.as_str());
                Ok(MaybeAuthUser(Some(user)))
            }
            Err(AppError::Unauthorized) => {
                // Expired, tampered, or the account no longer exists.
                debug!("MaybeAuth: token rejected, treating request as anonymous");
                Ok(MaybeAuthUser(None))
            }
            Err(e) => Err(e),
        }
    }
}
