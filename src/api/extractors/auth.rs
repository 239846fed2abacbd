use axum::{
    extract::{FromRequestParts, FromRef},
    http::request::Parts,
};
use crate::state::AppState;
use crate::domain::models::user::User;
use crate::domain::services::access::{
    authorize_admin, authorize_record_access, authorize_tenant_access, GuildScoped, EARNING_NOT_FOUND,
};
use crate::error::AppError;
use std::sync::Arc;
use tracing::Span;
use super::maybe_auth::MaybeAuthUser;

/// Rejects anonymous requests with 401 before any body is read.
pub struct AuthUser(pub User);

impl AuthUser {
    pub fn require_tenant(&self, guild_id: &str) -> Result<(), AppError> {
        Span::current().record("tenant_id", guild_id);
        authorize_tenant_access(Some(&self.0), guild_id).into_result()
    }

    /// Gate on the guild that owns `record`; a missing record is a 404.
    pub fn require_record<R: GuildScoped>(&self, record: Option<R>) -> Result<R, AppError> {
        if let Some(r) = &record {
            Span::current().record("tenant_id", r.guild_id());
        }
        authorize_record_access(Some(&self.0), record.as_ref()).into_result()?;
        record.ok_or_else(|| AppError::NotFound(EARNING_NOT_FOUND.to_string()))
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        authorize_admin(Some(&self.0)).into_result()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<AppState>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let MaybeAuthUser(user) = MaybeAuthUser::from_request_parts(parts, state).await?;
        user.map(AuthUser).ok_or(AppError::Unauthorized)
    }
}
