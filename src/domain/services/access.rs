//! Guild-scoped access control.
//!
//! Every decision is a pure function of the principal and the target. The
//! principal is optional so a missing session is a denial, never a panic.

use crate::domain::models::{
    earning::EarningRecord,
    user::{Role, User, UserUpdate},
};
use crate::error::AppError;

pub const NOT_AUTHORIZED_FOR_GUILD: &str = "Not authorized to manage this guild";
pub const ADMIN_REQUIRED: &str = "Not authorized, admin role required";
pub const EARNING_NOT_FOUND: &str = "Earning not found";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    Allow,
    Forbidden(&'static str),
    Unauthenticated,
    NotFound(&'static str),
}

impl AccessDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, AccessDecision::Allow)
    }

    pub fn into_result(self) -> Result<(), AppError> {
        match self {
            AccessDecision::Allow => Ok(()),
            AccessDecision::Forbidden(reason) => Err(AppError::Forbidden(reason.to_string())),
            AccessDecision::Unauthenticated => Err(AppError::Unauthorized),
            AccessDecision::NotFound(reason) => Err(AppError::NotFound(reason.to_string())),
        }
    }
}

pub trait GuildScoped {
    fn guild_id(&self) -> &str;
}

impl GuildScoped for EarningRecord {
    fn guild_id(&self) -> &str {
        &self.guild_id
    }
}

pub fn authorize_tenant_access(principal: Option<&User>, guild_id: &str) -> AccessDecision {
    let Some(user) = principal else {
        return AccessDecision::Unauthenticated;
    };

    match user.role {
        Role::Admin => AccessDecision::Allow,
        Role::Manager if user.managed_guild_ids.iter().any(|g| g == guild_id) => AccessDecision::Allow,
        Role::Manager => AccessDecision::Forbidden(NOT_AUTHORIZED_FOR_GUILD),
    }
}

/// Record-scoped variant. Existence is checked before the guild rule, and a
/// denial carries nothing about the record itself.
pub fn authorize_record_access<R: GuildScoped>(principal: Option<&User>, record: Option<&R>) -> AccessDecision {
    if principal.is_none() {
        return AccessDecision::Unauthenticated;
    }
    match record {
        None => AccessDecision::NotFound(EARNING_NOT_FOUND),
        Some(r) => authorize_tenant_access(principal, r.guild_id()),
    }
}

pub fn authorize_admin(principal: Option<&User>) -> AccessDecision {
    match principal {
        None => AccessDecision::Unauthenticated,
        Some(user) if user.role == Role::Admin => AccessDecision::Allow,
        Some(_) => AccessDecision::Forbidden(ADMIN_REQUIRED),
    }
}

pub fn check_user_update(actor: &User, target: &User, update: &UserUpdate) -> Result<(), AppError> {
    if actor.id == target.id {
        if let Some(role) = update.role {
            if role != actor.role {
                return Err(AppError::Validation("Admin cannot change their own role.".into()));
            }
        }
    }

    let resulting_role = update.role.unwrap_or(target.role);
    if resulting_role == Role::Admin {
        if let Some(ids) = &update.managed_guild_ids {
            if !ids.is_empty() {
                return Err(AppError::Validation("Cannot assign managed guilds to an admin.".into()));
            }
        }
    }

    Ok(())
}

pub fn check_user_delete(actor: &User, target_id: &str) -> Result<(), AppError> {
    if actor.id == target_id {
        return Err(AppError::Validation("Admin cannot delete themselves.".into()));
    }
    Ok(())
}
