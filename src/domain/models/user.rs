use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Manager,
}

#[derive(Debug, Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(String);

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manager => "manager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "manager" => Ok(Role::Manager),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    #[sqlx(json)]
    pub managed_guild_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins implicitly manage every guild, so the stored set is ignored for them.
    pub fn manages(&self, guild_id: &str) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Manager => self.managed_guild_ids.iter().any(|g| g == guild_id),
        }
    }

    /// Role and managed set after applying `update`. Promotion to admin clears the set.
    pub fn resolve_update(&self, update: &UserUpdate) -> (Role, Vec<String>) {
        let role = update.role.unwrap_or(self.role);
        let managed = match role {
            Role::Admin => Vec::new(),
            Role::Manager => match &update.managed_guild_ids {
                Some(ids) => dedup_guild_ids(ids),
                None => self.managed_guild_ids.clone(),
            },
        };
        (role, managed)
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    pub role: Option<Role>,
    pub managed_guild_ids: Option<Vec<String>>,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn dedup_guild_ids(ids: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(id.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role, managed: &[&str]) -> User {
        User {
            id: "u1".into(),
            email: "u1@example.com".into(),
            password_hash: "hash".into(),
            role,
            managed_guild_ids: managed.iter().map(|s| s.to_string()).collect(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("manager".parse::<Role>().unwrap(), Role::Manager);
        assert!("user".parse::<Role>().is_err());
        assert!("Admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_password_hash_is_never_serialized() {
        let json = serde_json::to_value(user(Role::Manager, &["g1"])).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "manager");
        assert_eq!(json["managed_guild_ids"], serde_json::json!(["g1"]));
    }

    #[test]
    fn test_resolve_update_promotion_clears_managed_set() {
        let manager = user(Role::Manager, &["g1", "g2"]);
        let (role, managed) = manager.resolve_update(&UserUpdate { role: Some(Role::Admin), managed_guild_ids: None });
        assert_eq!(role, Role::Admin);
        assert!(managed.is_empty());
    }

    #[test]
    fn test_resolve_update_dedups_and_keeps_order() {
        let manager = user(Role::Manager, &[]);
        let update = UserUpdate {
            role: None,
            managed_guild_ids: Some(vec!["g2".into(), "g1".into(), "g2".into()]),
        };
        let (role, managed) = manager.resolve_update(&update);
        assert_eq!(role, Role::Manager);
        assert_eq!(managed, vec!["g2".to_string(), "g1".to_string()]);
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  Boss@Example.COM "), "boss@example.com");
    }
}
