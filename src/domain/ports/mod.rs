use crate::domain::models::{
    user::{NewUser, Role, User},
    tenant_config::{TenantConfig, TenantConfigPatch},
    earning::{EarningPatch, EarningRecord},
    guild::{GuildMember, GuildRole},
};
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts the user as `admin` when the store holds no users yet, otherwise
    /// as `manager`. The decision and the insert are a single atomic step.
    async fn register(&self, user: &NewUser) -> Result<User, AppError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn list(&self) -> Result<Vec<User>, AppError>;
    async fn update_access(&self, id: &str, role: Role, managed_guild_ids: &[String]) -> Result<Option<User>, AppError>;
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait TenantConfigRepository: Send + Sync {
    async fn upsert(&self, guild_id: &str, patch: &TenantConfigPatch) -> Result<TenantConfig, AppError>;
    async fn update(&self, guild_id: &str, patch: &TenantConfigPatch) -> Result<Option<TenantConfig>, AppError>;
    async fn find(&self, guild_id: &str) -> Result<Option<TenantConfig>, AppError>;
    async fn list(&self) -> Result<Vec<TenantConfig>, AppError>;
    async fn list_guild_ids(&self) -> Result<Vec<String>, AppError>;
    async fn delete(&self, guild_id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait EarningRepository: Send + Sync {
    async fn create(&self, record: &EarningRecord) -> Result<EarningRecord, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<EarningRecord>, AppError>;
    async fn list_by_guild(&self, guild_id: &str) -> Result<Vec<EarningRecord>, AppError>;
    async fn list_all(&self) -> Result<Vec<EarningRecord>, AppError>;
    async fn update(&self, id: &str, patch: &EarningPatch) -> Result<Option<EarningRecord>, AppError>;
    async fn delete(&self, id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait GuildDirectoryRepository: Send + Sync {
    async fn list_members(&self, guild_id: &str) -> Result<Vec<GuildMember>, AppError>;
    async fn list_roles(&self, guild_id: &str) -> Result<Vec<GuildRole>, AppError>;
}
