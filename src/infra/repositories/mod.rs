pub mod sqlite_user_repo;
pub mod sqlite_tenant_config_repo;
pub mod sqlite_earning_repo;
pub mod sqlite_guild_repo;

pub mod postgres_user_repo;
pub mod postgres_tenant_config_repo;
pub mod postgres_earning_repo;
pub mod postgres_guild_repo;
