use std::sync::Arc;
use crate::domain::ports::{
    EarningRepository, GuildDirectoryRepository, TenantConfigRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub tenant_config_repo: Arc<dyn TenantConfigRepository>,
    pub earning_repo: Arc<dyn EarningRepository>,
    pub guild_repo: Arc<dyn GuildDirectoryRepository>,
    pub auth_service: Arc<AuthService>,
}
