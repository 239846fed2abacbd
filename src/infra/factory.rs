use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::StartupError;
use crate::state::AppState;
use crate::domain::ports::UserRepository;
use crate::domain::services::auth_service::AuthService;
use crate::infra::repositories::{
    postgres_user_repo::PostgresUserRepo, postgres_tenant_config_repo::PostgresTenantConfigRepo,
    postgres_earning_repo::PostgresEarningRepo, postgres_guild_repo::PostgresGuildRepo,
    sqlite_user_repo::SqliteUserRepo, sqlite_tenant_config_repo::SqliteTenantConfigRepo,
    sqlite_earning_repo::SqliteEarningRepo, sqlite_guild_repo::SqliteGuildRepo,
};

pub async fn bootstrap_state(config: &Config) -> Result<AppState, StartupError> {
    let database_url = &config.database_url;

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse()?;
        opts = opts.log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await?;

        sqlx::migrate!("./migrations/postgres").run(&pool).await?;
        info!("Postgres migrations applied");
        Ok(postgres_state(config, pool))
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await?;

        sqlx::migrate!("./migrations/sqlite").run(&pool).await?;
        info!("SQLite migrations applied");
        Ok(sqlite_state(config, pool))
    }
}

pub fn postgres_state(config: &Config, pool: PgPool) -> AppState {
    let user_repo: Arc<dyn UserRepository> = Arc::new(PostgresUserRepo::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(user_repo.clone(), &config.jwt_secret));

    AppState {
        config: config.clone(),
        user_repo,
        tenant_config_repo: Arc::new(PostgresTenantConfigRepo::new(pool.clone())),
        earning_repo: Arc::new(PostgresEarningRepo::new(pool.clone())),
        guild_repo: Arc::new(PostgresGuildRepo::new(pool)),
        auth_service,
    }
}

pub fn sqlite_state(config: &Config, pool: SqlitePool) -> AppState {
    let user_repo: Arc<dyn UserRepository> = Arc::new(SqliteUserRepo::new(pool.clone()));
    let auth_service = Arc::new(AuthService::new(user_repo.clone(), &config.jwt_secret));

    AppState {
        config: config.clone(),
        user_repo,
        tenant_config_repo: Arc::new(SqliteTenantConfigRepo::new(pool.clone())),
        earning_repo: Arc::new(SqliteEarningRepo::new(pool.clone())),
        guild_repo: Arc::new(SqliteGuildRepo::new(pool)),
        auth_service,
    }
}
