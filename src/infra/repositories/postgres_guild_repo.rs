use crate::domain::{
    models::guild::{GuildMember, GuildRole},
    ports::GuildDirectoryRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresGuildRepo {
    pool: PgPool,
}

impl PostgresGuildRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GuildDirectoryRepository for PostgresGuildRepo {
    async fn list_members(&self, guild_id: &str) -> Result<Vec<GuildMember>, AppError> {
        sqlx::query_as::<_, GuildMember>(
            "SELECT guild_id, id, name, display_name FROM guild_members WHERE guild_id = $1 ORDER BY display_name ASC, id ASC",
        )
            .bind(guild_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_roles(&self, guild_id: &str) -> Result<Vec<GuildRole>, AppError> {
        sqlx::query_as::<_, GuildRole>("SELECT guild_id, id, name FROM guild_roles WHERE guild_id = $1 ORDER BY name ASC, id ASC")
            .bind(guild_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
