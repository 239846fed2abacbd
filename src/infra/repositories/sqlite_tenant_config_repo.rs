use crate::domain::{
    models::tenant_config::{TenantConfig, TenantConfigPatch},
    ports::TenantConfigRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{types::Json, SqlitePool};

pub struct SqliteTenantConfigRepo {
    pool: SqlitePool,
}

impl SqliteTenantConfigRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const CONFIG_COLUMNS: &str = "guild_id, models, shifts, periods, bonus_rules, display_settings, commission_settings, roles";

#[async_trait]
impl TenantConfigRepository for SqliteTenantConfigRepo {
    async fn upsert(&self, guild_id: &str, patch: &TenantConfigPatch) -> Result<TenantConfig, AppError> {
        sqlx::query_as::<_, TenantConfig>(
            &format!(r#"INSERT INTO tenant_configs ({CONFIG_COLUMNS})
               VALUES (?1, COALESCE(?2, '[]'), COALESCE(?3, '[]'), COALESCE(?4, '[]'), COALESCE(?5, '[]'),
                       COALESCE(?6, '{{}}'), COALESCE(?7, '{{}}'), COALESCE(?8, '{{}}'))
               ON CONFLICT(guild_id) DO UPDATE SET
               models = COALESCE(?2, tenant_configs.models),
               shifts = COALESCE(?3, tenant_configs.shifts),
               periods = COALESCE(?4, tenant_configs.periods),
               bonus_rules = COALESCE(?5, tenant_configs.bonus_rules),
               display_settings = COALESCE(?6, tenant_configs.display_settings),
               commission_settings = COALESCE(?7, tenant_configs.commission_settings),
               roles = COALESCE(?8, tenant_configs.roles)
               RETURNING {CONFIG_COLUMNS}"#),
        )
            .bind(guild_id)
            .bind(patch.models.as_ref().map(Json))
            .bind(patch.shifts.as_ref().map(Json))
            .bind(patch.periods.as_ref().map(Json))
            .bind(patch.bonus_rules.as_ref().map(Json))
            .bind(patch.display_settings.as_ref().map(Json))
            .bind(patch.commission_settings.as_ref().map(Json))
            .bind(patch.roles.as_ref().map(Json))
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, guild_id: &str, patch: &TenantConfigPatch) -> Result<Option<TenantConfig>, AppError> {
        sqlx::query_as::<_, TenantConfig>(
            &format!(r#"UPDATE tenant_configs SET
               models = COALESCE(?2, models),
               shifts = COALESCE(?3, shifts),
               periods = COALESCE(?4, periods),
               bonus_rules = COALESCE(?5, bonus_rules),
               display_settings = COALESCE(?6, display_settings),
               commission_settings = COALESCE(?7, commission_settings),
               roles = COALESCE(?8, roles)
               WHERE guild_id = ?1
               RETURNING {CONFIG_COLUMNS}"#),
        )
            .bind(guild_id)
            .bind(patch.models.as_ref().map(Json))
            .bind(patch.shifts.as_ref().map(Json))
            .bind(patch.periods.as_ref().map(Json))
            .bind(patch.bonus_rules.as_ref().map(Json))
            .bind(patch.display_settings.as_ref().map(Json))
            .bind(patch.commission_settings.as_ref().map(Json))
            .bind(patch.roles.as_ref().map(Json))
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find(&self, guild_id: &str) -> Result<Option<TenantConfig>, AppError> {
        sqlx::query_as::<_, TenantConfig>(&format!("SELECT {CONFIG_COLUMNS} FROM tenant_configs WHERE guild_id = ?"))
            .bind(guild_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<TenantConfig>, AppError> {
        sqlx::query_as::<_, TenantConfig>(&format!("SELECT {CONFIG_COLUMNS} FROM tenant_configs ORDER BY guild_id ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_guild_ids(&self) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>("SELECT guild_id FROM tenant_configs ORDER BY guild_id ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, guild_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tenant_configs WHERE guild_id = ?")
            .bind(guild_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
