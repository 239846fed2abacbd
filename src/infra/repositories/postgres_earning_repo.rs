use crate::domain::{
    models::earning::{EarningPatch, EarningRecord},
    ports::EarningRepository,
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, PgPool};
use tracing::error;

pub struct PostgresEarningRepo {
    pool: PgPool,
}

impl PostgresEarningRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const EARNING_COLUMNS: &str = "id, guild_id, date, total_cut, gross_revenue, period, shift, role, models, hours_worked, user_mention, created_at, updated_at";

#[async_trait]
impl EarningRepository for PostgresEarningRepo {
    async fn create(&self, record: &EarningRecord) -> Result<EarningRecord, AppError> {
        sqlx::query_as::<_, EarningRecord>(&format!(
            "INSERT INTO earnings ({EARNING_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) RETURNING {EARNING_COLUMNS}"
        ))
            .bind(&record.id)
            .bind(&record.guild_id)
            .bind(&record.date)
            .bind(record.total_cut)
            .bind(record.gross_revenue)
            .bind(&record.period)
            .bind(&record.shift)
            .bind(&record.role)
            .bind(Json(&record.models))
            .bind(record.hours_worked)
            .bind(&record.user_mention)
            .bind(record.created_at)
            .bind(record.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres Earning Insert Failed: {:?}", e);
                AppError::Database(e)
            })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<EarningRecord>, AppError> {
        sqlx::query_as::<_, EarningRecord>(&format!("SELECT {EARNING_COLUMNS} FROM earnings WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_guild(&self, guild_id: &str) -> Result<Vec<EarningRecord>, AppError> {
        sqlx::query_as::<_, EarningRecord>(&format!(
            "SELECT {EARNING_COLUMNS} FROM earnings WHERE guild_id = $1 ORDER BY created_at ASC, id ASC"
        ))
            .bind(guild_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<EarningRecord>, AppError> {
        sqlx::query_as::<_, EarningRecord>(&format!(
            "SELECT {EARNING_COLUMNS} FROM earnings ORDER BY guild_id ASC, created_at ASC, id ASC"
        ))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update(&self, id: &str, patch: &EarningPatch) -> Result<Option<EarningRecord>, AppError> {
        sqlx::query_as::<_, EarningRecord>(&format!(
            r#"UPDATE earnings SET
               date = COALESCE($2, date),
               total_cut = COALESCE($3, total_cut),
               gross_revenue = COALESCE($4, gross_revenue),
               period = COALESCE($5, period),
               shift = COALESCE($6, shift),
               role = COALESCE($7, role),
               models = COALESCE($8, models),
               hours_worked = COALESCE($9, hours_worked),
               user_mention = COALESCE($10, user_mention),
               updated_at = $11
               WHERE id = $1
               RETURNING {EARNING_COLUMNS}"#
        ))
            .bind(id)
            .bind(patch.date.as_deref())
            .bind(patch.total_cut)
            .bind(patch.gross_revenue)
            .bind(patch.period.as_deref())
            .bind(patch.shift.as_deref())
            .bind(patch.role.as_deref())
            .bind(patch.models.as_ref().map(Json))
            .bind(patch.hours_worked)
            .bind(patch.user_mention.as_deref())
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM earnings WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
