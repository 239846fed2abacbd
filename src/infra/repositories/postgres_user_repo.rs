use crate::domain::{models::user::{NewUser, Role, User}, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, PgPool};
use tracing::error;

pub struct PostgresUserRepo {
    pool: PgPool,
}

impl PostgresUserRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, role, managed_guild_ids, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUserRepo {
    async fn register(&self, user: &NewUser) -> Result<User, AppError> {
        let mut tx = self.pool.begin().await?;

        // SHARE ROW EXCLUSIVE conflicts with itself, so concurrent registrations
        // serialize here and each one sees the rows committed before it.
        sqlx::query("LOCK TABLE users IN SHARE ROW EXCLUSIVE MODE")
            .execute(&mut *tx)
            .await?;

        let created = sqlx::query_as::<_, User>(
            &format!(
                "INSERT INTO users ({USER_COLUMNS}) \
                 SELECT $1, $2, $3, CASE WHEN EXISTS (SELECT 1 FROM users) THEN 'manager' ELSE 'admin' END, '[]'::jsonb, $4, $4 \
                 RETURNING {USER_COLUMNS}"
            ),
        )
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(created)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at ASC, email ASC"))
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_access(&self, id: &str, role: Role, managed_guild_ids: &[String]) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            &format!("UPDATE users SET role = $1, managed_guild_ids = $2, updated_at = $3 WHERE id = $4 RETURNING {USER_COLUMNS}"),
        )
            .bind(role.as_str())
            .bind(Json(managed_guild_ids))
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Postgres User Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
