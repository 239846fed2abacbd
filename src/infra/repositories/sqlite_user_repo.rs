use crate::domain::{models::user::{NewUser, Role, User}, ports::UserRepository};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{types::Json, SqlitePool};
use tracing::error;

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

const USER_COLUMNS: &str = "id, email, password_hash, role, managed_guild_ids, created_at, updated_at";

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn register(&self, user: &NewUser) -> Result<User, AppError> {
        // A single INSERT ... SELECT holds the write lock for its whole
        // duration, so the EXISTS check and the insert cannot interleave.
        sqlx::query_as::<_, User>(
            &format!(
                "INSERT INTO users ({USER_COLUMNS}) \
                 SELECT ?, ?, ?, CASE WHEN EXISTS (SELECT 1 FROM users) THEN 'manager' ELSE 'admin' END, '[]', ?, ? \
                 RETURNING {USER_COLUMNS}"
            ),
        )
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.created_at)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?"))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
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
            &format!("UPDATE users SET role = ?, managed_guild_ids = ?, updated_at = ? WHERE id = ? RETURNING {USER_COLUMNS}"),
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
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite User Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
