use anyhow::Context;
use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::{
    auth::repo_types::User,
    bmi::repo_types::BmiRecord,
    config::AppConfig,
    store::{Store, StoreError},
};

/// PostgreSQL-backed [`Store`].
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { pool })
    }

    #[cfg(test)]
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn map_insert_error(e: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return StoreError::Conflict;
        }
    }
    StoreError::Database(e)
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError> {
        // Duplicates are caught by the unique index, not a prior SELECT.
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (full_name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, full_name, email, password_hash, created_at
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, full_name, email, password_hash, created_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn create_bmi_record(
        &self,
        user_id: Uuid,
        height: f64,
        weight: f64,
        bmi: f64,
    ) -> Result<BmiRecord, StoreError> {
        let record = sqlx::query_as::<_, BmiRecord>(
            r#"
            INSERT INTO bmi_records (user_id, height, weight, bmi)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, height, weight, bmi, created_at
            "#,
        )
        .bind(user_id)
        .bind(height)
        .bind(weight)
        .bind(bmi)
        .fetch_one(&self.pool)
        .await?;
        Ok(record)
    }

    async fn latest_bmi_record(&self, user_id: Uuid) -> Result<Option<BmiRecord>, StoreError> {
        let record = sqlx::query_as::<_, BmiRecord>(
            r#"
            SELECT id, user_id, height, weight, bmi, created_at
              FROM bmi_records
             WHERE user_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(record)
    }

    async fn bmi_history(&self, user_id: Uuid) -> Result<Vec<BmiRecord>, StoreError> {
        let rows = sqlx::query_as::<_, BmiRecord>(
            r#"
            SELECT id, user_id, height, weight, bmi, created_at
              FROM bmi_records
             WHERE user_id = $1
             ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
