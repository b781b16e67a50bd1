use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::{auth::repo_types::User, bmi::repo_types::BmiRecord};

#[cfg(test)]
pub mod memory;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique constraint on `users.email` rejected the insert.
    #[error("email already registered")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence for user accounts and BMI records.
#[async_trait]
pub trait Store: Send + Sync {
    async fn create_user(
        &self,
        full_name: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<User, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn create_bmi_record(
        &self,
        user_id: Uuid,
        height: f64,
        weight: f64,
        bmi: f64,
    ) -> Result<BmiRecord, StoreError>;

    async fn latest_bmi_record(&self, user_id: Uuid) -> Result<Option<BmiRecord>, StoreError>;

    /// All records of the user, oldest first.
    async fn bmi_history(&self, user_id: Uuid) -> Result<Vec<BmiRecord>, StoreError>;
}
