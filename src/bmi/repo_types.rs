use serde::Serialize;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// One BMI submission. `bmi` is always computed server-side.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct BmiRecord {
    pub id: i64,
    pub user_id: Uuid,
    pub height: f64, // cm
    pub weight: f64, // kg
    pub bmi: f64,
    pub created_at: OffsetDateTime,
}
