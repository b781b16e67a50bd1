use tracing::info;
use uuid::Uuid;

use super::{
    calculator::{calculate_bmi, MAX_HEIGHT_CM, MAX_WEIGHT_KG, MIN_HEIGHT_CM, MIN_WEIGHT_KG},
    dto::BmiRequest,
    repo_types::BmiRecord,
};
use crate::{
    error::{AppError, FieldError},
    store::Store,
};

/// Returns `(weight_kg, height_cm)` when both are present and in range.
pub fn validate_measurement(req: &BmiRequest) -> Result<(f64, f64), AppError> {
    let weight = req
        .weight
        .filter(|w| (MIN_WEIGHT_KG..=MAX_WEIGHT_KG).contains(w));
    let height = req
        .height
        .filter(|h| (MIN_HEIGHT_CM..=MAX_HEIGHT_CM).contains(h));

    match (weight, height) {
        (Some(w), Some(h)) => Ok((w, h)),
        _ => {
            let mut errors = Vec::new();
            if weight.is_none() {
                errors.push(FieldError::new("weight", "Weight must be between 20-300 kg"));
            }
            if height.is_none() {
                errors.push(FieldError::new("height", "Height must be between 100-250 cm"));
            }
            Err(AppError::Validation(errors))
        }
    }
}

/// Validates, computes and stores a new record for the user.
pub async fn record_measurement(
    store: &dyn Store,
    user_id: Uuid,
    req: &BmiRequest,
) -> Result<BmiRecord, AppError> {
    let (weight, height) = validate_measurement(req)?;

    let bmi = calculate_bmi(weight, height);
    let record = store
        .create_bmi_record(user_id, height, weight, bmi)
        .await?;
    info!(user_id = %user_id, record_id = record.id, bmi, "bmi recorded");
    Ok(record)
}

pub async fn latest(store: &dyn Store, user_id: Uuid) -> Result<BmiRecord, AppError> {
    store
        .latest_bmi_record(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No BMI records found".into()))
}

pub async fn history(store: &dyn Store, user_id: Uuid) -> Result<Vec<BmiRecord>, AppError> {
    Ok(store.bmi_history(user_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    fn req(weight: f64, height: f64) -> BmiRequest {
        BmiRequest {
            weight: Some(weight),
            height: Some(height),
        }
    }

    #[test]
    fn range_limits_are_inclusive() {
        assert!(validate_measurement(&req(20.0, 100.0)).is_ok());
        assert!(validate_measurement(&req(300.0, 250.0)).is_ok());
    }

    #[test]
    fn out_of_range_fields_are_reported() {
        match validate_measurement(&req(19.9, 250.1)) {
            Err(AppError::Validation(errors)) => {
                let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, vec!["weight", "height"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
        assert!(validate_measurement(&req(f64::NAN, 170.0)).is_err());
    }

    #[test]
    fn missing_values_are_field_errors() {
        let err = validate_measurement(&BmiRequest {
            weight: None,
            height: Some(170.0),
        })
        .unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "weight");
                assert_eq!(errors[0].message, "Weight must be between 20-300 kg");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn bmi_is_recomputed_on_write() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        let record = record_measurement(&store, user, &req(70.0, 175.0)).await.unwrap();
        assert_eq!(record.bmi, 22.9);
        assert_eq!(record.height, 175.0);
        assert_eq!(record.weight, 70.0);
        assert_eq!(latest(&store, user).await.unwrap().id, record.id);
    }

    #[tokio::test]
    async fn invalid_measurement_is_not_stored() {
        let store = MemoryStore::new();
        let user = Uuid::new_v4();
        assert!(record_measurement(&store, user, &req(500.0, 175.0)).await.is_err());
        assert!(history(&store, user).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn latest_without_records_is_not_found() {
        let store = MemoryStore::new();
        let err = latest(&store, Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
