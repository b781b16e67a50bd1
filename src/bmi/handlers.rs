use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::{
    dto::{BmiRequest, BmiResponse, HistoryEntry, HistoryResponse},
    services,
};
use crate::{
    auth::extractors::AuthUser,
    error::{AppError, AppJson},
    state::AppState,
};

pub fn bmi_routes() -> Router<AppState> {
    Router::new()
        .route("/bmi", post(create_bmi))
        .route("/bmi/latest", get(latest_bmi))
        .route("/bmi/history", get(bmi_history))
}

#[instrument(skip(state, user, payload))]
pub async fn create_bmi(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    AppJson(payload): AppJson<BmiRequest>,
) -> Result<(StatusCode, Json<BmiResponse>), AppError> {
    let record = services::record_measurement(state.store.as_ref(), user.id, &payload).await?;

    let mut body = BmiResponse::from(&record);
    body.message = Some("BMI calculated and stored successfully");
    Ok((StatusCode::CREATED, Json(body)))
}

#[instrument(skip(state, user))]
pub async fn latest_bmi(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<BmiResponse>, AppError> {
    let record = services::latest(state.store.as_ref(), user.id).await?;
    Ok(Json(BmiResponse::from(&record)))
}

#[instrument(skip(state, user))]
pub async fn bmi_history(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<HistoryResponse>, AppError> {
    let records = services::history(state.store.as_ref(), user.id).await?;
    Ok(Json(HistoryResponse {
        history: records.iter().map(HistoryEntry::from).collect(),
    }))
}
