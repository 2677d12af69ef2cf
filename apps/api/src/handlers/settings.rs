//! Store settings.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    pub status: u16,
    pub message: String,
    pub currency: String,
}

/// `GET /api/currency`
pub async fn get_currency(State(state): State<Arc<AppState>>) -> ApiResult<Json<CurrencyResponse>> {
    let currency = state
        .db
        .settings()
        .default_currency()
        .await?
        .ok_or_else(|| ApiError::not_found("Default currency is not set."))?;

    Ok(Json(CurrencyResponse {
        status: 200,
        message: "Currency returned successfully.".to_string(),
        currency,
    }))
}
