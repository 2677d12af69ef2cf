//! One-time passwords for registered mobile numbers.
//!
//! A mobile number holds at most one live code; generating a new one
//! replaces it. Validation does not consume the code.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use fh_core::codes::generate_otp;
use fh_core::validation::{normalize_mobile, require};
use fh_core::CoreError;

use crate::error::ApiResult;
use crate::handlers::StatusMessage;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GenerateOtpRequest {
    pub mobile_number: Option<String>,
}

/// `POST /api/otp/generate`
pub async fn generate(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<GenerateOtpRequest>, JsonRejection>,
) -> ApiResult<Json<StatusMessage>> {
    let Json(body) = payload?;
    let mobile_number = normalize_mobile(require("mobile_number", body.mobile_number.as_deref())?)?;

    if state.db.users().get_by_mobile(&mobile_number).await?.is_none() {
        return Err(CoreError::UnknownMobile(mobile_number).into());
    }

    let otp = generate_otp();
    state.db.otps().replace(&mobile_number, &otp).await?;

    let message = format!("Your FH Online verification code is {}.", otp);
    state.sms.send(&mobile_number, &message).await?;

    info!(mobile = %mobile_number, gateway = state.sms.name(), "OTP sent");

    Ok(Json(StatusMessage::ok("OTP sent successfully.")))
}

#[derive(Debug, Deserialize)]
pub struct ValidateOtpQuery {
    pub mobile_number: Option<String>,
    pub otp: Option<String>,
}

/// `message` is `1` for a match and `0` otherwise.
#[derive(Debug, Serialize)]
pub struct ValidateOtpResponse {
    pub status: u16,
    pub message: u8,
}

/// `GET /api/otp/validate?mobile_number=..&otp=..`
pub async fn validate(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ValidateOtpQuery>, QueryRejection>,
) -> ApiResult<Json<ValidateOtpResponse>> {
    let Query(query) = query?;
    // looked up as given: a malformed number simply matches nothing
    let mobile = require("mobile_number", query.mobile_number.as_deref())?;
    let mobile_number = mobile.strip_prefix('+').unwrap_or(mobile);
    let otp = require("otp", query.otp.as_deref())?;

    let matched = state.db.otps().matches(mobile_number, otp).await?;

    Ok(Json(ValidateOtpResponse {
        status: 200,
        message: u8::from(matched),
    }))
}
