//! # Customer Registration
//!
//! ```text
//! POST /api/customers/register
//!   │
//!   ├── validate + normalise (mobile "+" stripped, email lowercased)
//!   ├── customer exists? ──yes──► 409 ALREADY_REGISTERED
//!   ├── queued/running job for mobile or email? ──yes──► 409
//!   ├── enqueue job (idempotency key = sha256(mobile:email))
//!   │     └── key taken? ──────► 409 ALREADY_REGISTERED
//!   └── notify worker, 200
//! ```
//!
//! The accounts themselves are created by the onboarding worker.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use tracing::info;

use fh_core::validation::{normalize_email, normalize_mobile, require, validate_full_name};
use fh_core::{CoreError, RegistrationRequest, JOB_KIND_ONBOARDING};

use crate::error::{ApiError, ApiResult};
use crate::handlers::StatusMessage;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub mobile_number: Option<String>,
    pub email_address: Option<String>,
    pub full_name: Option<String>,
}

/// Key identifying one registration attempt for a mobile/email pair.
pub fn idempotency_key(mobile_number: &str, email: &str) -> String {
    let digest = Sha256::digest(format!("{mobile_number}:{email}").as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// `POST /api/customers/register`
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<Json<StatusMessage>> {
    let Json(body) = payload?;

    let mobile_number = normalize_mobile(require("mobile_number", body.mobile_number.as_deref())?)?;
    let email_address = normalize_email(require("email_address", body.email_address.as_deref())?)?;
    let full_name = require("full_name", body.full_name.as_deref())?.to_string();
    validate_full_name(&full_name)?;

    let already_registered = || -> ApiError {
        CoreError::AlreadyRegistered {
            mobile_number: mobile_number.clone(),
            email: email_address.clone(),
        }
        .into()
    };

    if state
        .db
        .customers()
        .exists_by_mobile_or_email(&mobile_number, &email_address)
        .await?
    {
        return Err(already_registered());
    }

    // not yet a customer, but already waiting for the worker
    if state
        .db
        .jobs()
        .pending_for_contact(JOB_KIND_ONBOARDING, &mobile_number, &email_address)
        .await?
    {
        return Err(already_registered());
    }

    let key = idempotency_key(&mobile_number, &email_address);
    let request = RegistrationRequest {
        mobile_number: mobile_number.clone(),
        email_address: email_address.clone(),
        full_name,
    };
    let payload = serde_json::to_string(&request)
        .map_err(|e| ApiError::internal(format!("Failed to encode job payload: {}", e)))?;

    match state.db.jobs().enqueue(JOB_KIND_ONBOARDING, &key, &payload).await {
        Ok(job) => {
            info!(job = %job.id, mobile = %mobile_number, "Registration queued");
        }
        Err(e) if e.is_unique_violation_on(&["background_jobs.idempotency_key"]) => {
            return Err(already_registered());
        }
        Err(e) => return Err(e.into()),
    }

    state.jobs_notify.notify_one();

    Ok(Json(StatusMessage::ok(
        "Customer registration has been queued. Login details will be sent by SMS.",
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idempotency_key_is_stable_per_pair() {
        let a = idempotency_key("254700000001", "jane@example.com");
        assert_eq!(a.len(), 64);
        assert_eq!(a, idempotency_key("254700000001", "jane@example.com"));
        assert_ne!(a, idempotency_key("254700000002", "jane@example.com"));
    }
}
