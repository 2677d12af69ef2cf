//! # Session Handlers
//!
//! Login and password recovery.
//!
//! ## Login Flow
//! ```text
//! POST /api/login {usr, pwd}
//!   │
//!   ├── find user by email or mobile ──none──┐
//!   ├── enabled? ─────────────────────no─────┤
//!   ├── argon2 verify pwd ───────────fail────┼──► 200 {success_key: 0}
//!   │                                        │
//!   ├── INSERT session (sid), prune beyond the newest 5
//!   ├── api_key: keep existing, else generate
//!   ├── api_secret: always fresh, store argon2 hash only
//!   └── 200 {success_key: 1, sid, api_key, api_secret, ...}
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info};

use fh_core::codes::{generate_api_token, generate_sid};
use fh_core::validation::{normalize_mobile, require, validate_new_password};
use fh_core::{ValidationError, MAX_SESSIONS_PER_USER};

use crate::auth::{hash_secret, verify_secret};
use crate::error::{ApiError, ApiResult};
use crate::handlers::StatusMessage;
use crate::AppState;

/// Normalises a login identifier that is either an email or a mobile number.
pub fn normalize_login(usr: &str) -> Result<String, ValidationError> {
    let usr = usr.trim();
    if usr.contains('@') {
        Ok(usr.to_lowercase())
    } else {
        normalize_mobile(usr)
    }
}

// =============================================================================
// Password Recovery
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct RecoverPasswordRequest {
    pub usr: Option<String>,
    pub new_password: Option<String>,
}

/// `POST /api/password/recover`
pub async fn recover_password(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RecoverPasswordRequest>, JsonRejection>,
) -> ApiResult<Json<StatusMessage>> {
    let Json(body) = payload?;

    let usr = normalize_login(require("usr", body.usr.as_deref())?)?;
    let new_password = body.new_password.unwrap_or_default();
    validate_new_password(&new_password)?;

    let user = state
        .db
        .users()
        .find_by_login(&usr)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("User {} does not exist.", usr)))?;

    let password_hash = hash_secret(&new_password)?;
    state
        .db
        .users()
        .update_password(&user.email, &password_hash)
        .await?;

    info!(user = %user.email, "Password reset");

    Ok(Json(StatusMessage::ok("Password updated successfully.")))
}

// =============================================================================
// Login
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub usr: Option<String>,
    pub pwd: Option<String>,
}

/// Login outcome. Failures carry only `success_key` and `message`.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success_key: u8,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_secret: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl LoginResponse {
    fn failed() -> Self {
        LoginResponse {
            success_key: 0,
            message: "Authentication Error!".to_string(),
            sid: None,
            api_key: None,
            api_secret: None,
            username: None,
            email: None,
            base_url: None,
        }
    }
}

/// `POST /api/login`
///
/// Bad credentials are answered with HTTP 200 and `success_key: 0`.
/// Storage failures still surface as errors.
pub async fn login(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(body) = payload?;

    let (Some(usr), Some(pwd)) = (body.usr, body.pwd) else {
        return Ok(Json(LoginResponse::failed()));
    };
    let Ok(usr) = normalize_login(&usr) else {
        return Ok(Json(LoginResponse::failed()));
    };

    let user = match state.db.users().find_by_login(&usr).await? {
        Some(user) if user.enabled && verify_secret(&pwd, &user.password_hash) => user,
        _ => {
            debug!(usr = %usr, "Login rejected");
            return Ok(Json(LoginResponse::failed()));
        }
    };

    let session = state.db.sessions().create(&generate_sid(), &user.email).await?;
    state
        .db
        .sessions()
        .prune_for_user(&user.email, MAX_SESSIONS_PER_USER)
        .await?;

    let api_key = user.api_key.clone().unwrap_or_else(generate_api_token);
    let api_secret = generate_api_token();
    state
        .db
        .users()
        .set_api_credentials(&user.email, &api_key, &hash_secret(&api_secret)?)
        .await?;

    info!(user = %user.email, "Login succeeded");

    Ok(Json(LoginResponse {
        success_key: 1,
        message: "Authentication success".to_string(),
        sid: Some(session.sid),
        api_key: Some(api_key),
        api_secret: Some(api_secret),
        username: Some(user.full_name),
        email: Some(user.email),
        base_url: Some(state.config.base_url.clone()),
    }))
}
