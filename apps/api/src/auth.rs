//! # Authentication
//!
//! Credential hashing and request identity.
//!
//! ## Token Header
//! ```text
//! Authorization: token <api_key>:<api_secret>
//!                      │          │
//!                      │          └── argon2-verified against users.api_secret_hash
//!                      └── looked up in users.api_key
//! ```
//!
//! Handlers that need a caller take [`Identity`] as an argument; there is
//! no ambient "current user".

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use std::sync::Arc;
use tracing::debug;

use crate::error::ApiError;
use crate::AppState;

// =============================================================================
// Hashing
// =============================================================================

/// Hashes a password or API secret for storage.
pub fn hash_secret(secret: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(secret.as_bytes(), &salt)
        .map_err(|e| ApiError::internal(format!("Failed to hash secret: {}", e)))?;

    Ok(hash.to_string())
}

/// Verifies a password or API secret against its stored hash.
pub fn verify_secret(secret: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(secret.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Identity
// =============================================================================

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct Identity {
    /// Login email of the token's user.
    pub email: String,
}

impl Identity {
    /// Rejects a client-supplied `logged_in_user` that names someone else.
    pub fn ensure_is(&self, logged_in_user: Option<&str>) -> Result<(), ApiError> {
        match logged_in_user.map(str::trim).filter(|u| !u.is_empty()) {
            Some(user) if !user.eq_ignore_ascii_case(&self.email) => Err(ApiError::forbidden(
                "logged_in_user does not match the authenticated user",
            )),
            _ => Ok(()),
        }
    }
}

/// Splits `token <api_key>:<api_secret>`.
pub fn parse_token_header(value: &str) -> Option<(&str, &str)> {
    let credentials = value.strip_prefix("token ")?.trim();
    let (key, secret) = credentials.split_once(':')?;
    if key.is_empty() || secret.is_empty() {
        return None;
    }
    Some((key, secret))
}

impl FromRequestParts<Arc<AppState>> for Identity {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| ApiError::unauthorized("Missing Authorization header"))?;

        let (api_key, api_secret) = parse_token_header(header).ok_or_else(|| {
            ApiError::unauthorized("Expected Authorization: token <api_key>:<api_secret>")
        })?;

        let user = state
            .db
            .users()
            .get_by_api_key(api_key)
            .await?
            .filter(|u| u.enabled)
            .ok_or_else(|| ApiError::unauthorized("Invalid API credentials"))?;

        let verified = user
            .api_secret_hash
            .as_deref()
            .map(|hash| verify_secret(api_secret, hash))
            .unwrap_or(false);

        if !verified {
            return Err(ApiError::unauthorized("Invalid API credentials"));
        }

        debug!(user = %user.email, "Request authenticated");

        Ok(Identity { email: user.email })
    }
}
