//! # HTTP Handlers
//!
//! One module per storefront area. Handlers validate input with fh-core,
//! talk to fh-db repositories and return JSON bodies carrying a `status`
//! field that mirrors the HTTP status.

pub mod catalog;
pub mod health;
pub mod onboarding;
pub mod orders;
pub mod otp;
pub mod session;
pub mod settings;

use serde::Serialize;

/// `{status, message}` body shared by simple endpoints.
#[derive(Debug, Serialize)]
pub struct StatusMessage {
    pub status: u16,
    pub message: String,
}

impl StatusMessage {
    pub fn ok(message: impl Into<String>) -> Self {
        StatusMessage {
            status: 200,
            message: message.into(),
        }
    }
}
