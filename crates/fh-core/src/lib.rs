//! # fh-core: Pure Business Logic for FH Online
//!
//! Domain types and rules for the storefront API. No I/O lives here.
//!
//! ## Module Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           fh-core                                       │
//! │                                                                         │
//! │  types.rs ──────► Item, Customer, User, SalesOrder, BackgroundJob      │
//! │  money.rs ──────► Money (integer cents)                                │
//! │  validation.rs ─► require, normalize_mobile, normalize_email, ...      │
//! │  names.rs ──────► PersonName::split (first / middle / last)            │
//! │  codes.rs ──────► OTPs, generated passwords, API tokens                │
//! │  error.rs ──────► CoreError, ValidationError                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use fh_core::names::PersonName;
//! use fh_core::validation::normalize_mobile;
//!
//! let mobile = normalize_mobile("+254712345678").unwrap();
//! assert_eq!(mobile, "254712345678");
//!
//! let name = PersonName::split("Jane Doe").unwrap();
//! assert_eq!(name.last_name.as_deref(), Some("Doe"));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod codes;
pub mod error;
pub mod money;
pub mod names;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use names::PersonName;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Price list used to rate order lines.
pub const STANDARD_SELLING_PRICE_LIST: &str = "Standard Selling";

/// Naming-series prefix for sales orders (`SAL-ORD-2026-00001`).
pub const SALES_ORDER_PREFIX: &str = "SAL-ORD";

/// Digits in a one-time password.
pub const OTP_LENGTH: usize = 6;

/// Digits in the password generated at registration.
pub const GENERATED_PASSWORD_LENGTH: usize = 4;

/// Hex characters in an API key or secret.
pub const API_TOKEN_LENGTH: usize = 15;

/// Maximum quantity of a single order line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum number of lines on one order.
pub const MAX_ORDER_LINES: usize = 100;

/// Job kind for queued customer onboarding.
pub const JOB_KIND_ONBOARDING: &str = "customer_onboarding";

/// Login sessions kept per user; older ones are pruned on login.
pub const MAX_SESSIONS_PER_USER: i64 = 5;
