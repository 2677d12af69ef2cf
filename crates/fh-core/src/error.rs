//! # Error Types
//!
//! Domain-specific error types for fh-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fh-core errors (this file)                                            │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  fh-db errors (separate crate)                                         │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  HTTP errors (apps/api)                                                │
//! │  └── ApiError         - What clients see ({status, code, message})     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → JSON body              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule failures.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A customer with this mobile number or email already exists.
    #[error("Customer with mobile number {mobile_number} or email {email} is already registered")]
    AlreadyRegistered {
        mobile_number: String,
        email: String,
    },

    /// No user has this mobile number.
    #[error("User with this mobile number does not exist.")]
    UnknownMobile(String),

    /// The authenticated user has no customer profile.
    #[error("User {0} is not linked to a customer profile")]
    NotLinkedToCustomer(String),

    /// An ordered item does not exist or is disabled.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// An ordered item has no rate on the selling price list.
    ///
    /// ## When This Occurs
    /// ```text
    /// create_order([MILK-500 ✓, EGGS-12 ✗])
    ///      │
    ///      ▼
    /// PriceNotFound { item_code: "EGGS-12", price_list: "Standard Selling" }
    ///      │
    ///      ▼
    /// Whole request fails, no order written
    /// ```
    #[error("Price not found for item {item_code} in price list {price_list}")]
    PriceNotFound {
        item_code: String,
        price_list: String,
    },

    /// Sales order not found (or not visible to the caller).
    #[error("Sales order not found: {0}")]
    SalesOrderNotFound(String),

    /// Sales order is not in a state that allows the requested operation.
    #[error("Sales order {name} is {status}, cannot perform operation")]
    InvalidOrderStatus { name: String, status: String },

    /// Validation error (wraps ValidationError).
    #[error("{0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., invalid email, invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
