//! # Validation Module
//!
//! Input validation and normalisation for request parameters.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: axum extractors                                              │
//! │  └── Type validation (JSON / query deserialization)                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Required fields, lengths, ranges                                  │
//! │  └── Normalisation (mobile "+" prefix, email case)                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: SQLite                                                       │
//! │  ├── UNIQUE (customers.mobile_no, customers.email_id, ...)             │
//! │  └── Foreign keys                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_LINES};

pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Required Fields
// =============================================================================

/// Returns the trimmed value, or `Required` when absent or blank.
///
/// ```rust
/// use fh_core::validation::require;
///
/// assert_eq!(require("full_name", Some("  Jane Doe ")).unwrap(), "Jane Doe");
/// assert!(require("full_name", Some("   ")).is_err());
/// assert!(require("full_name", None).is_err());
/// ```
pub fn require<'a>(field: &str, value: Option<&'a str>) -> ValidationResult<&'a str> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::Required {
            field: field.to_string(),
        }),
    }
}

// =============================================================================
// Contact Details
// =============================================================================

/// Normalises a mobile number: trims and strips one leading `+`.
///
/// ## Rules
/// - Must not be empty
/// - Digits only after normalisation
/// - At most 15 digits (E.164)
///
/// ```rust
/// use fh_core::validation::normalize_mobile;
///
/// assert_eq!(normalize_mobile("+254712345678").unwrap(), "254712345678");
/// assert_eq!(normalize_mobile("0712345678").unwrap(), "0712345678");
/// assert!(normalize_mobile("+").is_err());
/// ```
pub fn normalize_mobile(raw: &str) -> ValidationResult<String> {
    let trimmed = raw.trim();
    let mobile = trimmed.strip_prefix('+').unwrap_or(trimmed);

    if mobile.is_empty() {
        return Err(ValidationError::Required {
            field: "mobile_number".to_string(),
        });
    }

    if mobile.len() > 15 {
        return Err(ValidationError::TooLong {
            field: "mobile_number".to_string(),
            max: 15,
        });
    }

    if !mobile.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "mobile_number".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(mobile.to_string())
}

/// Normalises an email address: trims and lowercases.
///
/// Only a structural check is done (`local@domain.tld`); deliverability is
/// not our concern.
pub fn normalize_email(raw: &str) -> ValidationResult<String> {
    let email = raw.trim().to_lowercase();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email_address".to_string(),
        });
    }

    if email.len() > 254 {
        return Err(ValidationError::TooLong {
            field: "email_address".to_string(),
            max: 254,
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.contains(char::is_whitespace)
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email_address".to_string(),
            reason: "must look like name@example.com".to_string(),
        });
    }

    Ok(email)
}

/// Validates a customer's full name.
pub fn validate_full_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "full_name".to_string(),
        });
    }

    if name.chars().count() > 140 {
        return Err(ValidationError::TooLong {
            field: "full_name".to_string(),
            max: 140,
        });
    }

    Ok(())
}

/// Validates a new password chosen during recovery.
pub fn validate_new_password(password: &str) -> ValidationResult<()> {
    if password.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "new_password".to_string(),
        });
    }

    if password.len() > 128 {
        return Err(ValidationError::TooLong {
            field: "new_password".to_string(),
            max: 128,
        });
    }

    Ok(())
}

// =============================================================================
// Orders
// =============================================================================

/// Validates a line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if !(1..=MAX_ITEM_QUANTITY).contains(&qty) {
        return Err(ValidationError::OutOfRange {
            field: "qty".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates the number of lines on an order.
pub fn validate_order_lines(count: usize) -> ValidationResult<()> {
    if count == 0 {
        return Err(ValidationError::Required {
            field: "sales_order_items".to_string(),
        });
    }

    if count > MAX_ORDER_LINES {
        return Err(ValidationError::OutOfRange {
            field: "sales_order_items".to_string(),
            min: 1,
            max: MAX_ORDER_LINES as i64,
        });
    }

    Ok(())
}

/// Parses a `YYYY-MM-DD` delivery date.
///
/// ```rust
/// use fh_core::validation::parse_delivery_date;
///
/// assert!(parse_delivery_date("2026-11-02").is_ok());
/// assert!(parse_delivery_date("02/11/2026").is_err());
/// ```
pub fn parse_delivery_date(raw: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "delivery_date".to_string(),
            reason: "expected YYYY-MM-DD".to_string(),
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
