//! # Domain Types
//!
//! Records owned by the storefront: catalog items and prices, customers and
//! their login users, one-time passwords, sales orders and queued jobs.
//!
//! ## Entity Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Item ◄──── ItemPrice (item_code, price_list, selling)                 │
//! │    ▲                                                                    │
//! │    │ item_code                                                          │
//! │   SalesOrderItem ──► SalesOrder ──► Customer ◄── email ──► User         │
//! │                                        ▲                   │            │
//! │                                        └── mobile_no ──────┘            │
//! │                                                            │            │
//! │                                  OneTimePassword ◄─ mobile ┘            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! With the `sqlx` feature the row types derive `FromRow` and the status
//! enums derive `sqlx::Type`, so `fh-db` can decode them directly.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Catalog
// =============================================================================

/// A sellable product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    /// Business identifier, also the primary key.
    pub item_code: String,

    /// Display name.
    pub item_name: String,

    pub description: Option<String>,

    /// Category (item group).
    pub item_group: Option<String>,

    /// Image URL or path.
    pub image: Option<String>,

    /// Disabled items are hidden from the catalog and cannot be ordered.
    pub disabled: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// A rate for an item on a named price list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ItemPrice {
    pub item_code: String,
    pub price_list: String,
    /// Selling (as opposed to buying) price.
    pub selling: bool,
    /// Rate in cents.
    pub rate_cents: i64,
}

impl ItemPrice {
    #[inline]
    pub fn rate(&self) -> Money {
        Money::from_cents(self.rate_cents)
    }
}

// =============================================================================
// Customers & Users
// =============================================================================

/// A storefront customer. Linked to its [`User`] by email and mobile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Generated document name (`CUST-xxxxxxxx`).
    pub name: String,
    pub customer_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: Option<String>,
    /// Normalised mobile number (no leading `+`).
    pub mobile_no: String,
    /// Lowercased email.
    pub email_id: String,
    pub created_at: DateTime<Utc>,
}

/// A login identity.
///
/// Secrets are stored as argon2 hashes only and never serialized.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    /// Login email, also the primary key.
    pub email: String,
    pub full_name: String,
    pub mobile_no: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Generated on first login, stable afterwards.
    pub api_key: Option<String>,
    /// Replaced on every login.
    #[serde(skip_serializing)]
    pub api_secret_hash: Option<String>,
    pub enabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A one-time password issued to a mobile number.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OneTimePassword {
    pub mobile_number: String,
    pub otp: String,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Sales Orders
// =============================================================================

/// Lifecycle state of a sales order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SalesOrderStatus {
    /// Editable; items may be replaced.
    #[default]
    Draft,
    /// Locked for fulfilment.
    Submitted,
    Cancelled,
}

impl SalesOrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SalesOrderStatus::Draft => "draft",
            SalesOrderStatus::Submitted => "submitted",
            SalesOrderStatus::Cancelled => "cancelled",
        }
    }
}

impl std::fmt::Display for SalesOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sales order header.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SalesOrder {
    /// Naming-series document name, e.g. `SAL-ORD-2026-00001`.
    pub name: String,
    /// Customer document name.
    pub customer: String,
    #[ts(as = "String")]
    pub transaction_date: NaiveDate,
    #[ts(as = "Option<String>")]
    pub delivery_date: Option<NaiveDate>,
    pub status: SalesOrderStatus,
    /// Sum of line amounts, in cents.
    pub grand_total_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl SalesOrder {
    #[inline]
    pub fn grand_total(&self) -> Money {
        Money::from_cents(self.grand_total_cents)
    }

    #[inline]
    pub fn is_draft(&self) -> bool {
        self.status == SalesOrderStatus::Draft
    }
}

/// A persisted order line.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SalesOrderItem {
    pub id: String,
    /// Parent sales order name.
    pub parent: String,
    /// 1-based position within the order.
    pub idx: i64,
    pub item_code: String,
    pub item_name: String,
    pub qty: i64,
    pub rate_cents: i64,
    pub amount_cents: i64,
}

/// An order line whose rate has already been resolved from a price list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine {
    pub item_code: String,
    pub item_name: String,
    pub qty: i64,
    pub rate: Money,
}

impl PricedLine {
    /// Line amount: rate × qty.
    #[inline]
    pub fn amount(&self) -> Money {
        self.rate.multiply_quantity(self.qty)
    }
}

/// Grand total of a set of priced lines.
pub fn order_total(lines: &[PricedLine]) -> Money {
    lines.iter().map(PricedLine::amount).sum()
}

// =============================================================================
// Background Jobs
// =============================================================================

/// State of a queued background job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Queued,
    Running,
    Done,
    Failed,
}

/// A persisted job. `payload` is JSON whose shape depends on `kind`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct BackgroundJob {
    pub id: String,
    pub kind: String,
    /// Deduplicates retries and double submits.
    pub idempotency_key: String,
    pub payload: String,
    pub status: JobStatus,
    pub attempts: i64,
    pub last_error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload of an onboarding job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub mobile_number: String,
    pub email_address: String,
    pub full_name: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
