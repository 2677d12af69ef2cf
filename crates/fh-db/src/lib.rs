//! # fh-db: Database Layer for FH Online
//!
//! SQLite storage for the storefront API, using sqlx for async access.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FH Online Data Flow                              │
//! │                                                                         │
//! │  axum handler / onboarding worker                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     fh-db (THIS CRATE)                          │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │◄───│ Item, Customer │    │  (embedded)  │  │   │
//! │  │   │  SqlitePool   │    │ User, Otp, ... │    │ 001_init.sql │  │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (FH_DATABASE_PATH, default ./fh_online.db)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use fh_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("fh_online.db")).await?;
//! let catalog = db.items().list_catalog().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::customer::CustomerRepository;
pub use repository::error_log::{ErrorLogEntry, ErrorLogRepository};
pub use repository::item::{CatalogEntry, ItemRepository};
pub use repository::job::JobRepository;
pub use repository::otp::OtpRepository;
pub use repository::sales_order::{OrderHistoryRow, SalesOrderRepository};
pub use repository::session::{Session, SessionRepository};
pub use repository::settings::SettingsRepository;
pub use repository::user::UserRepository;
