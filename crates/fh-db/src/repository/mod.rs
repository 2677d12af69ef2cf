//! # Repository Module
//!
//! Database repository implementations for FH Online.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.sales_orders().create(&customer, date, &lines)             │
//! │       ▼                                                                 │
//! │  SalesOrderRepository { pool }                                         │
//! │       │                                                                 │
//! │       │  SQL (runtime-checked query_as + FromRow)                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ItemRepository`](item::ItemRepository) - Catalog and price lists
//! - [`CustomerRepository`](customer::CustomerRepository) - Customers, onboarding write
//! - [`UserRepository`](user::UserRepository) - Login users and API credentials
//! - [`SessionRepository`](session::SessionRepository) - Login sessions
//! - [`OtpRepository`](otp::OtpRepository) - One-time passwords
//! - [`SalesOrderRepository`](sales_order::SalesOrderRepository) - Orders, lines, history
//! - [`SettingsRepository`](settings::SettingsRepository) - Global defaults
//! - [`JobRepository`](job::JobRepository) - Background job queue
//! - [`ErrorLogRepository`](error_log::ErrorLogRepository) - Persisted failures

pub mod customer;
pub mod error_log;
pub mod item;
pub mod job;
pub mod otp;
pub mod sales_order;
pub mod session;
pub mod settings;
pub mod user;
