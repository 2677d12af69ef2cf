//! # FH Online API
//!
//! REST server for the FH Online storefront.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          API Server                                     │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  catalog       │  │  onboarding    │  │  orders                    ││
//! │  │ • products     │  │ • register     │  │ • create / replace draft   ││
//! │  │ • currency     │  │   (queues job) │  │ • submit                   ││
//! │  └────────────────┘  └───────┬────────┘  │ • history                  ││
//! │                              │ Notify    └────────────────────────────┘│
//! │  ┌────────────────┐  ┌───────▼────────┐  ┌────────────────────────────┐│
//! │  │  session       │  │ Onboarding     │  │  otp                       ││
//! │  │ • login        │  │ Worker         │  │ • generate (SMS)           ││
//! │  │ • recover pwd  │  │ (tokio task)   │  │ • validate                 ││
//! │  └────────────────┘  └────────────────┘  └────────────────────────────┘│
//! │                                                                         │
//! │  Layers: TraceLayer (request spans) → error log (failures → SQLite)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`] for the `FH_*` environment variables.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod jobs;
pub mod middleware;
pub mod sms;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::sync::Notify;
use tower_http::trace::TraceLayer;

use fh_db::Database;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use sms::{SmsGateway, SmsError};

/// Shared application state.
pub struct AppState {
    pub db: Database,
    pub sms: Arc<dyn SmsGateway>,
    pub config: ApiConfig,
    /// Wakes the onboarding worker after a job is queued.
    pub jobs_notify: Arc<Notify>,
}

impl AppState {
    pub fn new(db: Database, sms: Arc<dyn SmsGateway>, config: ApiConfig) -> Self {
        AppState {
            db,
            sms,
            config,
            jobs_notify: Arc::new(Notify::new()),
        }
    }
}

/// Builds the HTTP router with all routes and layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    use handlers::{catalog, health, onboarding, orders, otp, session, settings};

    Router::new()
        .route("/health", get(health::health))
        .route("/api/products", get(catalog::list_products))
        .route("/api/currency", get(settings::get_currency))
        .route("/api/customers/register", post(onboarding::register))
        .route("/api/otp/generate", post(otp::generate))
        .route("/api/otp/validate", get(otp::validate))
        .route("/api/password/recover", post(session::recover_password))
        .route("/api/login", post(session::login))
        .route(
            "/api/orders",
            post(orders::create_or_update).get(orders::list),
        )
        .route("/api/orders/{name}/submit", post(orders::submit))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::record_failures,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
