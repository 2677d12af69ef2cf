//! Error-log middleware.
//!
//! Persists every failed request (any response carrying an
//! [`ErrorReport`]) to `error_logs`. A failure to persist is logged and
//! otherwise ignored; the client still gets the original response.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;
use tracing::warn;

use crate::error::ErrorReport;
use crate::AppState;

pub async fn record_failures(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let operation = format!("{} {}", request.method(), request.uri().path());

    let response = next.run(request).await;

    if let Some(report) = response.extensions().get::<ErrorReport>() {
        if let Err(e) = state
            .db
            .error_logs()
            .record(&operation, report.status, &report.message)
            .await
        {
            warn!(operation = %operation, error = %e, "Failed to persist error log");
        }
    }

    response
}
