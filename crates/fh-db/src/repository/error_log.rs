//! # Error Log Repository
//!
//! Request failures, persisted for later inspection. Writing here must never
//! turn into a second failure, so callers log and drop its errors.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::DbResult;

/// A recorded failure.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ErrorLogEntry {
    pub id: String,
    /// Operation that failed, e.g. `POST /api/orders`.
    pub method: String,
    /// HTTP status returned to the client.
    pub status: i64,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ErrorLogRepository {
    pool: SqlitePool,
}

impl ErrorLogRepository {
    pub fn new(pool: SqlitePool) -> Self {
        ErrorLogRepository { pool }
    }

    pub async fn record(&self, method: &str, status: u16, message: &str) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO error_logs (id, method, status, message, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(Uuid::new_v4().to_string())
        .bind(method)
        .bind(i64::from(status))
        .bind(message)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Most recent entries first.
    pub async fn recent(&self, limit: u32) -> DbResult<Vec<ErrorLogEntry>> {
        let entries = sqlx::query_as::<_, ErrorLogEntry>(
            r#"
            SELECT id, method, status, message, created_at
            FROM error_logs
            ORDER BY created_at DESC
            LIMIT ?1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
