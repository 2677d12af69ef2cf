//! # Job Repository
//!
//! Table-backed queue for background work (customer onboarding).
//!
//! ## Job Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   enqueue()          claim_next()           mark_done()                 │
//! │  ─────────► queued ─────────────► running ─────────────► done          │
//! │      │                (attempts+1)    │                                 │
//! │      │                                │   mark_failed(error)            │
//! │      │                                └──────────────────► failed      │
//! │      │                                                                  │
//! │      └── UNIQUE(idempotency_key): a second enqueue with the same key   │
//! │          is a UniqueViolation, never a second job                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failed jobs are kept for inspection and not retried.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::DbResult;
use fh_core::{BackgroundJob, JobStatus};

const JOB_COLUMNS: &str = "id, kind, idempotency_key, payload, status, attempts, last_error, \
     created_at, updated_at";

/// Repository for the background job queue.
#[derive(Debug, Clone)]
pub struct JobRepository {
    pool: SqlitePool,
}

impl JobRepository {
    /// Creates a new JobRepository.
    pub fn new(pool: SqlitePool) -> Self {
        JobRepository { pool }
    }

    /// Queues a job.
    ///
    /// ## Errors
    /// `DbError::UniqueViolation` on `background_jobs.idempotency_key` when a
    /// job with the same key was already queued (whatever its status).
    pub async fn enqueue(
        &self,
        kind: &str,
        idempotency_key: &str,
        payload: &str,
    ) -> DbResult<BackgroundJob> {
        let now = Utc::now();
        let job = BackgroundJob {
            id: Uuid::new_v4().to_string(),
            kind: kind.to_string(),
            idempotency_key: idempotency_key.to_string(),
            payload: payload.to_string(),
            status: JobStatus::Queued,
            attempts: 0,
            last_error: None,
            created_at: now,
            updated_at: now,
        };

        debug!(kind = %kind, id = %job.id, "Enqueuing job");

        sqlx::query(
            r#"
            INSERT INTO background_jobs (
                id, kind, idempotency_key, payload, status,
                attempts, last_error, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&job.id)
        .bind(&job.kind)
        .bind(&job.idempotency_key)
        .bind(&job.payload)
        .bind(job.status)
        .bind(job.attempts)
        .bind(&job.last_error)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(job)
    }

    /// True when a queued or running job of `kind` already carries this
    /// mobile number or email in its payload.
    ///
    /// Registrations are only visible in `customers` once the worker has
    /// run, so the queue itself is checked for contacts still in flight.
    pub async fn pending_for_contact(
        &self,
        kind: &str,
        mobile_number: &str,
        email: &str,
    ) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM background_jobs
            WHERE kind = ?1
              AND status IN ('queued', 'running')
              AND (json_extract(payload, '$.mobile_number') = ?2
                   OR json_extract(payload, '$.email_address') = ?3)
            "#,
        )
        .bind(kind)
        .bind(mobile_number)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Atomically takes the oldest queued job and marks it running.
    pub async fn claim_next(&self) -> DbResult<Option<BackgroundJob>> {
        let sql = format!(
            r#"
            UPDATE background_jobs SET
                status = 'running',
                attempts = attempts + 1,
                updated_at = ?1
            WHERE id = (
                SELECT id FROM background_jobs
                WHERE status = 'queued'
                ORDER BY created_at ASC, rowid ASC
                LIMIT 1
            )
            RETURNING {JOB_COLUMNS}
            "#
        );

        let job = sqlx::query_as::<_, BackgroundJob>(&sql)
            .bind(Utc::now())
            .fetch_optional(&self.pool)
            .await?;

        Ok(job)
    }

    /// Marks a job finished.
    pub async fn mark_done(&self, id: &str) -> DbResult<()> {
        sqlx::query(
            "UPDATE background_jobs SET status = 'done', last_error = NULL, updated_at = ?2 WHERE id = ?1",
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Marks a job failed with the error text.
    pub async fn mark_failed(&self, id: &str, error: &str) -> DbResult<()> {
        warn!(id = %id, error = %error, "Job failed");

        sqlx::query(
            "UPDATE background_jobs SET status = 'failed', last_error = ?2, updated_at = ?3 WHERE id = ?1",
        )
        .bind(id)
        .bind(error)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Puts jobs left `running` by a previous process back in the queue.
    pub async fn requeue_stale_running(&self) -> DbResult<u64> {
        let result = sqlx::query(
            "UPDATE background_jobs SET status = 'queued', updated_at = ?1 WHERE status = 'running'",
        )
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn get(&self, id: &str) -> DbResult<Option<BackgroundJob>> {
        let sql = format!("SELECT {JOB_COLUMNS} FROM background_jobs WHERE id = ?1");

        let job = sqlx::query_as::<_, BackgroundJob>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(job)
    }

    /// Counts jobs in a given state.
    pub async fn count_by_status(&self, status: JobStatus) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM background_jobs WHERE status = ?1")
            .bind(status)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
