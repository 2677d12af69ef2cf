//! # OTP Repository
//!
//! At most one live code per mobile number.
//!
//! ## Reissue
//! ```text
//! BEGIN
//!   DELETE FROM one_time_passwords WHERE mobile_number = ?
//!   INSERT INTO one_time_passwords (mobile_number, otp, created_at)
//! COMMIT
//! ```
//! Two concurrent reissues serialize on the write lock; the PRIMARY KEY on
//! `mobile_number` rejects any second row.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use fh_core::OneTimePassword;

/// Repository for one-time passwords.
#[derive(Debug, Clone)]
pub struct OtpRepository {
    pool: SqlitePool,
}

impl OtpRepository {
    /// Creates a new OtpRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OtpRepository { pool }
    }

    /// Replaces any code held by `mobile_number` with `otp`.
    pub async fn replace(&self, mobile_number: &str, otp: &str) -> DbResult<OneTimePassword> {
        debug!(mobile = %mobile_number, "Reissuing OTP");

        let record = OneTimePassword {
            mobile_number: mobile_number.to_string(),
            otp: otp.to_string(),
            created_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM one_time_passwords WHERE mobile_number = ?1")
            .bind(&record.mobile_number)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO one_time_passwords (mobile_number, otp, created_at) VALUES (?1, ?2, ?3)",
        )
        .bind(&record.mobile_number)
        .bind(&record.otp)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(record)
    }

    /// Exact `(mobile_number, otp)` match. Does not consume the code.
    pub async fn matches(&self, mobile_number: &str, otp: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM one_time_passwords WHERE mobile_number = ?1 AND otp = ?2",
        )
        .bind(mobile_number)
        .bind(otp)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Number of stored codes for a mobile number (0 or 1).
    pub async fn count_for(&self, mobile_number: &str) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM one_time_passwords WHERE mobile_number = ?1")
                .bind(mobile_number)
                .fetch_one(&self.pool)
                .await?;

        Ok(count)
    }
}
