//! # Settings Repository
//!
//! Key/value store-wide defaults (`global_defaults`).

use sqlx::SqlitePool;

use crate::error::DbResult;

/// Key of the store's default currency.
pub const DEFAULT_CURRENCY_KEY: &str = "default_currency";

#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    pub async fn get(&self, key: &str) -> DbResult<Option<String>> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM global_defaults WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        Ok(value)
    }

    pub async fn set(&self, key: &str, value: &str) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO global_defaults (key, value) VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, key: &str) -> DbResult<()> {
        sqlx::query("DELETE FROM global_defaults WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// The store's default currency, `None` when unset or blank.
    pub async fn default_currency(&self) -> DbResult<Option<String>> {
        Ok(self
            .get(DEFAULT_CURRENCY_KEY)
            .await?
            .filter(|v| !v.trim().is_empty()))
    }
}
