//! # User Repository
//!
//! Login users: lookup by email / mobile / API key, password and API
//! credential updates. Hashing happens in the caller; only hashes arrive here.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use fh_core::User;

const USER_COLUMNS: &str = "email, full_name, mobile_no, password_hash, api_key, \
     api_secret_hash, enabled, created_at, updated_at";

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a user by login email.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        self.fetch_one_where("email = ?1", email).await
    }

    /// Gets a user by normalised mobile number.
    pub async fn get_by_mobile(&self, mobile_no: &str) -> DbResult<Option<User>> {
        self.fetch_one_where("mobile_no = ?1", mobile_no).await
    }

    /// Gets a user by API key.
    pub async fn get_by_api_key(&self, api_key: &str) -> DbResult<Option<User>> {
        self.fetch_one_where("api_key = ?1", api_key).await
    }

    /// Resolves a login identifier that may be an email or a mobile number.
    pub async fn find_by_login(&self, usr: &str) -> DbResult<Option<User>> {
        self.fetch_one_where("email = ?1 OR mobile_no = ?1", usr).await
    }

    async fn fetch_one_where(&self, predicate: &str, value: &str) -> DbResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE {predicate} LIMIT 1");

        let user = sqlx::query_as::<_, User>(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    /// Inserts a user (outside onboarding: seeding and tests).
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                email, full_name, mobile_no, password_hash,
                api_key, api_secret_hash, enabled, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            "#,
        )
        .bind(&user.email)
        .bind(&user.full_name)
        .bind(&user.mobile_no)
        .bind(&user.password_hash)
        .bind(&user.api_key)
        .bind(&user.api_secret_hash)
        .bind(user.enabled)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Replaces a user's password hash.
    pub async fn update_password(&self, email: &str, password_hash: &str) -> DbResult<()> {
        debug!(email = %email, "Updating password");

        let result = sqlx::query(
            "UPDATE users SET password_hash = ?2, updated_at = ?3 WHERE email = ?1",
        )
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", email));
        }

        Ok(())
    }

    /// Stores the API key and the hash of a freshly issued API secret.
    ///
    /// The previous secret hash is overwritten, so the old secret stops
    /// authenticating.
    pub async fn set_api_credentials(
        &self,
        email: &str,
        api_key: &str,
        api_secret_hash: &str,
    ) -> DbResult<()> {
        debug!(email = %email, "Rotating API secret");

        let result = sqlx::query(
            r#"
            UPDATE users SET
                api_key = ?2,
                api_secret_hash = ?3,
                updated_at = ?4
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .bind(api_key)
        .bind(api_secret_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("User", email));
        }

        Ok(())
    }

    /// Number of users (diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use crate::repository::customer::tests::sample_pair;
    use crate::{Database, DbConfig, DbError};

    #[tokio::test]
    async fn test_find_by_login_accepts_email_or_mobile() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (_, user) = sample_pair("254700000001", "jane@example.com");
        db.users().insert(&user).await.unwrap();

        let users = db.users();
        assert!(users.find_by_login("jane@example.com").await.unwrap().is_some());
        assert!(users.find_by_login("254700000001").await.unwrap().is_some());
        assert!(users.find_by_login("254799999999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_api_credentials_and_password() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let (_, user) = sample_pair("254700000001", "jane@example.com");
        let users = db.users();
        users.insert(&user).await.unwrap();

        users
            .set_api_credentials("jane@example.com", "key123", "secret-hash")
            .await
            .unwrap();
        let found = users.get_by_api_key("key123").await.unwrap().unwrap();
        assert_eq!(found.api_secret_hash.as_deref(), Some("secret-hash"));

        users.update_password("jane@example.com", "new-hash").await.unwrap();
        let found = users.get_by_email("jane@example.com").await.unwrap().unwrap();
        assert_eq!(found.password_hash, "new-hash");

        let err = users.update_password("ghost@example.com", "x").await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
