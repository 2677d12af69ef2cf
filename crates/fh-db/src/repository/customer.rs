//! # Customer Repository
//!
//! Customer lookups and the onboarding write.
//!
//! ## Onboarding Transaction
//! ```text
//! BEGIN
//!   INSERT INTO customers (...)   ← UNIQUE(mobile_no), UNIQUE(email_id)
//!   INSERT INTO users (...)       ← PK(email), UNIQUE(mobile_no)
//! COMMIT
//!
//! Either insert failing rolls back both: never a customer without a user.
//! ```

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;
use fh_core::{Customer, User};

/// Repository for customer database operations.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// True when a customer already uses this mobile number or email.
    pub async fn exists_by_mobile_or_email(&self, mobile_no: &str, email: &str) -> DbResult<bool> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM customers WHERE mobile_no = ?1 OR email_id = ?2",
        )
        .bind(mobile_no)
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(count > 0)
    }

    /// Gets the customer linked to a user email.
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            SELECT name, customer_name, first_name, middle_name, last_name,
                   mobile_no, email_id, created_at
            FROM customers
            WHERE email_id = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    /// Creates a customer and its login user in one transaction.
    pub async fn create_with_user(&self, customer: &Customer, user: &User) -> DbResult<()> {
        debug!(customer = %customer.name, email = %user.email, "Creating customer and user");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO customers (
                name, customer_name, first_name, middle_name, last_name,
                mobile_no, email_id, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&customer.name)
        .bind(&customer.customer_name)
        .bind(&customer.first_name)
        .bind(&customer.middle_name)
        .bind(&customer.last_name)
        .bind(&customer.mobile_no)
        .bind(&customer.email_id)
        .bind(customer.created_at)
        .execute(&mut *tx)
        .await?;

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
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(customer = %customer.name, "Customer onboarded");
        Ok(())
    }

    /// Number of customers (diagnostics and tests).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
