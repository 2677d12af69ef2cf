//! # Sales Order Repository
//!
//! Sales order headers, their lines, and the naming series.
//!
//! ## Write Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create()                          replace_draft()                      │
//! │  ────────                          ───────────────                      │
//! │  BEGIN                             BEGIN                                │
//! │    naming_series += 1                UPDATE header WHERE status=draft  │
//! │    INSERT header (draft)             DELETE lines                       │
//! │    INSERT lines 1..n                 INSERT lines 1..n                  │
//! │  COMMIT                            COMMIT                               │
//! │                                                                         │
//! │  Lines arrive already priced (PricedLine); totals come from fh-core.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Naming Series
//! `SAL-ORD-2026-00001`, `SAL-ORD-2026-00002`, ... one counter per year.

use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use fh_core::{
    order_total, PricedLine, SalesOrder, SalesOrderItem, SalesOrderStatus, SALES_ORDER_PREFIX,
};

const ORDER_COLUMNS: &str = "name, customer, transaction_date, delivery_date, status, \
     grand_total_cents, created_at, updated_at";

/// One row of the order history join: an order header repeated once per
/// line. Line columns are `None` for an order without lines.
///
/// Dates are raw stored text so that history can render whatever is there.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderHistoryRow {
    pub sales_order_name: String,
    pub customer: String,
    pub transaction_date: String,
    pub delivery_date: Option<String>,
    pub status: SalesOrderStatus,
    pub grand_total_cents: i64,
    pub item_code: Option<String>,
    pub item_name: Option<String>,
    pub qty: Option<i64>,
    pub rate_cents: Option<i64>,
    pub amount_cents: Option<i64>,
    pub image: Option<String>,
}

/// Repository for sales order database operations.
#[derive(Debug, Clone)]
pub struct SalesOrderRepository {
    pool: SqlitePool,
}

impl SalesOrderRepository {
    /// Creates a new SalesOrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SalesOrderRepository { pool }
    }

    /// Gets an order header by name.
    pub async fn get(&self, name: &str) -> DbResult<Option<SalesOrder>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM sales_orders WHERE name = ?1");

        let order = sqlx::query_as::<_, SalesOrder>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Gets the lines of an order, by position.
    pub async fn get_items(&self, name: &str) -> DbResult<Vec<SalesOrderItem>> {
        let items = sqlx::query_as::<_, SalesOrderItem>(
            r#"
            SELECT id, parent, idx, item_code, item_name, qty, rate_cents, amount_cents
            FROM sales_order_items
            WHERE parent = ?1
            ORDER BY idx
            "#,
        )
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Inserts a new draft order with a generated name.
    pub async fn create(
        &self,
        customer: &str,
        delivery_date: Option<NaiveDate>,
        lines: &[PricedLine],
    ) -> DbResult<SalesOrder> {
        let now = Utc::now();
        let total = order_total(lines);

        let mut tx = self.pool.begin().await?;

        let name = next_name(&mut tx, now.year()).await?;

        let order = SalesOrder {
            name,
            customer: customer.to_string(),
            transaction_date: now.date_naive(),
            delivery_date,
            status: SalesOrderStatus::Draft,
            grand_total_cents: total.cents(),
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO sales_orders (
                name, customer, transaction_date, delivery_date, status,
                grand_total_cents, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&order.name)
        .bind(&order.customer)
        .bind(order.transaction_date)
        .bind(order.delivery_date)
        .bind(order.status)
        .bind(order.grand_total_cents)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        insert_lines(&mut tx, &order.name, lines).await?;

        tx.commit().await?;

        info!(
            name = %order.name,
            customer = %order.customer,
            lines = lines.len(),
            total = %total,
            "Sales order created"
        );
        Ok(order)
    }

    /// Replaces the lines and delivery date of a draft order.
    ///
    /// Fails with `NotFound` when the order is missing or no longer a draft.
    pub async fn replace_draft(
        &self,
        name: &str,
        delivery_date: Option<NaiveDate>,
        lines: &[PricedLine],
    ) -> DbResult<SalesOrder> {
        let total = order_total(lines);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE sales_orders SET
                delivery_date = ?2,
                grand_total_cents = ?3,
                updated_at = ?4
            WHERE name = ?1 AND status = 'draft'
            "#,
        )
        .bind(name)
        .bind(delivery_date)
        .bind(total.cents())
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sales order (draft)", name));
        }

        sqlx::query("DELETE FROM sales_order_items WHERE parent = ?1")
            .bind(name)
            .execute(&mut *tx)
            .await?;

        insert_lines(&mut tx, name, lines).await?;

        let sql = format!("SELECT {ORDER_COLUMNS} FROM sales_orders WHERE name = ?1");
        let order = sqlx::query_as::<_, SalesOrder>(&sql)
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(name = %name, lines = lines.len(), total = %total, "Sales order replaced");
        Ok(order)
    }

    /// Moves a draft order to submitted.
    pub async fn submit(&self, name: &str) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE sales_orders SET
                status = 'submitted',
                updated_at = ?2
            WHERE name = ?1 AND status = 'draft'
            "#,
        )
        .bind(name)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Sales order (draft)", name));
        }

        info!(name = %name, "Sales order submitted");
        Ok(())
    }

    /// All orders of a customer with their lines and item images, in one
    /// query. Newest order first, lines by position.
    pub async fn history_for_customer(&self, customer: &str) -> DbResult<Vec<OrderHistoryRow>> {
        let rows = sqlx::query_as::<_, OrderHistoryRow>(
            r#"
            SELECT
                so.name AS sales_order_name,
                so.customer,
                so.transaction_date,
                so.delivery_date,
                so.status,
                so.grand_total_cents,
                soi.item_code,
                soi.item_name,
                soi.qty,
                soi.rate_cents,
                soi.amount_cents,
                i.image
            FROM sales_orders so
            LEFT JOIN sales_order_items soi ON soi.parent = so.name
            LEFT JOIN items i ON i.item_code = soi.item_code
            WHERE so.customer = ?1
            ORDER BY so.created_at DESC, so.name DESC, soi.idx ASC
            "#,
        )
        .bind(customer)
        .fetch_all(&self.pool)
        .await?;

        debug!(customer = %customer, rows = rows.len(), "Order history fetched");
        Ok(rows)
    }

    /// Number of orders of a customer.
    pub async fn count_for_customer(&self, customer: &str) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales_orders WHERE customer = ?1")
            .bind(customer)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

/// Advances the yearly naming series and returns the next order name.
async fn next_name(conn: &mut SqliteConnection, year: i32) -> DbResult<String> {
    let prefix = format!("{SALES_ORDER_PREFIX}-{year}-");

    let current: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO naming_series (prefix, current) VALUES (?1, 1)
        ON CONFLICT(prefix) DO UPDATE SET current = current + 1
        RETURNING current
        "#,
    )
    .bind(&prefix)
    .fetch_one(&mut *conn)
    .await?;

    Ok(format!("{prefix}{current:05}"))
}

async fn insert_lines(
    conn: &mut SqliteConnection,
    parent: &str,
    lines: &[PricedLine],
) -> DbResult<()> {
    for (position, line) in lines.iter().enumerate() {
        let item = SalesOrderItem {
            id: Uuid::new_v4().to_string(),
            parent: parent.to_string(),
            idx: position as i64 + 1,
            item_code: line.item_code.clone(),
            item_name: line.item_name.clone(),
            qty: line.qty,
            rate_cents: line.rate.cents(),
            amount_cents: line.amount().cents(),
        };

        sqlx::query(
            r#"
            INSERT INTO sales_order_items (
                id, parent, idx, item_code, item_name, qty, rate_cents, amount_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&item.id)
        .bind(&item.parent)
        .bind(item.idx)
        .bind(&item.item_code)
        .bind(&item.item_name)
        .bind(item.qty)
        .bind(item.rate_cents)
        .bind(item.amount_cents)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}
