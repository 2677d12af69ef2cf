//! # Item Repository
//!
//! Catalog items and their price-list rates.
//!
//! ## Catalog Query
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  items (disabled = 0)                                                   │
//! │    │                                                                    │
//! │    │  correlated subquery: first selling row in item_prices            │
//! │    ▼                                                                    │
//! │  CatalogEntry { item_code, ..., selling_rate_cents: Option<i64> }      │
//! │                                                                         │
//! │  No selling row → None (rendered as 0.0 by the API)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use fh_core::Item;

/// A catalog row: an enabled item plus its selling rate, if any.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CatalogEntry {
    pub item_code: String,
    pub item_name: String,
    pub description: Option<String>,
    pub item_group: Option<String>,
    pub image: Option<String>,
    pub selling_rate_cents: Option<i64>,
}

/// Repository for items and item prices.
#[derive(Debug, Clone)]
pub struct ItemRepository {
    pool: SqlitePool,
}

impl ItemRepository {
    /// Creates a new ItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ItemRepository { pool }
    }

    /// Lists every enabled item with the rate of a selling price row.
    ///
    /// Ordered by `item_code`. When an item has several selling rows the
    /// one from the alphabetically first price list wins.
    pub async fn list_catalog(&self) -> DbResult<Vec<CatalogEntry>> {
        let entries = sqlx::query_as::<_, CatalogEntry>(
            r#"
            SELECT
                i.item_code,
                i.item_name,
                i.description,
                i.item_group,
                i.image,
                (
                    SELECT p.rate_cents
                    FROM item_prices p
                    WHERE p.item_code = i.item_code AND p.selling = 1
                    ORDER BY p.price_list
                    LIMIT 1
                ) AS selling_rate_cents
            FROM items i
            WHERE i.disabled = 0
            ORDER BY i.item_code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = entries.len(), "Catalog listed");
        Ok(entries)
    }

    /// Gets an item by code, enabled or not.
    pub async fn get(&self, item_code: &str) -> DbResult<Option<Item>> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT item_code, item_name, description, item_group, image, disabled, created_at
            FROM items
            WHERE item_code = ?1
            "#,
        )
        .bind(item_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Gets the rate of an item on a selling price list.
    pub async fn selling_rate(&self, item_code: &str, price_list: &str) -> DbResult<Option<i64>> {
        let rate: Option<i64> = sqlx::query_scalar(
            r#"
            SELECT rate_cents
            FROM item_prices
            WHERE item_code = ?1 AND price_list = ?2 AND selling = 1
            "#,
        )
        .bind(item_code)
        .bind(price_list)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rate)
    }

    /// Inserts or replaces an item.
    pub async fn upsert(&self, item: &Item) -> DbResult<()> {
        debug!(item_code = %item.item_code, "Upserting item");

        sqlx::query(
            r#"
            INSERT INTO items (item_code, item_name, description, item_group, image, disabled, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ON CONFLICT(item_code) DO UPDATE SET
                item_name = excluded.item_name,
                description = excluded.description,
                item_group = excluded.item_group,
                image = excluded.image,
                disabled = excluded.disabled
            "#,
        )
        .bind(&item.item_code)
        .bind(&item.item_name)
        .bind(&item.description)
        .bind(&item.item_group)
        .bind(&item.image)
        .bind(item.disabled)
        .bind(item.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Number of items, enabled or not.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Sets the selling rate of an item on a price list.
    pub async fn set_selling_rate(
        &self,
        item_code: &str,
        price_list: &str,
        rate_cents: i64,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            INSERT INTO item_prices (item_code, price_list, selling, rate_cents)
            VALUES (?1, ?2, 1, ?3)
            ON CONFLICT(item_code, price_list) DO UPDATE SET
                selling = 1,
                rate_cents = excluded.rate_cents
            "#,
        )
        .bind(item_code)
        .bind(price_list)
        .bind(rate_cents)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

/// Builds an enabled item with no optional fields (seeding and tests).
pub fn new_item(item_code: &str, item_name: &str) -> Item {
    Item {
        item_code: item_code.to_string(),
        item_name: item_name.to_string(),
        description: None,
        item_group: None,
        image: None,
        disabled: false,
        created_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use fh_core::STANDARD_SELLING_PRICE_LIST;

    #[tokio::test]
    async fn test_catalog_hides_disabled_and_defaults_price() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let items = db.items();

        let mut milk = new_item("MILK-500", "Milk 500ml");
        milk.item_group = Some("Dairy".to_string());
        items.upsert(&milk).await.unwrap();
        items
            .set_selling_rate("MILK-500", STANDARD_SELLING_PRICE_LIST, 6500)
            .await
            .unwrap();

        items.upsert(&new_item("BREAD-400", "Bread 400g")).await.unwrap();

        let mut old = new_item("OLD-1", "Discontinued");
        old.disabled = true;
        items.upsert(&old).await.unwrap();

        let catalog = items.list_catalog().await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog[0].item_code, "BREAD-400");
        assert_eq!(catalog[0].selling_rate_cents, None);
        assert_eq!(catalog[1].item_code, "MILK-500");
        assert_eq!(catalog[1].selling_rate_cents, Some(6500));
        assert_eq!(catalog[1].item_group.as_deref(), Some("Dairy"));
    }

    #[tokio::test]
    async fn test_selling_rate_lookup() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let items = db.items();

        items.upsert(&new_item("EGGS-12", "Eggs (12)")).await.unwrap();
        assert_eq!(
            items
                .selling_rate("EGGS-12", STANDARD_SELLING_PRICE_LIST)
                .await
                .unwrap(),
            None
        );

        items
            .set_selling_rate("EGGS-12", STANDARD_SELLING_PRICE_LIST, 42000)
            .await
            .unwrap();
        items
            .set_selling_rate("EGGS-12", STANDARD_SELLING_PRICE_LIST, 43000)
            .await
            .unwrap();

        assert_eq!(
            items
                .selling_rate("EGGS-12", STANDARD_SELLING_PRICE_LIST)
                .await
                .unwrap(),
            Some(43000)
        );
        assert!(items.get("EGGS-12").await.unwrap().is_some());
        assert!(items.get("NOPE").await.unwrap().is_none());
    }
}
