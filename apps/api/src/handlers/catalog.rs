//! Product catalog.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use fh_core::Money;
use fh_db::CatalogEntry;

use crate::error::ApiResult;
use crate::AppState;

/// A catalog entry as the storefront sees it.
#[derive(Debug, Serialize)]
pub struct ProductView {
    pub product_id: String,
    pub product_name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub image: Option<String>,
    /// Major units; `0.0` when the item has no selling price.
    pub selling_price: f64,
}

impl From<CatalogEntry> for ProductView {
    fn from(entry: CatalogEntry) -> Self {
        ProductView {
            product_id: entry.item_code,
            product_name: entry.item_name,
            description: entry.description,
            category: entry.item_group,
            image: entry.image,
            selling_price: entry
                .selling_rate_cents
                .map(|cents| Money::from_cents(cents).to_major_units())
                .unwrap_or(0.0),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProductsResponse {
    pub status: u16,
    pub products: Vec<ProductView>,
}

/// `GET /api/products`
pub async fn list_products(State(state): State<Arc<AppState>>) -> ApiResult<Json<ProductsResponse>> {
    let products = state
        .db
        .items()
        .list_catalog()
        .await?
        .into_iter()
        .map(ProductView::from)
        .collect();

    Ok(Json(ProductsResponse {
        status: 200,
        products,
    }))
}
