//! # Order Handlers
//!
//! Draft orders for the authenticated customer.
//!
//! ## Create / Replace
//! ```text
//! POST /api/orders
//!   │
//!   ├── Identity (token) ── logged_in_user must match ──► 403
//!   ├── customer by caller email ──────────── none ────► 404
//!   ├── lines: 1..=100, qty 1..=999 ───────────────────► 400
//!   ├── price every line first ("Standard Selling")
//!   │     ├── unknown item ───────────────────────────► 404
//!   │     └── no rate ────────────────────────────────► 400 (nothing written)
//!   │
//!   ├── sales_order_name? ── yes ──► own draft? replace lines + date
//!   └──────────────────────  no ───► insert new draft
//! ```
//!
//! ## History
//! One joined query, grouped here into one entry per order. Rows arrive
//! ordered by order then line, so grouping is a single pass.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use fh_core::validation::{
    parse_delivery_date, require, validate_order_lines, validate_quantity,
};
use fh_core::{
    CoreError, Customer, Money, PricedLine, SalesOrder, SalesOrderStatus,
    STANDARD_SELLING_PRICE_LIST,
};
use fh_db::OrderHistoryRow;

use crate::auth::Identity;
use crate::error::ApiResult;
use crate::handlers::StatusMessage;
use crate::AppState;

// =============================================================================
// Requests
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct OrderLineRequest {
    pub item_code: Option<String>,
    pub qty: i64,
}

#[derive(Debug, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub sales_order_items: Vec<OrderLineRequest>,
    pub delivery_date: Option<String>,
    pub sales_order_name: Option<String>,
    pub logged_in_user: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OrdersQuery {
    pub logged_in_user: Option<String>,
}

// =============================================================================
// Responses
// =============================================================================

#[derive(Debug, Serialize)]
pub struct OrderSummary {
    pub name: String,
    pub customer: String,
    pub transaction_date: String,
    pub delivery_date: String,
    pub status: SalesOrderStatus,
    pub grand_total: f64,
}

impl From<SalesOrder> for OrderSummary {
    fn from(order: SalesOrder) -> Self {
        OrderSummary {
            grand_total: order.grand_total().to_major_units(),
            name: order.name,
            customer: order.customer,
            transaction_date: order.transaction_date.format("%d-%m-%Y").to_string(),
            delivery_date: order
                .delivery_date
                .map(|d| d.format("%d-%m-%Y").to_string())
                .unwrap_or_default(),
            status: order.status,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub status: u16,
    pub message: String,
    pub sales_order: OrderSummary,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct OrderLineView {
    pub item_code: String,
    pub item_name: String,
    pub qty: i64,
    pub rate: f64,
    pub amount: f64,
    pub image: String,
}

#[derive(Debug, Serialize)]
pub struct OrderView {
    pub sales_order_name: String,
    pub customer: String,
    pub transaction_date: String,
    pub delivery_date: String,
    pub status: SalesOrderStatus,
    pub grand_total: f64,
    pub items: Vec<OrderLineView>,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub status: u16,
    pub sales_orders: Vec<OrderView>,
}

// =============================================================================
// Helpers
// =============================================================================

/// Renders a stored `YYYY-MM-DD` date as `DD-MM-YYYY`. Absent → `""`;
/// anything unparsable is returned unchanged.
pub fn display_date(stored: Option<&str>) -> String {
    match stored {
        None => String::new(),
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(|d| d.format("%d-%m-%Y").to_string())
            .unwrap_or_else(|_| raw.to_string()),
    }
}

/// Groups joined history rows into one view per order, keeping row order.
pub fn group_history(rows: Vec<OrderHistoryRow>) -> Vec<OrderView> {
    let mut orders: Vec<OrderView> = Vec::new();

    for row in rows {
        let starts_new = orders
            .last()
            .map(|o| o.sales_order_name != row.sales_order_name)
            .unwrap_or(true);

        if starts_new {
            orders.push(OrderView {
                sales_order_name: row.sales_order_name.clone(),
                customer: row.customer.clone(),
                transaction_date: display_date(Some(&row.transaction_date)),
                delivery_date: display_date(row.delivery_date.as_deref()),
                status: row.status,
                grand_total: Money::from_cents(row.grand_total_cents).to_major_units(),
                items: Vec::new(),
            });
        }

        // LEFT JOIN: an order without lines yields one row with no item
        let Some(item_code) = row.item_code else {
            continue;
        };

        if let Some(order) = orders.last_mut() {
            order.items.push(OrderLineView {
                item_code,
                item_name: row.item_name.unwrap_or_default(),
                qty: row.qty.unwrap_or_default(),
                rate: Money::from_cents(row.rate_cents.unwrap_or_default()).to_major_units(),
                amount: Money::from_cents(row.amount_cents.unwrap_or_default()).to_major_units(),
                image: row.image.unwrap_or_default(),
            });
        }
    }

    orders
}

async fn linked_customer(state: &AppState, identity: &Identity) -> ApiResult<Customer> {
    let customer = state
        .db
        .customers()
        .get_by_email(&identity.email)
        .await?
        .ok_or_else(|| CoreError::NotLinkedToCustomer(identity.email.clone()))?;
    Ok(customer)
}

/// Loads an order the customer owns and that is still a draft.
async fn owned_draft(state: &AppState, customer: &Customer, name: &str) -> ApiResult<SalesOrder> {
    let order = state
        .db
        .sales_orders()
        .get(name)
        .await?
        .filter(|o| o.customer == customer.name)
        .ok_or_else(|| CoreError::SalesOrderNotFound(name.to_string()))?;

    if !order.is_draft() {
        return Err(CoreError::InvalidOrderStatus {
            name: order.name,
            status: order.status.to_string(),
        }
        .into());
    }

    Ok(order)
}

/// Prices every requested line. Fails on the first unknown or unpriced item.
async fn price_lines(state: &AppState, lines: &[OrderLineRequest]) -> ApiResult<Vec<PricedLine>> {
    validate_order_lines(lines.len())?;

    let mut priced = Vec::with_capacity(lines.len());
    for line in lines {
        let item_code = require("item_code", line.item_code.as_deref())?;
        validate_quantity(line.qty)?;

        let item = state
            .db
            .items()
            .get(item_code)
            .await?
            .filter(|i| !i.disabled)
            .ok_or_else(|| CoreError::ItemNotFound(item_code.to_string()))?;

        let rate = state
            .db
            .items()
            .selling_rate(&item.item_code, STANDARD_SELLING_PRICE_LIST)
            .await?
            .ok_or_else(|| CoreError::PriceNotFound {
                item_code: item.item_code.clone(),
                price_list: STANDARD_SELLING_PRICE_LIST.to_string(),
            })?;

        priced.push(PricedLine {
            item_code: item.item_code,
            item_name: item.item_name,
            qty: line.qty,
            rate: Money::from_cents(rate),
        });
    }

    Ok(priced)
}

// =============================================================================
// Handlers
// =============================================================================

/// `POST /api/orders`
pub async fn create_or_update(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> ApiResult<Json<OrderResponse>> {
    let Json(body) = payload?;
    identity.ensure_is(body.logged_in_user.as_deref())?;

    let customer = linked_customer(&state, &identity).await?;
    let lines = price_lines(&state, &body.sales_order_items).await?;

    let delivery_date = match body.delivery_date.as_deref().map(str::trim) {
        Some(raw) if !raw.is_empty() => Some(parse_delivery_date(raw)?),
        _ => None,
    };

    let existing = body
        .sales_order_name
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());

    let (order, message) = match existing {
        Some(name) => {
            owned_draft(&state, &customer, name).await?;
            let order = state
                .db
                .sales_orders()
                .replace_draft(name, delivery_date, &lines)
                .await?;
            (order, "Sales order updated successfully.")
        }
        None => {
            let order = state
                .db
                .sales_orders()
                .create(&customer.name, delivery_date, &lines)
                .await?;
            (order, "Sales order created successfully.")
        }
    };

    info!(
        order = %order.name,
        customer = %customer.name,
        lines = lines.len(),
        total = %order.grand_total(),
        "Sales order saved"
    );

    Ok(Json(OrderResponse {
        status: 200,
        message: message.to_string(),
        sales_order: order.into(),
    }))
}

/// `POST /api/orders/{name}/submit`
pub async fn submit(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    Path(name): Path<String>,
) -> ApiResult<Json<StatusMessage>> {
    let customer = linked_customer(&state, &identity).await?;
    owned_draft(&state, &customer, &name).await?;

    state.db.sales_orders().submit(&name).await?;

    Ok(Json(StatusMessage::ok(format!(
        "Sales order {} submitted successfully.",
        name
    ))))
}

/// `GET /api/orders`
pub async fn list(
    State(state): State<Arc<AppState>>,
    identity: Identity,
    query: Result<Query<OrdersQuery>, QueryRejection>,
) -> ApiResult<Json<OrdersResponse>> {
    let Query(query) = query?;
    identity.ensure_is(query.logged_in_user.as_deref())?;

    let customer = linked_customer(&state, &identity).await?;
    let rows = state
        .db
        .sales_orders()
        .history_for_customer(&customer.name)
        .await?;

    Ok(Json(OrdersResponse {
        status: 200,
        sales_orders: group_history(rows),
    }))
}
