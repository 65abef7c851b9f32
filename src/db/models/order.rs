//! Order model
//!
//! Orders are append-only from the customer's point of view: staff and the
//! matching engine mutate `status` and the matched-pair back-links, nothing
//! is ever deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Order lifecycle. `OPEN` orders holding a half line wait for a match;
/// staff drive `PREPARING`/`SERVED`/`CANCELLED`; the matching engine owns
/// `MATCHED` and `EXPIRED`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Open,
    Matched,
    Preparing,
    Served,
    Expired,
    Cancelled,
}

/// Which price column of the menu item applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Portion {
    Full,
    Half,
}

/// A single ordered line. Prices are client-supplied at creation; only a
/// half-order join re-prices from the menu.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item_id: RecordId,
    pub name: String,
    pub portion: Portion,
    pub price: f64,
    /// Set on the joining order's line to the session it joined
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub session_id: Option<RecordId>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub table_id: RecordId,
    pub table_number: String,
    pub customer_name: String,
    pub customer_mobile: String,
    pub items: Vec<OrderLine>,
    /// Sum of line prices at creation; never recomputed
    pub total_amount: f64,
    pub status: OrderStatus,
    pub is_half_order: bool,
    /// Half-order sessions opened from this order, one per half line
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub session_ids: Vec<RecordId>,
    /// Reciprocal link to the paired order once matched
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub matched_order_id: Option<RecordId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_table_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Line item in a create-order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item_id: RecordId,
    pub name: String,
    pub portion: Portion,
    pub price: f64,
}

/// Create order payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct OrderCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub table_id: RecordId,
    #[validate(length(min = 1, message = "table_number must not be empty"))]
    pub table_number: String,
    #[validate(length(min = 1, message = "customer_name must not be empty"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "customer_mobile must not be empty"))]
    pub customer_mobile: String,
    #[validate(length(min = 1, message = "order must contain at least one item"))]
    pub items: Vec<OrderLineCreate>,
}
