//! Half-order session model
//!
//! A session is a time-boxed offer to split a dish: opened when a customer
//! orders a half portion, closed by a matching join or by expiry. Sessions
//! are retained forever for audit; they transition out of `ACTIVE` exactly
//! once and never revert.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionStatus {
    Active,
    Matched,
    Expired,
}

/// Half-order session entity. Menu item name and table number are
/// denormalized so polling clients can render the offer without joins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HalfOrderSession {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub menu_item_id: RecordId,
    pub menu_item_name: String,
    #[serde(with = "serde_helpers::record_id")]
    pub table_id: RecordId,
    pub table_number: String,
    pub customer_name: String,
    pub customer_mobile: String,
    /// The originating order; exactly one per session
    #[serde(with = "serde_helpers::record_id")]
    pub order_id: RecordId,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub status: SessionStatus,
}

/// Join payload for `POST /api/orders/join-half`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JoinHalfOrder {
    #[serde(with = "serde_helpers::record_id")]
    pub session_id: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub table_id: RecordId,
    #[validate(length(min = 1, message = "table_number must not be empty"))]
    pub table_number: String,
    #[validate(length(min = 1, message = "customer_name must not be empty"))]
    pub customer_name: String,
    #[validate(length(min = 1, message = "customer_mobile must not be empty"))]
    pub customer_mobile: String,
}
