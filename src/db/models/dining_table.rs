//! Dining table model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Dining table entity. `qr_url` is the customer-facing menu link encoded
/// into the printed QR code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant_id: RecordId,
    pub table_number: String,
    pub qr_url: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create dining table payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct DiningTableCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant_id: RecordId,
    #[validate(length(min = 1, message = "table_number must not be empty"))]
    pub table_number: String,
}
