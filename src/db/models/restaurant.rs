//! Restaurant model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RestaurantKind {
    Restaurant,
    Bar,
}

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: RestaurantKind,
    pub created_at: DateTime<Utc>,
}

/// Create restaurant payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RestaurantCreate {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub address: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub kind: RestaurantKind,
}
