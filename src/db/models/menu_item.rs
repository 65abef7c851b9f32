//! Menu item model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use validator::Validate;

use super::serde_helpers;

/// Menu item entity. A `half_price` of `None` makes the item ineligible
/// for half-order sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant_id: RecordId,
    pub name: String,
    pub category: String,
    pub full_price: f64,
    #[serde(default)]
    pub half_price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

fn default_true() -> bool {
    true
}

/// Create menu item payload
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MenuItemCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub restaurant_id: RecordId,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    pub category: String,
    #[validate(range(min = 0.0, message = "full_price must not be negative"))]
    pub full_price: f64,
    #[serde(default)]
    pub half_price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

/// Partial menu item update; only provided fields are patched.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub half_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_available: Option<bool>,
}

impl MenuItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.category.is_none()
            && self.full_price.is_none()
            && self.half_price.is_none()
            && self.description.is_none()
            && self.is_available.is_none()
    }
}
