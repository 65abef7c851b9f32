//! HTTP API modules
//!
//! One module per resource, each exposing a `router()` nested under
//! `/api/...`. Customer-facing routes (menu browsing, ordering, joining a
//! half order) are public; staff routes require a bearer token via the
//! [`CurrentUser`](crate::auth::CurrentUser) extractor.

pub mod analytics;
pub mod auth;
pub mod half_order_sessions;
pub mod health;
pub mod menu_items;
pub mod orders;
pub mod restaurants;
pub mod tables;
