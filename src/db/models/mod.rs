//! Database models
//!
//! Serde models for the SurrealDB tables plus their create/update payloads.
//! Record ids use UUIDv4 keys and are exposed to clients as opaque
//! `"table:key"` strings.

pub mod serde_helpers;

pub mod dining_table;
pub mod half_order_session;
pub mod menu_item;
pub mod order;
pub mod restaurant;
pub mod user;

pub use dining_table::{DiningTable, DiningTableCreate};
pub use half_order_session::{HalfOrderSession, JoinHalfOrder, SessionStatus};
pub use menu_item::{MenuItem, MenuItemCreate, MenuItemUpdate};
pub use order::{Order, OrderCreate, OrderLine, OrderLineCreate, OrderStatus, Portion};
pub use restaurant::{Restaurant, RestaurantCreate, RestaurantKind};
pub use user::{Role, User, UserCreate, UserLogin};
