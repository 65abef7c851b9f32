//! QRDine Server - multi-tenant QR table-ordering backend
//!
//! Customers scan a per-table QR code, browse the menu and place orders.
//! Staff manage menus, tables and order status; a super-admin manages
//! restaurants. The one genuinely stateful subsystem is half-order
//! matching: ordering a half portion opens a time-boxed session that a
//! diner at another table can join, pairing the two orders.
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # Config, server state, HTTP bootstrap
//! ├── auth/          # JWT tokens, password hashing, extractors
//! ├── api/           # HTTP routes and handlers (one module per resource)
//! ├── db/            # Embedded SurrealDB, models, repositories
//! ├── orders/        # Order service + half-order matching engine
//! └── utils/         # Error types, logging
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod orders;
pub mod utils;

// Re-export common types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use db::DbService;
pub use orders::{MatchError, MatchingEngine, OrderService};
pub use utils::{AppError, AppResponse, AppResult};

// Re-export logger functions
pub use utils::logger::init_logger;
