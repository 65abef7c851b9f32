//! Half-order session API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/half-order-sessions/restaurant/{restaurant_id} | GET | none |
//!
//! Customers poll this to see which tables are offering a split; the
//! read sweeps stale sessions first, so clients never see an expired
//! offer.

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/half-order-sessions", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route(
        "/restaurant/{restaurant_id}",
        get(handler::list_active_by_restaurant),
    )
}
