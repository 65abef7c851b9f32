//! Analytics API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/analytics/restaurant/{restaurant_id} | GET | staff |

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/analytics", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/restaurant/{restaurant_id}", get(handler::restaurant_summary))
}
