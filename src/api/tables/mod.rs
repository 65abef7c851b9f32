//! Dining table API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/tables | POST | staff |
//! | /api/tables/restaurant/{restaurant_id} | GET | none |
//! | /api/tables/{id} | GET | none |

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/restaurant/{restaurant_id}", get(handler::list_by_restaurant))
        .route("/{id}", get(handler::get_by_id))
}
