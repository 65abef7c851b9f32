//! Menu item API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/menu-items | POST | staff |
//! | /api/menu-items/restaurant/{restaurant_id} | GET | none |
//! | /api/menu-items/{id} | PATCH | staff |
//! | /api/menu-items/{id} | DELETE | staff |

mod handler;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu-items", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/restaurant/{restaurant_id}", get(handler::list_by_restaurant))
        .route("/{id}", patch(handler::update).delete(handler::delete))
}
