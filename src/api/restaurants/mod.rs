//! Restaurant API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/restaurants | GET | none |
//! | /api/restaurants/{id} | GET | none |
//! | /api/restaurants | POST | super_admin |
//! | /api/restaurants/{id} | DELETE | super_admin |

mod handler;

use axum::{routing::get, Router};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/restaurants", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id).delete(handler::delete))
}
