//! Order API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/orders | POST | none |
//! | /api/orders/join-half | POST | none |
//! | /api/orders/restaurant/{restaurant_id} | GET | none |
//! | /api/orders/customer/{mobile}/{restaurant_id} | GET | none |
//! | /api/orders/{id} | GET | none |
//! | /api/orders/{id}/status | PATCH | staff |

mod handler;

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", post(handler::create))
        .route("/join-half", post(handler::join_half))
        .route("/restaurant/{restaurant_id}", get(handler::list_by_restaurant))
        .route(
            "/customer/{mobile}/{restaurant_id}",
            get(handler::list_by_customer),
        )
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", patch(handler::update_status))
}
