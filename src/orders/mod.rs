//! Order domain: order creation and half-order matching.

pub mod matching;
pub mod service;

pub use matching::{MatchError, MatchingEngine};
pub use service::OrderService;
