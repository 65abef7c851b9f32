//! Order service
//!
//! Creates orders and hands every half-portion line to the matching
//! engine. Prices are taken from the client as supplied; only the join
//! path re-prices against the menu.

use chrono::Utc;
use surrealdb::engine::local::Db;
use surrealdb::Surreal;

use crate::db::models::{Order, OrderCreate, OrderLine, OrderStatus, Portion};
use crate::db::repository::OrderRepository;
use crate::orders::matching::{MatchError, MatchResult, MatchingEngine};

#[derive(Clone)]
pub struct OrderService {
    orders: OrderRepository,
    engine: MatchingEngine,
}

impl OrderService {
    pub fn new(db: Surreal<Db>, engine: MatchingEngine) -> Self {
        Self {
            orders: OrderRepository::new(db),
            engine,
        }
    }

    /// Create an order. `total_amount` is the exact sum of the supplied
    /// line prices and `is_half_order` is derived from the portions; one
    /// matching session is opened per half line.
    pub async fn create_order(&self, input: OrderCreate) -> MatchResult<Order> {
        if input.items.is_empty() {
            return Err(MatchError::Validation(
                "order must contain at least one item".to_string(),
            ));
        }

        let now = Utc::now();
        let items: Vec<OrderLine> = input
            .items
            .into_iter()
            .map(|line| OrderLine {
                menu_item_id: line.menu_item_id,
                name: line.name,
                portion: line.portion,
                price: line.price,
                session_id: None,
            })
            .collect();

        let total_amount = items.iter().map(|l| l.price).sum();
        let is_half_order = items.iter().any(|l| l.portion == Portion::Half);

        let order = Order {
            id: None,
            restaurant_id: input.restaurant_id,
            table_id: input.table_id,
            table_number: input.table_number,
            customer_name: input.customer_name,
            customer_mobile: input.customer_mobile,
            items,
            total_amount,
            status: OrderStatus::Open,
            is_half_order,
            session_ids: Vec::new(),
            matched_order_id: None,
            matched_table_number: None,
            created_at: now,
            updated_at: now,
        };
        let order = self.orders.create(order).await?;

        if !is_half_order {
            return Ok(order);
        }

        for line in order.items.iter().filter(|l| l.portion == Portion::Half) {
            self.engine.open_session(&order, line).await?;
        }

        // Re-read so the returned order carries the stamped session ids
        let order_id = order
            .id
            .ok_or_else(|| MatchError::Validation("order came back without an id".to_string()))?;
        self.orders
            .find_by_id(&order_id)
            .await?
            .ok_or_else(|| MatchError::OrderNotFound(format!("Order {order_id}")))
    }
}
