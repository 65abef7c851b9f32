//! Half-order matching lifecycle tests
//!
//! Runs the full engine against the in-memory database: opening sessions,
//! joining across tables, re-pricing, expiry and the concurrent-join race.

use chrono::Duration;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use qrdine_server::db::models::{
    DiningTable, DiningTableCreate, MenuItem, MenuItemCreate, MenuItemUpdate, OrderCreate,
    OrderLineCreate, OrderStatus, Portion, RestaurantCreate, RestaurantKind, SessionStatus,
    JoinHalfOrder,
};
use qrdine_server::db::repository::{
    DiningTableRepository, MenuItemRepository, OrderRepository, RestaurantRepository,
    SessionRepository,
};
use qrdine_server::db::DbService;
use qrdine_server::orders::matching::MatchError;
use qrdine_server::orders::{MatchingEngine, OrderService};

struct TestEnv {
    db: Surreal<Db>,
    restaurant_id: RecordId,
    table_a: DiningTable,
    table_b: DiningTable,
    table_c: DiningTable,
    /// Has a half price
    dal: MenuItem,
    /// No half price
    biryani: MenuItem,
}

impl TestEnv {
    async fn new() -> Self {
        let db = DbService::memory().await.unwrap().db;

        let restaurant = RestaurantRepository::new(db.clone())
            .create(RestaurantCreate {
                name: "Spice Route".to_string(),
                address: "12 MG Road".to_string(),
                phone: "+91-80-1234".to_string(),
                kind: RestaurantKind::Restaurant,
            })
            .await
            .unwrap();
        let restaurant_id = restaurant.id.unwrap();

        let tables = DiningTableRepository::new(db.clone());
        let make_table = |n: &str| {
            let rid = restaurant_id.clone();
            let data = DiningTableCreate {
                restaurant_id: rid.clone(),
                table_number: n.to_string(),
            };
            let tables = tables.clone();
            async move {
                tables
                    .create(data, |tid| format!("http://localhost:3000/menu/{rid}/{tid}"))
                    .await
                    .unwrap()
            }
        };
        let table_a = make_table("A1").await;
        let table_b = make_table("B2").await;
        let table_c = make_table("C3").await;

        let menu = MenuItemRepository::new(db.clone());
        let dal = menu
            .create(MenuItemCreate {
                restaurant_id: restaurant_id.clone(),
                name: "Dal Makhani".to_string(),
                category: "Mains".to_string(),
                full_price: 260.0,
                half_price: Some(150.0),
                description: None,
                is_available: true,
            })
            .await
            .unwrap();
        let biryani = menu
            .create(MenuItemCreate {
                restaurant_id: restaurant_id.clone(),
                name: "Hyderabadi Biryani".to_string(),
                category: "Mains".to_string(),
                full_price: 320.0,
                half_price: None,
                description: None,
                is_available: true,
            })
            .await
            .unwrap();

        Self {
            db,
            restaurant_id,
            table_a,
            table_b,
            table_c,
            dal,
            biryani,
        }
    }

    fn engine(&self, window: Duration) -> MatchingEngine {
        MatchingEngine::new(self.db.clone(), window)
    }

    fn service(&self, window: Duration) -> OrderService {
        OrderService::new(self.db.clone(), self.engine(window))
    }

    fn half_line(&self, item: &MenuItem, price: f64) -> OrderLineCreate {
        OrderLineCreate {
            menu_item_id: item.id.clone().unwrap(),
            name: item.name.clone(),
            portion: Portion::Half,
            price,
        }
    }

    fn full_line(&self, item: &MenuItem) -> OrderLineCreate {
        OrderLineCreate {
            menu_item_id: item.id.clone().unwrap(),
            name: item.name.clone(),
            portion: Portion::Full,
            price: item.full_price,
        }
    }

    fn order_at(
        &self,
        table: &DiningTable,
        customer: &str,
        mobile: &str,
        items: Vec<OrderLineCreate>,
    ) -> OrderCreate {
        OrderCreate {
            restaurant_id: self.restaurant_id.clone(),
            table_id: table.id.clone().unwrap(),
            table_number: table.table_number.clone(),
            customer_name: customer.to_string(),
            customer_mobile: mobile.to_string(),
            items,
        }
    }

    fn join_from(&self, session_id: &RecordId, table: &DiningTable, customer: &str) -> JoinHalfOrder {
        JoinHalfOrder {
            session_id: session_id.clone(),
            table_id: table.id.clone().unwrap(),
            table_number: table.table_number.clone(),
            customer_name: customer.to_string(),
            customer_mobile: "9000000000".to_string(),
        }
    }
}

fn window() -> Duration {
    Duration::minutes(30)
}

#[tokio::test]
async fn full_order_opens_no_session() {
    let env = TestEnv::new().await;
    let svc = env.service(window());

    let order = svc
        .create_order(env.order_at(
            &env.table_a,
            "Asha",
            "9812345678",
            vec![env.full_line(&env.biryani)],
        ))
        .await
        .unwrap();

    assert!(!order.is_half_order);
    assert_eq!(order.status, OrderStatus::Open);
    assert!(order.session_ids.is_empty());
    assert_eq!(order.total_amount, 320.0);

    let sessions = SessionRepository::new(env.db.clone());
    assert_eq!(sessions.count_active(&env.restaurant_id).await.unwrap(), 0);
}

#[tokio::test]
async fn half_order_opens_one_session_per_half_line() {
    let env = TestEnv::new().await;
    let svc = env.service(window());

    let order = svc
        .create_order(env.order_at(
            &env.table_a,
            "Asha",
            "9812345678",
            vec![
                env.half_line(&env.dal, 150.0),
                env.half_line(&env.dal, 150.0),
                env.full_line(&env.biryani),
            ],
        ))
        .await
        .unwrap();

    assert!(order.is_half_order);
    assert_eq!(order.session_ids.len(), 2);
    assert_eq!(order.total_amount, 620.0);

    let sessions = SessionRepository::new(env.db.clone());
    let active = sessions.list_active(&env.restaurant_id).await.unwrap();
    assert_eq!(active.len(), 2);
    for session in &active {
        assert_eq!(session.status, SessionStatus::Active);
        assert_eq!(session.order_id, *order.id.as_ref().unwrap());
        assert_eq!(session.table_number, "A1");
        assert_eq!(session.menu_item_name, "Dal Makhani");
        assert_eq!(session.expires_at - session.created_at, window());
    }
}

#[tokio::test]
async fn join_matches_both_orders_and_the_session() {
    let env = TestEnv::new().await;
    let svc = env.service(window());
    let engine = env.engine(window());

    let asha = svc
        .create_order(env.order_at(
            &env.table_a,
            "Asha",
            "9812345678",
            vec![env.half_line(&env.dal, 150.0)],
        ))
        .await
        .unwrap();
    let session_id = asha.session_ids[0].clone();

    let rahul = engine
        .join_session(env.join_from(&session_id, &env.table_b, "Rahul"))
        .await
        .unwrap();

    assert_eq!(rahul.status, OrderStatus::Matched);
    assert!(rahul.is_half_order);
    assert_eq!(rahul.total_amount, 150.0);
    assert_eq!(rahul.matched_order_id, asha.id);
    assert_eq!(rahul.matched_table_number.as_deref(), Some("A1"));
    assert_eq!(rahul.items.len(), 1);
    assert_eq!(rahul.items[0].session_id, Some(session_id.clone()));

    let orders = OrderRepository::new(env.db.clone());
    let asha = orders
        .find_by_id(asha.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asha.status, OrderStatus::Matched);
    assert_eq!(asha.matched_order_id, rahul.id);
    assert_eq!(asha.matched_table_number.as_deref(), Some("B2"));

    let session = SessionRepository::new(env.db.clone())
        .find_by_id(&session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.status, SessionStatus::Matched);
}

#[tokio::test]
async fn join_is_priced_at_the_current_half_price() {
    let env = TestEnv::new().await;
    let svc = env.service(window());
    let engine = env.engine(window());

    let asha = svc
        .create_order(env.order_at(
            &env.table_a,
            "Asha",
            "9812345678",
            vec![env.half_line(&env.dal, 150.0)],
        ))
        .await
        .unwrap();

    // Menu price changes between open and join
    MenuItemRepository::new(env.db.clone())
        .update(
            env.dal.id.as_ref().unwrap(),
            MenuItemUpdate {
                half_price: Some(180.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let rahul = engine
        .join_session(env.join_from(&asha.session_ids[0], &env.table_b, "Rahul"))
        .await
        .unwrap();

    assert_eq!(rahul.items[0].price, 180.0);
    assert_eq!(rahul.total_amount, 180.0);

    // The originator's price is untouched
    let asha = OrderRepository::new(env.db.clone())
        .find_by_id(asha.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asha.total_amount, 150.0);
}

#[tokio::test]
async fn join_fails_when_item_has_no_half_price() {
    let env = TestEnv::new().await;
    let svc = env.service(window());
    let engine = env.engine(window());

    // The client sent a half line for an item the menu no longer halves
    let asha = svc
        .create_order(env.order_at(
            &env.table_a,
            "Asha",
            "9812345678",
            vec![env.half_line(&env.biryani, 160.0)],
        ))
        .await
        .unwrap();

    let err = engine
        .join_session(env.join_from(&asha.session_ids[0], &env.table_b, "Rahul"))
        .await
        .unwrap_err();
    assert!(matches!(err, MatchError::ItemUnavailable(_)));

    // The session is still claimable; nothing was consumed
    let session = SessionRepository::new(env.db.clone())
        .find_by_id(&asha.session_ids[0])
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.status, SessionStatus::Active);
}

#[tokio::test]
async fn expired_session_rejects_join_and_cascades_to_the_order() {
    let env = TestEnv::new().await;
    // Zero window: every session is expired the moment it opens
    let svc = env.service(Duration::zero());
    let engine = env.engine(Duration::zero());

    let asha = svc
        .create_order(env.order_at(
            &env.table_a,
            "Asha",
            "9812345678",
            vec![env.half_line(&env.dal, 150.0)],
        ))
        .await
        .unwrap();
    let session_id = asha.session_ids[0].clone();

    let err = engine
        .join_session(env.join_from(&session_id, &env.table_b, "Rahul"))
        .await
        .unwrap_err();
    assert!(matches!(err, MatchError::SessionExpired));

    // The listing read sweeps: no offers, session and order both EXPIRED
    let active = engine.list_active_sessions(&env.restaurant_id).await.unwrap();
    assert!(active.is_empty());

    let session = SessionRepository::new(env.db.clone())
        .find_by_id(&session_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(session.status, SessionStatus::Expired);

    let asha = OrderRepository::new(env.db.clone())
        .find_by_id(asha.id.as_ref().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(asha.status, OrderStatus::Expired);
}

#[tokio::test]
async fn sweep_is_idempotent() {
    let env = TestEnv::new().await;
    let svc = env.service(Duration::zero());
    let engine = env.engine(Duration::zero());

    svc.create_order(env.order_at(
        &env.table_a,
        "Asha",
        "9812345678",
        vec![env.half_line(&env.dal, 150.0)],
    ))
    .await
    .unwrap();

    let first = engine.sweep_expired(&env.restaurant_id).await.unwrap();
    assert_eq!(first.len(), 1);

    let second = engine.sweep_expired(&env.restaurant_id).await.unwrap();
    assert!(second.is_empty());
}

#[tokio::test]
async fn sweep_never_touches_a_matched_pair() {
    let env = TestEnv::new().await;
    let svc = env.service(window());
    let engine = env.engine(window());

    let asha = svc
        .create_order(env.order_at(
            &env.table_a,
            "Asha",
            "9812345678",
            vec![env.half_line(&env.dal, 150.0)],
        ))
        .await
        .unwrap();
    let rahul = engine
        .join_session(env.join_from(&asha.session_ids[0], &env.table_b, "Rahul"))
        .await
        .unwrap();

    let swept = engine.sweep_expired(&env.restaurant_id).await.unwrap();
    assert!(swept.is_empty());

    let orders = OrderRepository::new(env.db.clone());
    for id in [asha.id.as_ref().unwrap(), rahul.id.as_ref().unwrap()] {
        let order = orders.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Matched);
    }
}

#[tokio::test]
async fn concurrent_joins_have_exactly_one_winner() {
    let env = TestEnv::new().await;
    let svc = env.service(window());
    let engine = env.engine(window());

    let asha = svc
        .create_order(env.order_at(
            &env.table_a,
            "Asha",
            "9812345678",
            vec![env.half_line(&env.dal, 150.0)],
        ))
        .await
        .unwrap();
    let session_id = asha.session_ids[0].clone();

    let (rahul, meera) = tokio::join!(
        engine.join_session(env.join_from(&session_id, &env.table_b, "Rahul")),
        engine.join_session(env.join_from(&session_id, &env.table_c, "Meera")),
    );

    let (winner, loser) = match (rahul, meera) {
        (Ok(w), Err(l)) => (w, l),
        (Err(l), Ok(w)) => (w, l),
        other => panic!("expected exactly one winner, got {other:?}"),
    };
    assert!(matches!(loser, MatchError::SessionNotActive));
    assert_eq!(winner.status, OrderStatus::Matched);

    // Exactly two orders exist: the original and the winning join
    let orders = OrderRepository::new(env.db.clone())
        .find_by_restaurant(&env.restaurant_id)
        .await
        .unwrap();
    assert_eq!(orders.len(), 2);
}
