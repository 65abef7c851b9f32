//! Order, menu and analytics tests over the in-memory database.

use chrono::{Duration, Utc};
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

use qrdine_server::db::models::{
    MenuItem, MenuItemCreate, MenuItemUpdate, OrderCreate, OrderLineCreate, OrderStatus, Portion,
    RestaurantCreate, RestaurantKind, Role, UserCreate,
};
use qrdine_server::db::repository::{
    MenuItemRepository, OrderRepository, RepoError, RestaurantRepository, SessionRepository,
    UserRepository,
};
use qrdine_server::db::DbService;
use qrdine_server::orders::matching::MatchError;
use qrdine_server::orders::{MatchingEngine, OrderService};

struct TestEnv {
    db: Surreal<Db>,
    restaurant_id: RecordId,
    thali: MenuItem,
}

impl TestEnv {
    async fn new() -> Self {
        let db = DbService::memory().await.unwrap().db;

        let restaurant = RestaurantRepository::new(db.clone())
            .create(RestaurantCreate {
                name: "Tandoor Lane".to_string(),
                address: "4 Brigade Road".to_string(),
                phone: "+91-80-9876".to_string(),
                kind: RestaurantKind::Restaurant,
            })
            .await
            .unwrap();
        let restaurant_id = restaurant.id.unwrap();

        let thali = MenuItemRepository::new(db.clone())
            .create(MenuItemCreate {
                restaurant_id: restaurant_id.clone(),
                name: "Veg Thali".to_string(),
                category: "Mains".to_string(),
                full_price: 220.0,
                half_price: Some(130.0),
                description: Some("Daily special".to_string()),
                is_available: true,
            })
            .await
            .unwrap();

        Self {
            db,
            restaurant_id,
            thali,
        }
    }

    fn service(&self) -> OrderService {
        let engine = MatchingEngine::new(self.db.clone(), Duration::minutes(30));
        OrderService::new(self.db.clone(), engine)
    }

    fn order_for(&self, mobile: &str, portion: Portion, price: f64) -> OrderCreate {
        OrderCreate {
            restaurant_id: self.restaurant_id.clone(),
            table_id: RecordId::from_table_key("dining_table", "t1"),
            table_number: "T1".to_string(),
            customer_name: "Asha".to_string(),
            customer_mobile: mobile.to_string(),
            items: vec![OrderLineCreate {
                menu_item_id: self.thali.id.clone().unwrap(),
                name: self.thali.name.clone(),
                portion,
                price,
            }],
        }
    }
}

#[tokio::test]
async fn empty_order_is_rejected() {
    let env = TestEnv::new().await;

    let mut payload = env.order_for("9812345678", Portion::Full, 220.0);
    payload.items.clear();

    let err = env.service().create_order(payload).await.unwrap_err();
    assert!(matches!(err, MatchError::Validation(_)));
}

#[tokio::test]
async fn restaurant_listing_is_newest_first() {
    let env = TestEnv::new().await;
    let svc = env.service();

    let first = svc
        .create_order(env.order_for("9812345678", Portion::Full, 220.0))
        .await
        .unwrap();
    let second = svc
        .create_order(env.order_for("9899999999", Portion::Full, 220.0))
        .await
        .unwrap();

    let orders = OrderRepository::new(env.db.clone())
        .find_by_restaurant(&env.restaurant_id)
        .await
        .unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, second.id);
    assert_eq!(orders[1].id, first.id);
}

#[tokio::test]
async fn customer_history_is_scoped_to_the_mobile_number() {
    let env = TestEnv::new().await;
    let svc = env.service();

    svc.create_order(env.order_for("9812345678", Portion::Full, 220.0))
        .await
        .unwrap();
    svc.create_order(env.order_for("9812345678", Portion::Full, 220.0))
        .await
        .unwrap();
    svc.create_order(env.order_for("9899999999", Portion::Full, 220.0))
        .await
        .unwrap();

    let orders = OrderRepository::new(env.db.clone())
        .find_by_customer("9812345678", &env.restaurant_id)
        .await
        .unwrap();
    assert_eq!(orders.len(), 2);
    assert!(orders.iter().all(|o| o.customer_mobile == "9812345678"));
}

#[tokio::test]
async fn analytics_counters_follow_the_order_lifecycle() {
    let env = TestEnv::new().await;
    let svc = env.service();
    let orders = OrderRepository::new(env.db.clone());
    let sessions = SessionRepository::new(env.db.clone());

    // One served full order, one open half order with its session
    let served = svc
        .create_order(env.order_for("9812345678", Portion::Full, 220.0))
        .await
        .unwrap();
    orders
        .update_status(served.id.as_ref().unwrap(), OrderStatus::Served, Utc::now())
        .await
        .unwrap();

    svc.create_order(env.order_for("9899999999", Portion::Half, 130.0))
        .await
        .unwrap();

    assert_eq!(orders.count_by_restaurant(&env.restaurant_id).await.unwrap(), 2);
    assert_eq!(orders.count_active(&env.restaurant_id).await.unwrap(), 1);
    assert_eq!(orders.revenue_served(&env.restaurant_id).await.unwrap(), 220.0);
    assert_eq!(sessions.count_active(&env.restaurant_id).await.unwrap(), 1);
}

#[tokio::test]
async fn menu_patch_updates_only_the_given_fields() {
    let env = TestEnv::new().await;
    let menu = MenuItemRepository::new(env.db.clone());
    let id = env.thali.id.clone().unwrap();

    let updated = menu
        .update(
            &id,
            MenuItemUpdate {
                half_price: Some(140.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.half_price, Some(140.0));
    assert_eq!(updated.name, "Veg Thali");
    assert_eq!(updated.full_price, 220.0);
    assert_eq!(updated.description.as_deref(), Some("Daily special"));
}

#[tokio::test]
async fn empty_menu_patch_is_rejected() {
    let env = TestEnv::new().await;
    let menu = MenuItemRepository::new(env.db.clone());

    let err = menu
        .update(env.thali.id.as_ref().unwrap(), MenuItemUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
}

#[tokio::test]
async fn duplicate_usernames_are_rejected() {
    let env = TestEnv::new().await;
    let users = UserRepository::new(env.db.clone());

    let data = UserCreate {
        username: "counter1".to_string(),
        password: "secret-password".to_string(),
        role: Role::Counter,
        restaurant_id: Some(env.restaurant_id.clone()),
    };

    users
        .create(data.clone(), "hash-a".to_string())
        .await
        .unwrap();
    let err = users
        .create(data, "hash-b".to_string())
        .await
        .unwrap_err();
    assert!(matches!(err, RepoError::Duplicate(_)));
}
