use delivery::clients::{CustomerClient, OrderClient, ShopClient};
use delivery::customer_actor::CustomerActionResult;
use delivery::membership::Tier;
use delivery::model::{Customer, CustomerId, OrderCreate, OrderStatus, Shop, ShopId};
use delivery::order_actor::OrderError;
use resource_store::mock::MockClient;
use resource_store::{ActorClient, FrameworkError};
use rust_decimal::Decimal;

/// Real Order actor with mocked customer and shop collections.
struct Harness {
    customers: MockClient<Customer>,
    shops: MockClient<Shop>,
    orders: OrderClient,
    handle: tokio::task::JoinHandle<()>,
}

impl Harness {
    fn start() -> Self {
        let customers = MockClient::<Customer>::new();
        let shops = MockClient::<Shop>::new();
        let customer_client = CustomerClient::new(customers.client());
        let shop_client = ShopClient::new(shops.client());

        let (order_actor, orders) = delivery::order_actor::new(10);
        let handle = tokio::spawn(order_actor.run((customer_client, shop_client)));

        Self {
            customers,
            shops,
            orders,
            handle,
        }
    }

    fn expect_customer_and_shop(&mut self) {
        self.customers
            .expect_get()
            .return_ok(Some(Customer::new(CustomerId(1), "Ayse", "ayse@example.com")));
        self.shops
            .expect_get()
            .return_ok(Some(Shop::new(ShopId(1), "Pideci", None)));
    }

    async fn finish(self) {
        self.customers.verify();
        self.shops.verify();
        drop(self.orders);
        self.handle.await.unwrap();
    }
}

fn order(total: i64) -> OrderCreate {
    OrderCreate {
        customer_id: CustomerId(1),
        shop_id: ShopId(1),
        total: Decimal::from(total),
    }
}

#[tokio::test]
async fn test_place_and_deliver_with_mocked_dependencies() {
    let mut harness = Harness::start();
    harness.expect_customer_and_shop();

    let order_id = harness.orders.place_order(order(75)).await.unwrap();
    let placed = harness.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(placed.status, OrderStatus::Placed);
    assert_eq!(placed.customer_id, CustomerId(1));

    harness
        .customers
        .expect_action()
        .return_ok(CustomerActionResult::RecordCompletedOrder(Tier::Silver));
    let tier = harness.orders.mark_delivered(order_id).await.unwrap();
    assert_eq!(tier, Tier::Silver);

    let delivered = harness.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(delivered.status, OrderStatus::Delivered);

    // A second delivery is rejected before the customer is contacted again.
    let again = harness.orders.mark_delivered(order_id).await;
    assert_eq!(
        again,
        Err(OrderError::InvalidTransition {
            from: OrderStatus::Delivered,
            to: OrderStatus::Delivered,
        })
    );

    harness.finish().await;
}

#[tokio::test]
async fn test_unknown_customer_is_rejected() {
    let mut harness = Harness::start();
    harness.customers.expect_get().return_ok(None);

    let result = harness.orders.place_order(order(20)).await;
    assert_eq!(
        result,
        Err(OrderError::InvalidCustomer("customer_1".to_string()))
    );

    harness.finish().await;
}

#[tokio::test]
async fn test_unknown_shop_is_rejected() {
    let mut harness = Harness::start();
    harness
        .customers
        .expect_get()
        .return_ok(Some(Customer::new(CustomerId(1), "Ayse", "ayse@example.com")));
    harness.shops.expect_get().return_ok(None);

    let result = harness.orders.place_order(order(20)).await;
    assert_eq!(result, Err(OrderError::InvalidShop("shop_1".to_string())));

    harness.finish().await;
}

#[tokio::test]
async fn test_non_positive_total_never_reaches_dependencies() {
    let harness = Harness::start();

    for total in [0, -10] {
        let result = harness.orders.place_order(order(total)).await;
        assert!(matches!(result, Err(OrderError::ValidationError(_))));
    }

    harness.finish().await;
}

#[tokio::test]
async fn test_failed_delivery_leaves_order_placed() {
    let mut harness = Harness::start();
    harness.expect_customer_and_shop();
    let order_id = harness.orders.place_order(order(40)).await.unwrap();

    harness
        .customers
        .expect_action()
        .return_err(FrameworkError::ActorClosed);
    let result = harness.orders.mark_delivered(order_id).await;
    assert!(matches!(result, Err(OrderError::ActorCommunicationError(_))));

    let order = harness.orders.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Placed);

    // Still placed, so it can be cancelled, and then never delivered.
    harness.orders.cancel(order_id).await.unwrap();
    let result = harness.orders.mark_delivered(order_id).await;
    assert_eq!(
        result,
        Err(OrderError::InvalidTransition {
            from: OrderStatus::Cancelled,
            to: OrderStatus::Delivered,
        })
    );

    harness.finish().await;
}
