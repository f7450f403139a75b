use chrono::{NaiveDate, NaiveDateTime, Weekday};
use delivery::config::Config;
use delivery::customer_actor::CustomerError;
use delivery::geo::GeoPoint;
use delivery::hours::{DaySchedule, WeeklyHours};
use delivery::lifecycle::DeliverySystem;
use delivery::membership::Tier;
use delivery::model::{
    Address, CustomerCreate, CustomerId, OrderCreate, OrderStatus, ShopCreate, ShopId,
};
use delivery::order_actor::OrderError;
use delivery::shop_actor::ShopError;
use delivery::watch::ShopCard;
use resource_store::ActorClient;
use rust_decimal::Decimal;

// 2024-06-03 is a Monday.
fn monday(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 3)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

async fn register(system: &DeliverySystem) -> (CustomerId, ShopId) {
    let customer_id = system
        .customer_client
        .create_customer(CustomerCreate {
            name: "Ayse".to_string(),
            email: "ayse@example.com".to_string(),
        })
        .await
        .expect("Failed to create customer");
    let shop_id = system
        .shop_client
        .create_shop(ShopCreate {
            name: "Ciya Sofrasi".to_string(),
            location: Some(GeoPoint::new(40.9900, 29.0290)),
        })
        .await
        .expect("Failed to create shop");
    (customer_id, shop_id)
}

/// Full end-to-end flow through all real actors.
#[tokio::test]
async fn test_full_delivery_flow() {
    let system = DeliverySystem::new(&Config::default());
    let (customer_id, shop_id) = register(&system).await;

    let customer = system.customer_client.get(customer_id).await.unwrap().unwrap();
    assert_eq!(customer.membership_tier, Tier::Bronze);
    assert_eq!(customer.lifetime_order_count, 0);

    let order_id = system
        .order_client
        .place_order(OrderCreate {
            customer_id,
            shop_id,
            total: Decimal::new(120_050, 2),
        })
        .await
        .expect("Failed to place order");

    // One large order qualifies by spend alone.
    let tier = system.order_client.mark_delivered(order_id).await.unwrap();
    assert_eq!(tier, Tier::Silver);

    let customer = system.customer_client.get(customer_id).await.unwrap().unwrap();
    assert_eq!(customer.lifetime_order_count, 1);
    assert_eq!(customer.lifetime_spend, Decimal::new(120_050, 2));
    assert_eq!(customer.membership_tier, Tier::Silver);
    assert!(!customer.tier_is_stale());

    let order = system.order_client.get(order_id).await.unwrap().unwrap();
    assert_eq!(order.status, OrderStatus::Delivered);

    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_cancelled_orders_do_not_count() {
    let system = DeliverySystem::new(&Config::default());
    let (customer_id, shop_id) = register(&system).await;

    let order_id = system
        .order_client
        .place_order(OrderCreate {
            customer_id,
            shop_id,
            total: Decimal::from(5_000),
        })
        .await
        .unwrap();
    system.order_client.cancel(order_id).await.unwrap();

    let result = system.order_client.mark_delivered(order_id).await;
    assert!(matches!(result, Err(OrderError::InvalidTransition { .. })));

    let customer = system.customer_client.get(customer_id).await.unwrap().unwrap();
    assert_eq!(customer.lifetime_order_count, 0);
    assert_eq!(customer.membership_tier, Tier::Bronze);

    let history = system
        .order_client
        .orders_for_customer(customer_id)
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, OrderStatus::Cancelled);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_order_for_unknown_customer_fails() {
    let system = DeliverySystem::new(&Config::default());
    let (_, shop_id) = register(&system).await;

    let result = system
        .order_client
        .place_order(OrderCreate {
            customer_id: CustomerId(99),
            shop_id,
            total: Decimal::from(10),
        })
        .await;
    assert_eq!(
        result,
        Err(OrderError::InvalidCustomer("customer_99".to_string()))
    );

    system.shutdown().await.unwrap();
}

/// Concurrent deliveries are serialized by the customer actor; none is lost.
#[tokio::test]
async fn test_concurrent_deliveries() {
    let system = DeliverySystem::new(&Config::default());
    let (customer_id, shop_id) = register(&system).await;

    let mut handles = vec![];
    for _ in 0..50 {
        let order_client = system.order_client.clone();
        handles.push(tokio::spawn(async move {
            let order_id = order_client
                .place_order(OrderCreate {
                    customer_id,
                    shop_id,
                    total: Decimal::from(10),
                })
                .await?;
            order_client.mark_delivered(order_id).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().expect("Delivery failed");
    }

    let customer = system.customer_client.get(customer_id).await.unwrap().unwrap();
    assert_eq!(customer.lifetime_order_count, 50);
    assert_eq!(customer.lifetime_spend, Decimal::from(500));
    assert_eq!(customer.membership_tier, Tier::Silver);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_shop_hours_and_listing() {
    let system = DeliverySystem::new(&Config::default());
    let (customer_id, shop_id) = register(&system).await;

    let availability = system
        .shop_client
        .availability(shop_id, monday(8, 30))
        .await
        .unwrap();
    assert!(!availability.is_open_now);
    assert_eq!(availability.status_label(), "closed, opens today at 09:00");

    // Invalid schedules are refused and leave the old one in place.
    let broken = WeeklyHours::standard().with(Weekday::Tue, DaySchedule::open("nine", "22:00"));
    let result = system.shop_client.set_hours(shop_id, broken).await;
    assert!(matches!(result, Err(ShopError::InvalidHours(_))));
    assert!(system.shop_client.has_open_hours(shop_id).await.unwrap());

    let shuttered = system
        .shop_client
        .create_shop(ShopCreate {
            name: "Closed Kitchen".to_string(),
            location: None,
        })
        .await
        .unwrap();
    system
        .shop_client
        .set_hours(shuttered, WeeklyHours::uniform(DaySchedule::closed()))
        .await
        .unwrap();

    let listed = system.shop_client.list_open_for_business().await.unwrap();
    let ids: Vec<_> = listed.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![shop_id]);

    let customer = system
        .customer_client
        .select_address(
            customer_id,
            Some(Address::new("Home", GeoPoint::new(41.0370, 28.9850))),
        )
        .await
        .unwrap();
    let card = ShopCard::build(&listed[0], customer.delivery_location(), monday(12, 0));
    assert_eq!(card.status_label, "open until 22:00");
    assert_eq!(card.distance_label.as_deref(), Some("6.4 km"));

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_missing_documents_map_to_not_found() {
    let system = DeliverySystem::new(&Config::default());

    let refresh = system.customer_client.refresh_tier(CustomerId(5)).await;
    assert_eq!(
        refresh,
        Err(CustomerError::NotFound("customer_5".to_string()))
    );

    let availability = system.shop_client.availability(ShopId(5), monday(12, 0)).await;
    assert_eq!(availability, Err(ShopError::NotFound("shop_5".to_string())));

    system.shutdown().await.unwrap();
}
