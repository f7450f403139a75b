//! # Delivery demo
//!
//! Starts the [`DeliverySystem`], registers a customer and a shop, runs a few orders through
//! it, and logs what a customer would see: tier badge and progress, the shop's live status,
//! and the distance to it.
//!
//! ```bash
//! RUST_LOG=info cargo run -p delivery
//! RUST_LOG=debug cargo run -p delivery   # full request payloads
//! ```

use chrono::Weekday;
use delivery::config::Config;
use delivery::geo::GeoPoint;
use delivery::hours::{DaySchedule, WeeklyHours};
use delivery::lifecycle::DeliverySystem;
use delivery::model::{Address, CustomerCreate, OrderCreate, ShopCreate};
use delivery::watch::{Clock, ShopCard, SystemClock};
use resource_store::tracing::setup_tracing;
use resource_store::ActorClient;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    setup_tracing();

    let config = Config::from_env()?;
    info!(?config, "Starting delivery demo");
    let system = DeliverySystem::new(&config);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let customer_id = system
        .customer_client
        .create_customer(CustomerCreate {
            name: "Ayse".to_string(),
            email: "ayse@example.com".to_string(),
        })
        .await?;
    system
        .customer_client
        .select_address(
            customer_id,
            Some(Address::new("Home", GeoPoint::new(41.0370, 28.9850))),
        )
        .await?;
    info!(customer = %customer_id, "Customer registered");

    let shop_id = system
        .shop_client
        .create_shop(ShopCreate {
            name: "Kadikoy Pide Salonu".to_string(),
            location: Some(GeoPoint::new(40.9900, 29.0290)),
        })
        .await?;
    let hours = WeeklyHours::standard()
        .with(Weekday::Fri, DaySchedule::open("11:00", "02:00"))
        .with(Weekday::Sun, DaySchedule::closed());
    system.shop_client.set_hours(shop_id, hours).await?;
    info!(shop = %shop_id, "Shop registered");

    let mut profile = system.watch_profile(customer_id).await?;
    let status = system.watch_shop(shop_id, Arc::clone(&clock)).await?;

    let span = tracing::info_span!("order_processing");
    async {
        for total in [Decimal::new(45_000, 2), Decimal::new(62_550, 2), Decimal::new(12_000, 2)] {
            let order_id = system
                .order_client
                .place_order(OrderCreate {
                    customer_id,
                    shop_id,
                    total,
                })
                .await?;
            match system.order_client.mark_delivered(order_id).await {
                Ok(tier) => info!(order = %order_id, %tier, "Delivered"),
                Err(e) => error!(order = %order_id, error = %e, "Delivery failed"),
            }
        }

        let order_id = system
            .order_client
            .place_order(OrderCreate {
                customer_id,
                shop_id,
                total: Decimal::new(9_900, 2),
            })
            .await?;
        system.order_client.cancel(order_id).await?;
        info!(order = %order_id, "Cancelled");
        Ok::<_, Box<dyn std::error::Error>>(())
    }
    .instrument(span)
    .await?;

    while let Some(Some(summary)) = profile.changed().await {
        if !summary.stored_tier_stale && summary.lifetime_order_count == 3 {
            info!(
                customer = %profile.customer_id(),
                tier = %summary.tier,
                progress = summary.progress.percent(),
                remaining_orders = summary.progress.remaining_orders,
                "Membership"
            );
            break;
        }
    }

    if let Some(availability) = status.current() {
        info!(
            shop = %status.shop_id(),
            open = availability.is_open_now,
            status = %availability.status_label(),
            "Shop status"
        );
    }

    let customer_location = system
        .customer_client
        .get(customer_id)
        .await?
        .and_then(|c| c.delivery_location());
    for shop in system.shop_client.list_open_for_business().await? {
        let card = ShopCard::build(&shop, customer_location, clock.now());
        info!(
            shop = %card.name,
            status = %card.status_label,
            distance = card.distance_label.as_deref().unwrap_or("unknown"),
            "Listing"
        );
    }

    profile.stop();
    status.stop();
    system.shutdown().await?;

    info!("Demo completed");
    Ok(())
}
