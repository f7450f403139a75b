//! # System Lifecycle
//!
//! [`DeliverySystem`] creates the three collections, wires their dependencies, and shuts them
//! down in order.
//!
//! ## Wiring
//!
//! Actors are created first and receive their dependencies when started, through `run(context)`:
//!
//! ```rust,ignore
//! let (customer_actor, customer_client) = customer_actor::new(buffer);
//! let (shop_actor, shop_client) = shop_actor::new(buffer);
//! let (order_actor, order_client) = order_actor::new(buffer);
//!
//! tokio::spawn(customer_actor.run(()));
//! tokio::spawn(shop_actor.run(()));
//! tokio::spawn(order_actor.run((customer_client.clone(), shop_client.clone())));
//! ```
//!
//! ## Shutdown
//!
//! An actor stops once every client clone is dropped. The order actor holds clones of the
//! customer and shop clients in its context, so it must stop first; the dependency graph is
//! acyclic, so dropping all of the system's clients and awaiting every task is enough.
//!
//! Watchers hold subscriptions and, for [`ProfileWatcher`], a customer client clone. Stop
//! them before calling [`DeliverySystem::shutdown`], or the customer actor keeps running
//! until they are dropped.

use crate::clients::{CustomerClient, OrderClient, ShopClient};
use crate::config::Config;
use crate::customer_actor::CustomerError;
use crate::model::{CustomerId, ShopId};
use crate::shop_actor::ShopError;
use crate::watch::{Clock, ProfileWatcher, ShopStatusWatcher};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{JoinError, JoinHandle};
use tracing::{error, info};

#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Actor task failed: {0}")]
    ActorTaskFailed(#[from] JoinError),
}

/// The running delivery back end: one actor per collection plus their clients.
///
/// ```ignore
/// let system = DeliverySystem::new(&Config::default());
///
/// let customer = system.customer_client.create_customer(params).await?;
/// let order = system.order_client.place_order(order_params).await?;
/// system.order_client.mark_delivered(order).await?;
///
/// system.shutdown().await?;
/// ```
pub struct DeliverySystem {
    pub customer_client: CustomerClient,
    pub shop_client: ShopClient,
    pub order_client: OrderClient,
    config: Config,
    handles: Vec<JoinHandle<()>>,
}

impl DeliverySystem {
    /// Spawns all actors. Must be called inside a Tokio runtime.
    pub fn new(config: &Config) -> Self {
        let buffer = config.actor_buffer_size;
        let (customer_actor, customer_client) = crate::customer_actor::new(buffer);
        let (shop_actor, shop_client) = crate::shop_actor::new(buffer);
        let (order_actor, order_client) = crate::order_actor::new(buffer);

        let customer_handle = tokio::spawn(customer_actor.run(()));
        let shop_handle = tokio::spawn(shop_actor.run(()));
        let order_handle =
            tokio::spawn(order_actor.run((customer_client.clone(), shop_client.clone())));

        info!(buffer, "Delivery system started");
        Self {
            customer_client,
            shop_client,
            order_client,
            config: config.clone(),
            handles: vec![order_handle, customer_handle, shop_handle],
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Starts a status watcher for `shop_id` polling at the configured interval.
    pub async fn watch_shop(
        &self,
        shop_id: ShopId,
        clock: Arc<dyn Clock>,
    ) -> Result<ShopStatusWatcher, ShopError> {
        ShopStatusWatcher::start(
            &self.shop_client,
            shop_id,
            clock,
            self.config.shop_status_poll_interval,
        )
        .await
    }

    pub async fn watch_profile(&self, customer_id: CustomerId) -> Result<ProfileWatcher, CustomerError> {
        ProfileWatcher::start(&self.customer_client, customer_id).await
    }

    /// Drops every client and waits for every actor to stop.
    pub async fn shutdown(self) -> Result<(), LifecycleError> {
        info!("Shutting down delivery system");
        drop(self.order_client);
        drop(self.customer_client);
        drop(self.shop_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Actor task failed");
                return Err(e.into());
            }
        }

        info!("Delivery system shutdown complete");
        Ok(())
    }
}
