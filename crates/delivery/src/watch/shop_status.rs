//! Live open/closed status of one shop.

use crate::clients::ShopClient;
use crate::hours::ShopAvailability;
use crate::model::{Shop, ShopId};
use crate::shop_actor::ShopError;
use crate::watch::clock::Clock;
use resource_store::Subscription;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Keeps a shop's [`ShopAvailability`] current.
///
/// The status is re-evaluated on start, whenever the shop document changes, and on every
/// `poll_interval` tick. The published value is `None` while the shop does not exist.
pub struct ShopStatusWatcher {
    shop_id: ShopId,
    status: watch::Receiver<Option<ShopAvailability>>,
    handle: JoinHandle<()>,
}

fn evaluate(shop: Option<&Shop>, clock: &dyn Clock) -> Option<ShopAvailability> {
    shop.map(|s| s.availability(clock.now()))
}

impl ShopStatusWatcher {
    pub async fn start(
        client: &ShopClient,
        shop_id: ShopId,
        clock: Arc<dyn Clock>,
        poll_interval: Duration,
    ) -> Result<Self, ShopError> {
        let subscription = client.subscribe_shop(shop_id).await?;
        let shop = subscription.snapshot().into_iter().next();
        let initial = evaluate(shop.as_ref(), clock.as_ref());
        info!(shop = %shop_id, status = ?initial.map(|a| a.status_label()), "Watching shop status");

        let (sender, status) = watch::channel(initial);
        let handle = tokio::spawn(run(shop_id, shop, subscription, sender, clock, poll_interval));

        Ok(Self {
            shop_id,
            status,
            handle,
        })
    }

    pub fn shop_id(&self) -> ShopId {
        self.shop_id
    }

    pub fn current(&self) -> Option<ShopAvailability> {
        *self.status.borrow()
    }

    /// Waits until the published status differs from the last one seen through this watcher.
    ///
    /// Returns `None` once the watcher task has ended, for example after the shop collection
    /// shut down.
    pub async fn changed(&mut self) -> Option<Option<ShopAvailability>> {
        self.status.changed().await.ok()?;
        Some(*self.status.borrow_and_update())
    }

    pub fn stop(self) {}
}

impl Drop for ShopStatusWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn run(
    shop_id: ShopId,
    mut shop: Option<Shop>,
    mut subscription: Subscription<Shop>,
    sender: watch::Sender<Option<ShopAvailability>>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
) {
    let mut ticker = tokio::time::interval(poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick fires immediately; the initial status is already published.
    ticker.tick().await;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                debug!(shop = %shop_id, "Timer re-evaluation");
            }
            changed = subscription.changed() => match changed {
                Ok(snapshot) => {
                    debug!(shop = %shop_id, "Shop document changed");
                    shop = snapshot.into_iter().next();
                }
                Err(_) => {
                    info!(shop = %shop_id, "Shop subscription closed, stopping watcher");
                    break;
                }
            },
        }

        let next = evaluate(shop.as_ref(), clock.as_ref());
        sender.send_if_modified(|current| {
            if *current == next {
                return false;
            }
            info!(
                shop = %shop_id,
                from = ?current.map(|a| a.status_label()),
                to = ?next.map(|a| a.status_label()),
                "Shop status changed"
            );
            *current = next;
            true
        });
    }
}
