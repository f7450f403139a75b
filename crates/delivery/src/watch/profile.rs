//! Live tier and progress for one customer.

use crate::clients::CustomerClient;
use crate::customer_actor::CustomerError;
use crate::membership::{Tier, TierProgress};
use crate::model::{Customer, CustomerId};
use resource_store::Subscription;
use serde::Serialize;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// What the profile screen shows about membership.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileSummary {
    /// Computed from the lifetime counters, never read from the cache.
    pub tier: Tier,
    pub progress: TierProgress,
    pub lifetime_order_count: u32,
    /// The stored tier disagreed with the counters when this summary was built.
    pub stored_tier_stale: bool,
}

impl ProfileSummary {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            tier: customer.computed_tier(),
            progress: customer.tier_progress(),
            lifetime_order_count: customer.lifetime_order_count,
            stored_tier_stale: customer.tier_is_stale(),
        }
    }
}

/// Keeps a customer's [`ProfileSummary`] current.
///
/// When a snapshot carries a stale cached tier, the watcher asks the customer actor to
/// refresh it. The refreshed document arrives as the next snapshot.
pub struct ProfileWatcher {
    customer_id: CustomerId,
    summary: watch::Receiver<Option<ProfileSummary>>,
    handle: JoinHandle<()>,
}

impl ProfileWatcher {
    pub async fn start(client: &CustomerClient, customer_id: CustomerId) -> Result<Self, CustomerError> {
        let subscription = client.subscribe_customer(customer_id).await?;
        let (sender, summary) = watch::channel(None);
        let handle = tokio::spawn(run(customer_id, subscription, sender, client.clone()));
        Ok(Self {
            customer_id,
            summary,
            handle,
        })
    }

    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }

    pub fn current(&self) -> Option<ProfileSummary> {
        *self.summary.borrow()
    }

    /// Waits for the next distinct summary. `None` once the watcher task has ended.
    pub async fn changed(&mut self) -> Option<Option<ProfileSummary>> {
        self.summary.changed().await.ok()?;
        Some(*self.summary.borrow_and_update())
    }

    pub fn stop(self) {}
}

impl Drop for ProfileWatcher {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn publish(
    customer_id: CustomerId,
    snapshot: Vec<Customer>,
    sender: &watch::Sender<Option<ProfileSummary>>,
    client: &CustomerClient,
) {
    let customer = snapshot.into_iter().next();
    let next = customer.as_ref().map(ProfileSummary::from_customer);

    if let Some(summary) = next.filter(|s| s.stored_tier_stale) {
        debug!(customer = %customer_id, tier = %summary.tier, "Stored tier is stale, refreshing");
        if let Err(e) = client.refresh_tier(customer_id).await {
            warn!(customer = %customer_id, error = %e, "Tier refresh failed");
        }
    }

    sender.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        if let (Some(before), Some(after)) = (current.as_ref(), next.as_ref()) {
            if before.tier != after.tier {
                info!(customer = %customer_id, from = %before.tier, to = %after.tier, "Tier changed");
            }
        }
        *current = next;
        true
    });
}

async fn run(
    customer_id: CustomerId,
    mut subscription: Subscription<Customer>,
    sender: watch::Sender<Option<ProfileSummary>>,
    client: CustomerClient,
) {
    publish(customer_id, subscription.snapshot(), &sender, &client).await;

    while let Ok(snapshot) = subscription.changed().await {
        publish(customer_id, snapshot, &sender, &client).await;
    }
    info!(customer = %customer_id, "Customer subscription closed, stopping watcher");
}
