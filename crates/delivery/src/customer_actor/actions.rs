//! Custom actions for the Customer actor.

use crate::membership::Tier;
use rust_decimal::Decimal;

#[derive(Debug, Clone)]
pub enum CustomerAction {
    /// Adds one delivered order of `total` to the lifetime counters and refreshes the cached
    /// tier.
    RecordCompletedOrder { total: Decimal },
    /// Rewrites the cached tier from the current counters.
    RefreshTier,
}

/// Results from CustomerActions - variants match 1:1 with CustomerAction
#[derive(Debug, Clone, PartialEq)]
pub enum CustomerActionResult {
    /// The tier after the order was counted.
    RecordCompletedOrder(Tier),
    RefreshTier(TierChange),
}

/// Cached tier before and after a refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierChange {
    pub previous: Tier,
    pub current: Tier,
}

impl TierChange {
    pub fn changed(&self) -> bool {
        self.previous != self.current
    }
}
