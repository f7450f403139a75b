//! Custom actions for the Order actor.

use crate::membership::Tier;

#[derive(Debug, Clone)]
pub enum OrderAction {
    /// Marks a placed order delivered and counts it toward the customer's tier.
    MarkDelivered,
    /// Cancels a placed order. Cancelled orders never count toward a tier.
    Cancel,
}

/// Results from OrderActions - variants match 1:1 with OrderAction
#[derive(Debug, Clone, PartialEq)]
pub enum OrderActionResult {
    /// The customer's tier after the delivery was recorded.
    MarkDelivered(Tier),
    Cancel,
}
