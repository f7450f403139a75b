//! # Membership Tiers
//!
//! Loyalty tier derivation from a customer's lifetime order count and lifetime spend.
//!
//! The ladder has two independent thresholds per tier. A customer qualifies for the *better*
//! of the tier earned by order count and the tier earned by spend; meeting both is not
//! required.
//!
//! | Tier | min orders | min spend |
//! |---|---|---|
//! | Bronze | 0 | 0 |
//! | Silver | 50 | 1000 |
//! | Gold | 100 | 2500 |
//! | Platinum | 200 | 5000 |
//! | Diamond | 350 | 10000 |
//! | VIP | 500 | 20000 |
//!
//! Everything here is pure. The stored tier on a customer document is a cache of
//! [`compute_tier`], never a source of truth.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
    Vip,
}

impl Tier {
    /// Lowest to highest.
    pub const LADDER: [Tier; 6] = [
        Tier::Bronze,
        Tier::Silver,
        Tier::Gold,
        Tier::Platinum,
        Tier::Diamond,
        Tier::Vip,
    ];

    pub const fn min_orders(self) -> u32 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => 50,
            Tier::Gold => 100,
            Tier::Platinum => 200,
            Tier::Diamond => 350,
            Tier::Vip => 500,
        }
    }

    /// Minimum lifetime spend, in whole currency units.
    pub const fn min_spend(self) -> u32 {
        match self {
            Tier::Bronze => 0,
            Tier::Silver => 1_000,
            Tier::Gold => 2_500,
            Tier::Platinum => 5_000,
            Tier::Diamond => 10_000,
            Tier::Vip => 20_000,
        }
    }

    /// The tier immediately above, or `None` at the top of the ladder.
    pub fn next(self) -> Option<Tier> {
        let position = Self::LADDER.iter().position(|t| *t == self)?;
        Self::LADDER.get(position + 1).copied()
    }

    /// Badge text shown on the profile.
    pub const fn label(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
            Tier::Diamond => "Diamond",
            Tier::Vip => "VIP",
        }
    }

    /// Progress toward the next tier, measured in orders.
    pub fn progress(self, lifetime_order_count: u32) -> TierProgress {
        let Some(next) = self.next() else {
            return TierProgress {
                current: self,
                next: None,
                fraction: 1.0,
                remaining_orders: 0,
            };
        };

        let threshold = next.min_orders();
        TierProgress {
            current: self,
            next: Some(next),
            fraction: (f64::from(lifetime_order_count) / f64::from(threshold)).min(1.0),
            remaining_orders: threshold.saturating_sub(lifetime_order_count),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Progress-bar data for the profile view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TierProgress {
    pub current: Tier,
    pub next: Option<Tier>,
    /// In `0.0..=1.0`.
    pub fraction: f64,
    pub remaining_orders: u32,
}

impl TierProgress {
    pub fn percent(&self) -> u8 {
        // fraction is clamped to [0, 1]
        (self.fraction * 100.0).round() as u8
    }
}

fn tier_by_orders(lifetime_order_count: u32) -> Tier {
    Tier::LADDER
        .into_iter()
        .rev()
        .find(|t| t.min_orders() <= lifetime_order_count)
        .unwrap_or_default()
}

fn tier_by_spend(lifetime_spend: Decimal) -> Tier {
    Tier::LADDER
        .into_iter()
        .rev()
        .find(|t| Decimal::from(t.min_spend()) <= lifetime_spend)
        .unwrap_or_default()
}

/// The better of the order-count tier and the spend tier.
///
/// Negative spend is treated as zero. The counter is unsigned and `Decimal` has no NaN, so
/// there is nothing else to clamp.
pub fn compute_tier(lifetime_order_count: u32, lifetime_spend: Decimal) -> Tier {
    let spend = lifetime_spend.max(Decimal::ZERO);
    tier_by_orders(lifetime_order_count).max(tier_by_spend(spend))
}
