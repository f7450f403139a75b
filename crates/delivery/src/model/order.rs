use crate::model::{CustomerId, ShopId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub u32);

impl From<u32> for OrderId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Delivered,
    Cancelled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// A customer's order at one shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub shop_id: ShopId,
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    pub status: OrderStatus,
}

/// Payload for placing an order.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub customer_id: CustomerId,
    pub shop_id: ShopId,
    pub total: Decimal,
}

impl Order {
    /// A freshly placed order.
    pub fn new(id: OrderId, customer_id: CustomerId, shop_id: ShopId, total: Decimal) -> Self {
        Self {
            id,
            customer_id,
            shop_id,
            total,
            status: OrderStatus::Placed,
        }
    }
}
