//! [`ActorEntity`] implementation for [`Order`].
//!
//! Orders depend on the customer and shop collections, which are injected as the actor's
//! context. Creation checks both exist; delivery reports the order to the customer.

use super::actions::{OrderAction, OrderActionResult};
use super::error::OrderError;
use crate::clients::{CustomerClient, ShopClient};
use crate::model::{Order, OrderCreate, OrderId, OrderStatus};
use async_trait::async_trait;
use resource_store::{ActorClient, ActorEntity};
use rust_decimal::Decimal;
use tracing::info;

impl Order {
    fn transition(&self, to: OrderStatus) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Placed => Ok(()),
            from => Err(OrderError::InvalidTransition { from, to }),
        }
    }
}

#[async_trait]
impl ActorEntity for Order {
    type Id = OrderId;
    type Create = OrderCreate;
    /// Orders change only through actions.
    type Update = ();
    type Action = OrderAction;
    type ActionResult = OrderActionResult;
    type Context = (CustomerClient, ShopClient);
    type Error = OrderError;

    fn from_create_params(id: OrderId, params: OrderCreate) -> Result<Self, Self::Error> {
        if params.total <= Decimal::ZERO {
            return Err(OrderError::ValidationError(format!(
                "order total must be positive: {}",
                params.total
            )));
        }
        Ok(Self::new(id, params.customer_id, params.shop_id, params.total))
    }

    async fn on_create(&mut self, ctx: &Self::Context) -> Result<(), Self::Error> {
        let (customer_client, shop_client) = ctx;

        let customer = customer_client
            .get(self.customer_id)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;
        if customer.is_none() {
            return Err(OrderError::InvalidCustomer(self.customer_id.to_string()));
        }

        let shop = shop_client
            .get(self.shop_id)
            .await
            .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;
        if shop.is_none() {
            return Err(OrderError::InvalidShop(self.shop_id.to_string()));
        }

        info!(customer = %self.customer_id, shop = %self.shop_id, total = %self.total, "Order placed");
        Ok(())
    }

    async fn on_update(&mut self, _update: (), _ctx: &Self::Context) -> Result<(), Self::Error> {
        Err(OrderError::ValidationError(
            "orders change only through MarkDelivered or Cancel".to_string(),
        ))
    }

    async fn handle_action(
        &mut self,
        action: OrderAction,
        ctx: &Self::Context,
    ) -> Result<OrderActionResult, Self::Error> {
        match action {
            OrderAction::MarkDelivered => {
                self.transition(OrderStatus::Delivered)?;
                let (customer_client, _) = ctx;
                let tier = customer_client
                    .record_completed_order(self.customer_id, self.total)
                    .await
                    .map_err(|e| OrderError::ActorCommunicationError(e.to_string()))?;
                self.status = OrderStatus::Delivered;
                info!(order = %self.id, customer = %self.customer_id, %tier, "Order delivered");
                Ok(OrderActionResult::MarkDelivered(tier))
            }
            OrderAction::Cancel => {
                self.transition(OrderStatus::Cancelled)?;
                self.status = OrderStatus::Cancelled;
                info!(order = %self.id, "Order cancelled");
                Ok(OrderActionResult::Cancel)
            }
        }
    }
}
