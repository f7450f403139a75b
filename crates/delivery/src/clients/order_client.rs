//! # Order Client
//!
//! High-level API for the `Order` actor. Customer and shop checks happen inside the actor's
//! `on_create` hook, not here.
use crate::membership::Tier;
use crate::model::{CustomerId, Order, OrderCreate, OrderId};
use crate::order_actor::{OrderAction, OrderActionResult, OrderError};
use async_trait::async_trait;
use resource_store::{ActorClient, Filter, FrameworkError, ResourceClient};
use tracing::{debug, info, instrument};

/// Client for interacting with the Order actor.
#[derive(Clone)]
pub struct OrderClient {
    inner: ResourceClient<Order>,
}

impl OrderClient {
    pub fn new(inner: ResourceClient<Order>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn place_order(&self, params: OrderCreate) -> Result<OrderId, OrderError> {
        debug!("place_order called");
        info!("Sending place_order to actor");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    /// Marks the order delivered and returns the customer's tier afterwards.
    #[instrument(skip(self))]
    pub async fn mark_delivered(&self, id: OrderId) -> Result<Tier, OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::MarkDelivered)
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::MarkDelivered(tier) => Ok(tier),
            other => Err(OrderError::ActorCommunicationError(format!(
                "unexpected result: {other:?}"
            ))),
        }
    }

    #[instrument(skip(self))]
    pub async fn cancel(&self, id: OrderId) -> Result<(), OrderError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, OrderAction::Cancel)
            .await
            .map_err(Self::map_error)?
        {
            OrderActionResult::Cancel => Ok(()),
            other => Err(OrderError::ActorCommunicationError(format!(
                "unexpected result: {other:?}"
            ))),
        }
    }

    #[instrument(skip(self))]
    pub async fn orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>, OrderError> {
        self.query(Filter::new(move |o: &Order| o.customer_id == customer_id))
            .await
    }
}

#[async_trait]
impl ActorClient<Order> for OrderClient {
    type Error = OrderError;

    fn inner(&self) -> &ResourceClient<Order> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => OrderError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<OrderError>() {
                Ok(err) => *err,
                Err(other) => OrderError::ActorCommunicationError(other.to_string()),
            },
            other => OrderError::ActorCommunicationError(other.to_string()),
        }
    }
}
