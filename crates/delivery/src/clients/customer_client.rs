//! # Customer Client
//!
//! High-level API for the `Customer` actor.
use crate::customer_actor::{CustomerAction, CustomerActionResult, CustomerError, TierChange};
use crate::membership::Tier;
use crate::model::{Address, Customer, CustomerCreate, CustomerId, CustomerUpdate};
use async_trait::async_trait;
use resource_store::{ActorClient, Filter, FrameworkError, ResourceClient, Subscription};
use rust_decimal::Decimal;
use tracing::{debug, instrument};

/// Client for interacting with the Customer actor.
#[derive(Clone)]
pub struct CustomerClient {
    inner: ResourceClient<Customer>,
}

impl CustomerClient {
    pub fn new(inner: ResourceClient<Customer>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_customer(&self, params: CustomerCreate) -> Result<CustomerId, CustomerError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_profile(
        &self,
        id: CustomerId,
        update: CustomerUpdate,
    ) -> Result<Customer, CustomerError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Replaces the selected delivery address, or clears it with `None`.
    #[instrument(skip(self))]
    pub async fn select_address(
        &self,
        id: CustomerId,
        address: Option<Address>,
    ) -> Result<Customer, CustomerError> {
        self.update_profile(
            id,
            CustomerUpdate {
                selected_address: Some(address),
                ..Default::default()
            },
        )
        .await
    }

    /// Counts one delivered order and returns the resulting tier.
    #[instrument(skip(self))]
    pub async fn record_completed_order(
        &self,
        id: CustomerId,
        total: Decimal,
    ) -> Result<Tier, CustomerError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, CustomerAction::RecordCompletedOrder { total })
            .await
            .map_err(Self::map_error)?
        {
            CustomerActionResult::RecordCompletedOrder(tier) => Ok(tier),
            other => Err(CustomerError::ActorCommunicationError(format!(
                "unexpected result: {other:?}"
            ))),
        }
    }

    #[instrument(skip(self))]
    pub async fn refresh_tier(&self, id: CustomerId) -> Result<TierChange, CustomerError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, CustomerAction::RefreshTier)
            .await
            .map_err(Self::map_error)?
        {
            CustomerActionResult::RefreshTier(change) => Ok(change),
            other => Err(CustomerError::ActorCommunicationError(format!(
                "unexpected result: {other:?}"
            ))),
        }
    }

    /// Live view of one customer. The snapshot is empty while the customer does not exist.
    #[instrument(skip(self))]
    pub async fn subscribe_customer(
        &self,
        id: CustomerId,
    ) -> Result<Subscription<Customer>, CustomerError> {
        self.subscribe(Filter::new(move |c: &Customer| c.id == id))
            .await
    }
}

#[async_trait]
impl ActorClient<Customer> for CustomerClient {
    type Error = CustomerError;

    fn inner(&self) -> &ResourceClient<Customer> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => CustomerError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<CustomerError>() {
                Ok(err) => *err,
                Err(other) => CustomerError::ActorCommunicationError(other.to_string()),
            },
            other => CustomerError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_store::mock::{create_mock_client, expect_action, expect_update};

    #[tokio::test]
    async fn test_record_completed_order_sends_total() {
        let (client, mut receiver) = create_mock_client::<Customer>(10);
        let customer_client = CustomerClient::new(client);

        let task = tokio::spawn(async move {
            customer_client
                .record_completed_order(CustomerId(3), Decimal::new(4_250, 2))
                .await
        });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, CustomerId(3));
        match action {
            CustomerAction::RecordCompletedOrder { total } => {
                assert_eq!(total, Decimal::new(4_250, 2))
            }
            _ => panic!("Expected RecordCompletedOrder action"),
        }
        responder
            .send(Ok(CustomerActionResult::RecordCompletedOrder(Tier::Silver)))
            .unwrap();

        assert_eq!(task.await.unwrap().unwrap(), Tier::Silver);
    }

    #[tokio::test]
    async fn test_select_address_is_a_whole_replacement() {
        let (client, mut receiver) = create_mock_client::<Customer>(10);
        let customer_client = CustomerClient::new(client);
        let home = Address::new("Home", crate::geo::GeoPoint::new(41.0, 29.0));

        let expected = home.clone();
        let task = tokio::spawn(async move {
            customer_client
                .select_address(CustomerId(1), Some(expected))
                .await
        });

        let (id, update, responder) = expect_update(&mut receiver)
            .await
            .expect("Expected Update request");
        assert_eq!(id, CustomerId(1));
        assert_eq!(update.name, None);
        assert_eq!(update.selected_address, Some(Some(home.clone())));

        let mut updated = Customer::new(CustomerId(1), "Ayse", "ayse@example.com");
        updated.selected_address = Some(home);
        responder.send(Ok(updated.clone())).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), updated);
    }

    #[tokio::test]
    async fn test_hook_errors_come_back_typed() {
        let (client, mut receiver) = create_mock_client::<Customer>(10);
        let customer_client = CustomerClient::new(client);

        let task = tokio::spawn(async move { customer_client.refresh_tier(CustomerId(9)).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::EntityError(Box::new(
                CustomerError::ValidationError("bad".to_string()),
            ))))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(CustomerError::ValidationError("bad".to_string()))
        );
    }

    #[tokio::test]
    async fn test_missing_customer_maps_to_not_found() {
        let (client, mut receiver) = create_mock_client::<Customer>(10);
        let customer_client = CustomerClient::new(client);

        let task = tokio::spawn(async move { customer_client.refresh_tier(CustomerId(9)).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::NotFound("customer_9".to_string())))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(CustomerError::NotFound("customer_9".to_string()))
        );
    }
}
