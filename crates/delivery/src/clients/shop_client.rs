//! # Shop Client
//!
//! High-level API for the `Shop` actor.
use crate::hours::{ShopAvailability, WeeklyHours};
use crate::model::{Shop, ShopCreate, ShopId, ShopUpdate};
use crate::shop_actor::{ShopAction, ShopActionResult, ShopError};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use resource_store::{ActorClient, Filter, FrameworkError, ResourceClient, Subscription};
use tracing::{debug, instrument};

/// Client for interacting with the Shop actor.
#[derive(Clone)]
pub struct ShopClient {
    inner: ResourceClient<Shop>,
}

impl ShopClient {
    pub fn new(inner: ResourceClient<Shop>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_shop(&self, params: ShopCreate) -> Result<ShopId, ShopError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_shop(&self, id: ShopId, update: ShopUpdate) -> Result<Shop, ShopError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Replaces the whole weekly schedule. Rejected unless all seven days are valid.
    #[instrument(skip(self, hours))]
    pub async fn set_hours(&self, id: ShopId, hours: WeeklyHours) -> Result<Shop, ShopError> {
        self.update_shop(
            id,
            ShopUpdate {
                hours: Some(hours),
                ..Default::default()
            },
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn availability(
        &self,
        id: ShopId,
        now: NaiveDateTime,
    ) -> Result<ShopAvailability, ShopError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ShopAction::Availability { now })
            .await
            .map_err(Self::map_error)?
        {
            ShopActionResult::Availability(availability) => Ok(availability),
            other => Err(ShopError::ActorCommunicationError(format!(
                "unexpected result: {other:?}"
            ))),
        }
    }

    #[instrument(skip(self))]
    pub async fn has_open_hours(&self, id: ShopId) -> Result<bool, ShopError> {
        debug!("Sending request");
        match self
            .inner
            .perform_action(id, ShopAction::HasOpenHours)
            .await
            .map_err(Self::map_error)?
        {
            ShopActionResult::HasOpenHours(flag) => Ok(flag),
            other => Err(ShopError::ActorCommunicationError(format!(
                "unexpected result: {other:?}"
            ))),
        }
    }

    /// Shops that open on at least one day of the week, in registration order.
    #[instrument(skip(self))]
    pub async fn list_open_for_business(&self) -> Result<Vec<Shop>, ShopError> {
        self.query(Filter::new(Shop::has_open_hours)).await
    }

    /// Live view of one shop. The snapshot is empty while the shop does not exist.
    #[instrument(skip(self))]
    pub async fn subscribe_shop(&self, id: ShopId) -> Result<Subscription<Shop>, ShopError> {
        self.subscribe(Filter::new(move |s: &Shop| s.id == id)).await
    }
}

#[async_trait]
impl ActorClient<Shop> for ShopClient {
    type Error = ShopError;

    fn inner(&self) -> &ResourceClient<Shop> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ShopError::NotFound(id),
            FrameworkError::EntityError(inner) => match inner.downcast::<ShopError>() {
                Ok(err) => *err,
                Err(other) => ShopError::ActorCommunicationError(other.to_string()),
            },
            other => ShopError::ActorCommunicationError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hours::{DaySchedule, OpenStatus};
    use chrono::{NaiveDate, Weekday};
    use resource_store::mock::MockClient;

    #[tokio::test]
    async fn test_listing_hides_shops_without_hours() {
        let mut mock = MockClient::<Shop>::new();
        let open = Shop::new(ShopId(1), "Pideci", None);
        let mut shuttered = Shop::new(ShopId(2), "Closed for renovation", None);
        shuttered.hours = WeeklyHours::uniform(DaySchedule::closed());

        mock.expect_query().return_ok(vec![open.clone(), shuttered]);
        let client = ShopClient::new(mock.client());

        let listed = client.list_open_for_business().await.unwrap();
        assert_eq!(listed, vec![open]);
        mock.verify();
    }

    #[tokio::test]
    async fn test_availability_unwraps_result() {
        let mut mock = MockClient::<Shop>::new();
        let expected = ShopAvailability {
            is_open_now: false,
            status: OpenStatus::OpensOn {
                day: Weekday::Tue,
                at: "10:00".parse().unwrap(),
            },
        };
        mock.expect_action()
            .return_ok(ShopActionResult::Availability(expected));
        let client = ShopClient::new(mock.client());

        let now = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(23, 0, 0)
            .unwrap();
        let availability = client.availability(ShopId(1), now).await.unwrap();
        assert_eq!(availability.status_label(), "closed, opens Tuesday at 10:00");
        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_result_is_an_error() {
        let mut mock = MockClient::<Shop>::new();
        mock.expect_action()
            .return_ok(ShopActionResult::HasOpenHours(true));
        let client = ShopClient::new(mock.client());

        let now = NaiveDate::from_ymd_opt(2024, 6, 3)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let result = client.availability(ShopId(1), now).await;
        assert!(matches!(result, Err(ShopError::ActorCommunicationError(_))));
    }
}
