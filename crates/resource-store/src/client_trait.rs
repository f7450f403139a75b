//! # ActorClient Trait
//!
//! Shared surface for document-specific clients. A wrapper only has to expose its inner
//! [`ResourceClient`] and say how store errors map into its own error type; `get`, `delete`,
//! `query` and `subscribe` come for free.
use crate::{ActorEntity, Filter, FrameworkError, ResourceClient, Subscription};
use async_trait::async_trait;

/// Default read/delete operations for a document-specific client.
///
/// ```rust
/// use resource_store::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Rider { id: u32 }
/// #[derive(Debug)] struct RiderCreate;
/// #[derive(Debug)] struct RiderUpdate;
/// #[derive(Debug)] enum RiderAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct RiderError(String);
///
/// impl From<String> for RiderError {
///     fn from(s: String) -> Self { RiderError(s) }
/// }
///
/// #[async_trait]
/// impl ActorEntity for Rider {
///     type Id = u32;
///     type Create = RiderCreate;
///     type Update = RiderUpdate;
///     type Action = RiderAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = RiderError;
///
///     fn from_create_params(id: u32, _: RiderCreate) -> Result<Self, RiderError> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: RiderUpdate, _: &()) -> Result<(), RiderError> { Ok(()) }
///     async fn handle_action(&mut self, a: RiderAction, _: &()) -> Result<(), RiderError> { match a {} }
/// }
///
/// struct RiderClient { inner: ResourceClient<Rider> }
///
/// #[async_trait]
/// impl ActorClient<Rider> for RiderClient {
///     type Error = RiderError;
///     fn inner(&self) -> &ResourceClient<Rider> { &self.inner }
///     fn map_error(e: FrameworkError) -> RiderError { RiderError(e.to_string()) }
/// }
///
/// async fn usage(client: RiderClient) {
///     let _ = client.get(1).await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    type Error: From<String> + Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    fn map_error(e: FrameworkError) -> Self::Error;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self, filter))]
    async fn query(&self, filter: Filter<T>) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().query(filter).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self, filter))]
    async fn subscribe(&self, filter: Filter<T>) -> Result<Subscription<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().subscribe(filter).await.map_err(Self::map_error)
    }
}
