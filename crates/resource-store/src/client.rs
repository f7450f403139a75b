//! # ResourceClient
//!
//! The cloneable handle used to talk to a [`ResourceActor`](crate::ResourceActor).

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest, Response};
use crate::subscription::Subscription;
use tokio::sync::{mpsc, oneshot};

/// Type-safe async API over a collection's request channel.
///
/// Holds only the sender half, so cloning is cheap and clones can be moved into tasks.
/// Every method resolves to [`FrameworkError::ActorClosed`] once the actor has stopped.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update {
            id,
            update,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), FrameworkError> {
        self.request(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action {
            id,
            action,
            respond_to,
        })
        .await
    }

    /// One-off snapshot of every document matching `filter`.
    pub async fn query(&self, filter: Filter<T>) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Query { filter, respond_to })
            .await
    }

    /// Live snapshot of every document matching `filter`.
    pub async fn subscribe(&self, filter: Filter<T>) -> Result<Subscription<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Subscribe { filter, respond_to })
            .await
    }
}
