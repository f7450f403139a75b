//! # Mock Collections
//!
//! [`MockClient<T>`] hands out a real [`ResourceClient<T>`] whose requests are answered from a
//! queue of expectations instead of by a running actor. Use it to test code that *calls* a
//! collection (an order checking its customer, a watcher following a shop) without starting
//! the collection it calls.
//!
//! | | MockClient | Real actor |
//! |---|---|---|
//! | State | none, scripted replies | real documents |
//! | Error injection | `return_err` | needs a specific state |
//! | Live updates | pushed by the test through a [`SnapshotFeed`] | pushed by mutations |
//!
//! Expectations are consumed in order. A request that does not match the next expectation
//! panics the mock task, which surfaces in the test as [`FrameworkError::ActorDropped`].
//!
//! ```rust
//! use resource_store::mock::MockClient;
//! use resource_store::{ActorEntity, Filter};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug, PartialEq)] struct Shop { id: u32, open: bool }
//! #[derive(Debug)] struct ShopCreate;
//! #[derive(Debug)] struct ShopUpdate;
//! #[derive(Debug)] enum ShopAction {}
//! #[derive(Debug, thiserror::Error)] #[error("shop error")] struct ShopError;
//!
//! #[async_trait]
//! impl ActorEntity for Shop {
//!     type Id = u32; type Create = ShopCreate; type Update = ShopUpdate;
//!     type Action = ShopAction; type ActionResult = (); type Context = (); type Error = ShopError;
//!     fn from_create_params(id: u32, _: ShopCreate) -> Result<Self, ShopError> { Ok(Self { id, open: true }) }
//!     async fn on_update(&mut self, _: ShopUpdate, _: &()) -> Result<(), ShopError> { Ok(()) }
//!     async fn handle_action(&mut self, a: ShopAction, _: &()) -> Result<(), ShopError> { match a {} }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Shop>::new();
//!     let feed = mock.expect_subscribe().return_snapshot(vec![Shop { id: 1, open: true }]);
//!
//!     let mut live = mock.client().subscribe(Filter::all()).await.unwrap();
//!     assert!(live.snapshot()[0].open);
//!
//!     feed.push(vec![Shop { id: 1, open: false }]);
//!     assert!(!live.changed().await.unwrap()[0].open);
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::subscription::Subscription;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot, watch};

enum Expectation<T: ActorEntity> {
    Get(Result<Option<T>, FrameworkError>),
    Create(Result<T::Id, FrameworkError>),
    Update(Result<T, FrameworkError>),
    Action(Result<T::ActionResult, FrameworkError>),
    Query(Result<Vec<T>, FrameworkError>),
    Subscribe(Result<watch::Receiver<Vec<T>>, FrameworkError>),
}

type Expectations<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A scripted stand-in for a collection.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Expectations<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Expectations<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = Arc::clone(&expectations);

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();

                match (request, next) {
                    (ResourceRequest::Get { respond_to, .. }, Some(Expectation::Get(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Update { respond_to, .. }, Some(Expectation::Update(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (ResourceRequest::Action { respond_to, .. }, Some(Expectation::Action(r))) => {
                        let _ = respond_to.send(r);
                    }
                    (
                        ResourceRequest::Query { filter, respond_to },
                        Some(Expectation::Query(r)),
                    ) => {
                        let matches = r.map(|docs| {
                            docs.into_iter().filter(|doc| filter.matches(doc)).collect()
                        });
                        let _ = respond_to.send(matches);
                    }
                    (
                        ResourceRequest::Subscribe { respond_to, .. },
                        Some(Expectation::Subscribe(r)),
                    ) => {
                        let _ = respond_to.send(r.map(Subscription::new));
                    }
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn expect(&self) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            expectations: Arc::clone(&self.expectations),
        }
    }

    pub fn expect_get(&mut self) -> GetExpectation<T> {
        GetExpectation(self.expect())
    }

    pub fn expect_create(&mut self) -> CreateExpectation<T> {
        CreateExpectation(self.expect())
    }

    pub fn expect_update(&mut self) -> UpdateExpectation<T> {
        UpdateExpectation(self.expect())
    }

    pub fn expect_action(&mut self) -> ActionExpectation<T> {
        ActionExpectation(self.expect())
    }

    pub fn expect_query(&mut self) -> QueryExpectation<T> {
        QueryExpectation(self.expect())
    }

    pub fn expect_subscribe(&mut self) -> SubscribeExpectation<T> {
        SubscribeExpectation(self.expect())
    }

    /// Panics if any expectation was not consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

struct ExpectationBuilder<T: ActorEntity> {
    expectations: Expectations<T>,
}

impl<T: ActorEntity> ExpectationBuilder<T> {
    fn push(self, expectation: Expectation<T>) {
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

pub struct GetExpectation<T: ActorEntity>(ExpectationBuilder<T>);

impl<T: ActorEntity> GetExpectation<T> {
    pub fn return_ok(self, value: Option<T>) {
        self.0.push(Expectation::Get(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.0.push(Expectation::Get(Err(error)));
    }
}

pub struct CreateExpectation<T: ActorEntity>(ExpectationBuilder<T>);

impl<T: ActorEntity> CreateExpectation<T> {
    pub fn return_ok(self, id: T::Id) {
        self.0.push(Expectation::Create(Ok(id)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.0.push(Expectation::Create(Err(error)));
    }
}

pub struct UpdateExpectation<T: ActorEntity>(ExpectationBuilder<T>);

impl<T: ActorEntity> UpdateExpectation<T> {
    pub fn return_ok(self, updated: T) {
        self.0.push(Expectation::Update(Ok(updated)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.0.push(Expectation::Update(Err(error)));
    }
}

pub struct ActionExpectation<T: ActorEntity>(ExpectationBuilder<T>);

impl<T: ActorEntity> ActionExpectation<T> {
    pub fn return_ok(self, result: T::ActionResult) {
        self.0.push(Expectation::Action(Ok(result)));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.0.push(Expectation::Action(Err(error)));
    }
}

pub struct QueryExpectation<T: ActorEntity>(ExpectationBuilder<T>);

impl<T: ActorEntity> QueryExpectation<T> {
    /// Answers with the documents of `collection` that pass the request's filter.
    pub fn return_ok(self, collection: Vec<T>) {
        self.0.push(Expectation::Query(Ok(collection)));
    }
}

pub struct SubscribeExpectation<T: ActorEntity>(ExpectationBuilder<T>);

impl<T: ActorEntity> SubscribeExpectation<T> {
    /// Answers the subscription with `initial` and returns the feed that drives it afterwards.
    pub fn return_snapshot(self, initial: Vec<T>) -> SnapshotFeed<T> {
        let (sender, receiver) = watch::channel(initial);
        self.0.push(Expectation::Subscribe(Ok(receiver)));
        SnapshotFeed { sender }
    }

    pub fn return_err(self, error: FrameworkError) {
        self.0.push(Expectation::Subscribe(Err(error)));
    }
}

/// Test-side handle publishing snapshots into a mocked subscription.
///
/// Dropping the feed closes the subscription, like a collection shutting down.
pub struct SnapshotFeed<T> {
    sender: watch::Sender<Vec<T>>,
}

impl<T> SnapshotFeed<T> {
    pub fn push(&self, snapshot: Vec<T>) {
        self.sender.send_replace(snapshot);
    }

    /// Whether the subscriber still holds its end.
    pub fn is_subscribed(&self) -> bool {
        !self.sender.is_closed()
    }
}

/// Creates a client wired to a receiver the test reads directly.
///
/// Lower level than [`MockClient`]: the test inspects each raw [`ResourceRequest`] and answers
/// it by hand, which lets it assert on payloads.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Next request, if it is a `Create`.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an `Update`.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Next request, if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
