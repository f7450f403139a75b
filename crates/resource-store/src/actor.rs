//! # ResourceActor
//!
//! The server half of a collection: owns the documents and the live subscribers.

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{Filter, ResourceRequest};
use crate::subscription::Subscription;
use std::collections::BTreeMap;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

struct Subscriber<T> {
    filter: Filter<T>,
    sender: watch::Sender<Vec<T>>,
}

/// Generic actor that owns one document collection.
///
/// Requests are processed one at a time, so the store and the subscriber list are plain
/// owned values with no locking.
///
/// # Usage Pattern
///
/// 1. **Create**: `ResourceActor::new(buffer)` returns the actor and its client.
/// 2. **Wire**: pass the context (other clients) to `actor.run(context)`.
/// 3. **Run**: spawn the returned future.
///
/// ```rust
/// use resource_store::{ActorEntity, Filter, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate(String);
/// #[derive(Debug)] struct NoteUpdate(String);
/// #[derive(Debug)] enum NoteAction {}
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl ActorEntity for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Action = NoteAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, p: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { id, text: p.0 })
///     }
///     async fn on_update(&mut self, u: NoteUpdate, _: &()) -> Result<(), NoteError> {
///         self.text = u.0;
///         Ok(())
///     }
///     async fn handle_action(&mut self, a: NoteAction, _: &()) -> Result<(), NoteError> {
///         match a {}
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let mut live = client.subscribe(Filter::all()).await.unwrap();
///     let id = client.create(NoteCreate("hello".into())).await.unwrap();
///     let snapshot = live.changed().await.unwrap();
///     assert_eq!(snapshot[0].id, id);
/// }
/// ```
///
/// # Operations
///
/// * **Create**: next ID from the counter, `from_create_params`, `on_create`, insert, broadcast.
/// * **Get**: clone of the stored document, or `None`.
/// * **Update**: `on_update` on the stored document, broadcast, return the new state.
/// * **Delete**: `on_delete`, remove, broadcast.
/// * **Action**: `handle_action`; broadcast if the action is declared mutating and succeeded.
/// * **Query**: every document matching the filter, in ID order.
/// * **Subscribe**: register a subscriber seeded with the current matching snapshot.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    subscribers: Vec<Subscriber<T>>,
    next_id: u32,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and its client.
    ///
    /// `buffer_size` bounds the request channel; callers wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            subscribers: Vec::new(),
            next_id: 1,
        };
        (actor, ResourceClient::new(sender))
    }

    fn snapshot(&self, filter: &Filter<T>) -> Vec<T> {
        self.store
            .values()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect()
    }

    /// Pushes a fresh snapshot to every subscriber whose filter matched the document `id`
    /// before or after the change. `before` is `None` for a created document.
    fn broadcast(&mut self, entity_type: &str, id: &T::Id, before: Option<&T>) {
        let count = self.subscribers.len();
        self.subscribers.retain(|sub| !sub.sender.is_closed());
        let released = count - self.subscribers.len();
        if released > 0 {
            debug!(entity_type, released, "Pruned subscribers");
        }

        let after = self.store.get(id);
        let mut notified = 0;
        for sub in &self.subscribers {
            let touched = before.is_some_and(|doc| sub.filter.matches(doc))
                || after.is_some_and(|doc| sub.filter.matches(doc));
            if touched {
                sub.sender.send_replace(self.snapshot(&sub.filter));
                notified += 1;
            }
        }
        debug!(entity_type, %id, notified, "Broadcast");
    }

    /// Runs the request loop until every client has been dropped.
    ///
    /// `context` is handed to every document hook.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let id = T::Id::from(self.next_id);
                    self.next_id += 1;

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    self.broadcast(entity_type, &id, None);
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let before = item.clone();
                    if let Err(e) = item.on_update(update, &context).await {
                        warn!(entity_type, %id, error = %e, "Update failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let updated = item.clone();
                    info!(entity_type, %id, "Updated");
                    self.broadcast(entity_type, &id, Some(&before));
                    let _ = respond_to.send(Ok(updated));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let Some(item) = self.store.get(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    if let Err(e) = item.on_delete(&context).await {
                        warn!(entity_type, %id, error = %e, "on_delete failed");
                        let _ = respond_to.send(Err(FrameworkError::EntityError(Box::new(e))));
                        continue;
                    }
                    let removed = self.store.remove(&id);
                    info!(entity_type, %id, size = self.store.len(), "Deleted");
                    self.broadcast(entity_type, &id, removed.as_ref());
                    let _ = respond_to.send(Ok(()));
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let mutates = T::action_mutates(&action);
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let before = mutates.then(|| item.clone());
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(|e| FrameworkError::EntityError(Box::new(e)));
                    match &result {
                        Ok(_) => {
                            info!(entity_type, %id, "Action ok");
                            if mutates {
                                self.broadcast(entity_type, &id, before.as_ref());
                            }
                        }
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Query { filter, respond_to } => {
                    let matches = self.snapshot(&filter);
                    debug!(entity_type, matched = matches.len(), "Query");
                    let _ = respond_to.send(Ok(matches));
                }
                ResourceRequest::Subscribe { filter, respond_to } => {
                    let (sender, receiver) = watch::channel(self.snapshot(&filter));
                    self.subscribers.push(Subscriber { filter, sender });
                    debug!(entity_type, subscribers = self.subscribers.len(), "Subscribed");
                    let _ = respond_to.send(Ok(Subscription::new(receiver)));
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}
