//! # Requests
//!
//! The messages a [`ResourceClient`](crate::ResourceClient) sends to its actor.

use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::subscription::Subscription;
use std::fmt;
use std::sync::Arc;
use tokio::sync::oneshot;

/// One-shot reply channel carried by every request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// A predicate selecting documents for a query or a subscription.
pub struct Filter<T> {
    predicate: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
        }
    }

    /// Matches every document in the collection.
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    pub fn matches(&self, item: &T) -> bool {
        (self.predicate)(item)
    }
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Request sent to a [`ResourceActor`](crate::ResourceActor).
///
/// CRUD variants map one-to-one onto the document lifecycle. `Action` carries a
/// document-specific operation. `Query` and `Subscribe` read the collection by predicate,
/// once or continuously.
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
    Query {
        filter: Filter<T>,
        respond_to: Response<Vec<T>>,
    },
    Subscribe {
        filter: Filter<T>,
        respond_to: Response<Subscription<T>>,
    },
}
