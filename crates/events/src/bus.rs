//! Event publishing/subscription abstraction (mechanics only).
//!
//! The bus is the push half of the store's read surface: views that would
//! rather be told about a change than re-read after every call subscribe here.
//!
//! - **Transport-agnostic**: the trait makes no assumption about channels
//! - **Broadcast**: every subscription receives every message published after it
//!   was created
//! - **No persistence**: a subscriber that joins late re-reads the store instead
//!   of replaying history

use std::sync::Arc;
use std::sync::mpsc::Receiver;

/// A subscription to an event stream.
///
/// ## Usage Pattern
///
/// ```ignore
/// let subscription = store.subscribe();
/// store.acknowledge_alert(&"a1".into())?;
///
/// while let Ok(event) = subscription.try_recv() {
///     redraw(&store, &event);
/// }
/// ```
///
/// Subscriptions are designed for single-threaded consumption; dropping one
/// unregisters it on the next publish.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Collect every message that is already queued, without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// ```text
/// store mutation (applied) → EventBus::publish → Subscriptions
///                                                  ├─ table view
///                                                  ├─ alerts panel
///                                                  └─ log / export
/// ```
///
/// `publish()` can fail; callers decide whether that matters. The store
/// treats notification failure as non-fatal because its state is already
/// consistent and readers can always re-read.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
