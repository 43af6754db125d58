//! Event bus contracts.
//!
//! Events are data-only values broadcast to zero or more independent
//! subscribers; they are not tied to a single handler the way requests are.
//! Each subscriber invocation is isolated: one subscriber's failure never
//! reaches the publisher or its siblings.

use crate::error::BoxError;
use std::{any::Any, future::Future, marker::PhantomData, pin::Pin, sync::Arc};

/// A marker trait for domain notifications.
///
/// Events must be `Send + Sync + 'static` to be safe for async fan-out.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Event",
    label = "must be `Send + Sync + 'static`",
    note = "All events published on the bus must be thread-safe and static."
)]
pub trait Event: Send + Sync + 'static {}

// Common Event implementations
impl Event for () {}
impl Event for String {}
impl Event for &'static str {}
impl<T: Event> Event for Box<T> {}
impl<T: Event> Event for Arc<T> {}
impl<T: Event> Event for Vec<T> {}
impl<T: Event> Event for Option<T> {}

/// A fire-and-forget callback for one event type.
///
/// Subscribers receive the event by reference (the same event value fans out
/// to every subscriber in the batch). An `Err` return is logged and discarded
/// at the bus boundary; it never aborts delivery to sibling subscribers.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot subscribe to events of type `{E}`",
    label = "missing `EventSubscriber<{E}>` implementation",
    note = "Subscribers implement `on_event(&{E}) -> Result<(), BoxError>`."
)]
pub trait EventSubscriber<E: Event>: Send + Sync + 'static {
    /// Called for each published event of type `E`.
    fn on_event(&self, event: &E) -> impl Future<Output = Result<(), BoxError>> + Send;
}

/// Object-safe, type-erased subscriber stored in the bus registry.
pub trait DynSubscriber: Send + Sync + 'static {
    /// Deliver an erased event payload to the underlying subscriber.
    fn deliver<'a>(
        &'a self,
        event: &'a (dyn Any + Send + Sync),
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>>;
}

/// Adapter that erases a typed [`EventSubscriber`] into a [`DynSubscriber`].
///
/// The subscriber is held behind `Arc`; the pointer doubles as the
/// subscriber's identity for idempotent subscribe and for unsubscribe.
pub struct SubscriberAdapter<E, S> {
    subscriber: Arc<S>,
    _event: PhantomData<fn(E)>,
}

impl<E: Event, S: EventSubscriber<E>> SubscriberAdapter<E, S> {
    /// Wrap a shared subscriber for storage in the bus registry.
    pub fn new(subscriber: Arc<S>) -> Self {
        Self {
            subscriber,
            _event: PhantomData,
        }
    }

    /// The identity of the wrapped subscriber (its `Arc` pointer).
    pub fn identity(&self) -> usize {
        Arc::as_ptr(&self.subscriber) as *const () as usize
    }
}

impl<E: Event, S: EventSubscriber<E>> DynSubscriber for SubscriberAdapter<E, S> {
    fn deliver<'a>(
        &'a self,
        event: &'a (dyn Any + Send + Sync),
    ) -> Pin<Box<dyn Future<Output = Result<(), BoxError>> + Send + 'a>> {
        Box::pin(async move {
            match event.downcast_ref::<E>() {
                Some(event) => self.subscriber.on_event(event).await,
                // Bus registry is keyed by TypeId; foreign payloads are skipped.
                None => Ok(()),
            }
        })
    }
}
