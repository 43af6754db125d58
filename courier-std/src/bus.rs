//! In-process event bus with snapshot publish semantics.

use courier_core::{
    DynSubscriber, Event, EventSubscriber, PublishCancelled, SubscriberAdapter,
};
use futures::FutureExt;
use parking_lot::Mutex;
use std::{any::TypeId, collections::HashMap, panic::AssertUnwindSafe, sync::Arc};
use tokio_util::sync::CancellationToken;

struct SubscriberEntry {
    identity: usize,
    subscriber: Arc<dyn DynSubscriber>,
}

/// Broadcasts events to the subscribers registered for their type.
///
/// # Snapshot semantics
///
/// Each publish snapshots the subscriber list for the event's type and then
/// releases the registry lock before any delivery. Subscribers added or
/// removed during an in-flight publish do not affect that publish, and a
/// subscriber may re-enter the bus (subscribe, unsubscribe, publish) from
/// inside its own callback without deadlocking.
///
/// # Isolation
///
/// Subscribers run sequentially in registration order. A subscriber that
/// returns `Err` or panics is logged and skipped; the remaining subscribers
/// still run and the publisher never observes the failure.
pub struct EventBus {
    subscribers: Mutex<HashMap<TypeId, Vec<SubscriberEntry>>>,
}

impl EventBus {
    /// Create an empty bus.
    pub fn new() -> Self {
        Self {
            subscribers: Mutex::new(HashMap::new()),
        }
    }

    /// Register a subscriber for events of type `E`.
    ///
    /// Registration is idempotent per `Arc` pointer: subscribing the same
    /// `Arc` twice keeps a single entry in its original position.
    pub fn subscribe<E, S>(&self, subscriber: Arc<S>)
    where
        E: Event,
        S: EventSubscriber<E>,
    {
        let adapter = SubscriberAdapter::new(subscriber);
        let identity = adapter.identity();
        let mut map = self.subscribers.lock();
        let entries = map.entry(TypeId::of::<E>()).or_default();
        if entries.iter().any(|entry| entry.identity == identity) {
            return;
        }
        entries.push(SubscriberEntry {
            identity,
            subscriber: Arc::new(adapter),
        });
    }

    /// Remove a previously registered subscriber for events of type `E`.
    ///
    /// Unknown subscribers are a no-op.
    pub fn unsubscribe<E, S>(&self, subscriber: &Arc<S>)
    where
        E: Event,
        S: EventSubscriber<E>,
    {
        let identity = Arc::as_ptr(subscriber) as *const () as usize;
        let mut map = self.subscribers.lock();
        if let Some(entries) = map.get_mut(&TypeId::of::<E>()) {
            entries.retain(|entry| entry.identity != identity);
            if entries.is_empty() {
                map.remove(&TypeId::of::<E>());
            }
        }
    }

    /// Number of subscribers currently registered for events of type `E`.
    pub fn subscriber_count<E: Event>(&self) -> usize {
        self.subscribers
            .lock()
            .get(&TypeId::of::<E>())
            .map_or(0, Vec::len)
    }

    /// Publish one event to every subscriber of its type.
    ///
    /// Zero subscribers is a silent no-op.
    pub async fn publish<E: Event>(&self, event: E) {
        self.fan_out(&event, None).await.ok();
    }

    /// Publish one event, checking a cancellation signal between subscribers.
    ///
    /// A subscriber already running is not interrupted; cancellation takes
    /// effect before the next delivery and returns [`PublishCancelled`].
    pub async fn publish_with<E: Event>(
        &self,
        event: E,
        cancel: &CancellationToken,
    ) -> Result<(), PublishCancelled> {
        self.fan_out(&event, Some(cancel)).await
    }

    /// Publish a batch of events in order.
    pub async fn publish_all<E, I>(&self, events: I)
    where
        E: Event,
        I: IntoIterator<Item = E>,
    {
        for event in events {
            self.publish(event).await;
        }
    }

    /// Publish a batch of events in order, stopping at the first event not
    /// fully delivered before cancellation.
    pub async fn publish_all_with<E, I>(
        &self,
        events: I,
        cancel: &CancellationToken,
    ) -> Result<(), PublishCancelled>
    where
        E: Event,
        I: IntoIterator<Item = E>,
    {
        for event in events {
            self.publish_with(event, cancel).await?;
        }
        Ok(())
    }

    async fn fan_out<E: Event>(
        &self,
        event: &E,
        cancel: Option<&CancellationToken>,
    ) -> Result<(), PublishCancelled> {
        let snapshot: Vec<Arc<dyn DynSubscriber>> = {
            let map = self.subscribers.lock();
            match map.get(&TypeId::of::<E>()) {
                Some(entries) => entries
                    .iter()
                    .map(|entry| Arc::clone(&entry.subscriber))
                    .collect(),
                None => return Ok(()),
            }
        };

        let event_name = std::any::type_name::<E>();
        for subscriber in snapshot {
            if cancel.is_some_and(CancellationToken::is_cancelled) {
                tracing::debug!(event = event_name, "publish cancelled");
                return Err(PublishCancelled);
            }

            let delivery = AssertUnwindSafe(subscriber.deliver(event)).catch_unwind();
            match delivery.await {
                Ok(Ok(())) => {}
                Ok(Err(err)) => {
                    tracing::warn!(
                        event = event_name,
                        error = %err,
                        "subscriber failed; continuing delivery"
                    );
                }
                Err(_) => {
                    tracing::warn!(
                        event = event_name,
                        "subscriber panicked; continuing delivery"
                    );
                }
            }
        }
        Ok(())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
