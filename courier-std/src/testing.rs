//! Test doubles for exercising mediators and buses.
//!
//! These are ordinary library types so downstream crates can use them in
//! their own integration tests.

use courier_core::{
    Behavior, BehaviorFuture, BoxError, BoxRequest, Event, EventSubscriber, Next, RequestMeta,
};
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

/// Subscriber that records every event it receives.
pub struct RecordingSubscriber<E> {
    events: Mutex<Vec<E>>,
}

impl<E: Event + Clone> RecordingSubscriber<E> {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    /// All events received so far, in delivery order.
    pub fn events(&self) -> Vec<E> {
        self.events.lock().clone()
    }

    /// How many events have been received.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Whether no events have been received.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl<E: Event + Clone> Default for RecordingSubscriber<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event + Clone> EventSubscriber<E> for RecordingSubscriber<E> {
    async fn on_event(&self, event: &E) -> Result<(), BoxError> {
        self.events.lock().push(event.clone());
        Ok(())
    }
}

/// Subscriber that always fails, for exercising delivery isolation.
pub struct FailingSubscriber;

impl<E: Event> EventSubscriber<E> for FailingSubscriber {
    async fn on_event(&self, _event: &E) -> Result<(), BoxError> {
        Err("subscriber failed".into())
    }
}

/// Subscriber that always panics, for exercising panic isolation.
pub struct PanickingSubscriber;

impl<E: Event> EventSubscriber<E> for PanickingSubscriber {
    async fn on_event(&self, _event: &E) -> Result<(), BoxError> {
        panic!("subscriber panicked");
    }
}

/// Shared call counter for handlers under test.
///
/// Clone the counter before moving the handler into the builder, then assert
/// on `count()` afterwards.
#[derive(Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call.
    pub fn increment(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// Calls recorded so far.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

/// Behavior that records its position in the chain.
///
/// Pushes `"<label>:pre"` before delegating and `"<label>:post"` after, so a
/// test can assert the exact interleaving of several behaviors around the
/// handler.
pub struct OrderRecordingBehavior {
    label: &'static str,
    log: Arc<Mutex<Vec<String>>>,
}

impl OrderRecordingBehavior {
    /// Create a recorder writing into a shared log.
    pub fn new(label: &'static str, log: Arc<Mutex<Vec<String>>>) -> Self {
        Self { label, log }
    }
}

impl Behavior for OrderRecordingBehavior {
    fn handle<'a>(
        &'a self,
        _meta: &'a RequestMeta,
        request: BoxRequest,
        next: Next<'a>,
    ) -> BehaviorFuture<'a> {
        Box::pin(async move {
            self.log.lock().push(format!("{}:pre", self.label));
            let result = next.run(request).await;
            self.log.lock().push(format!("{}:post", self.label));
            result
        })
    }
}

/// Behavior that forwards the request untouched.
pub struct PassthroughBehavior;

impl Behavior for PassthroughBehavior {
    fn handle<'a>(
        &'a self,
        _meta: &'a RequestMeta,
        request: BoxRequest,
        next: Next<'a>,
    ) -> BehaviorFuture<'a> {
        next.run(request)
    }
}
