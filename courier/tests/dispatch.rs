//! Mediator dispatch: routing, envelopes, behavior ordering, containment.

mod common;

use common::{EchoHandler, Ping};
use courier::testing::{CallCounter, OrderRecordingBehavior, PassthroughBehavior};
use courier::{Handler, Mediator, Outcome, Request, SendError};
use parking_lot::Mutex;
use std::sync::Arc;

#[tokio::test]
async fn routes_request_to_its_single_handler() {
    let mediator = Mediator::builder()
        .register_handler::<Ping, _>(EchoHandler)
        .build();

    let response = mediator.send(Ping { n: 5 }).await;
    assert_eq!(response, Outcome::Success(10));
}

#[tokio::test]
async fn try_send_reports_missing_handler() {
    let mediator = Mediator::builder().build();

    let result = mediator.try_send(Ping { n: 1 }).await;
    match result {
        Err(SendError::HandlerNotFound { request }) => {
            assert!(request.contains("Ping"));
        }
        other => panic!("expected HandlerNotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn send_wraps_missing_handler_in_failure_envelope() {
    let mediator = Mediator::builder().build();

    let response = mediator.send(Ping { n: 1 }).await;
    let message = response.failure_message().expect("failure expected");
    assert!(message.starts_with("Mediator error:"));
    assert!(message.contains("no handler registered"));
}

#[tokio::test]
async fn behaviors_nest_in_registration_order() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let mediator = Mediator::builder()
        .register_handler::<Ping, _>(EchoHandler)
        .behavior(OrderRecordingBehavior::new("a", Arc::clone(&log)))
        .behavior(PassthroughBehavior)
        .behavior(OrderRecordingBehavior::new("b", Arc::clone(&log)))
        .build();

    let response = mediator.send(Ping { n: 1 }).await;
    assert_eq!(response, Outcome::Success(2));
    // The passthrough stage between a and b leaves the interleaving intact.
    assert_eq!(
        *log.lock(),
        vec!["a:pre", "b:pre", "b:post", "a:post"]
    );
}

#[tokio::test]
async fn last_registration_for_a_type_wins() {
    let counter = CallCounter::new();
    let first_calls = counter.clone();
    let mediator = Mediator::builder()
        .register_handler::<Ping, _>(move |request: Ping| {
            let first_calls = first_calls.clone();
            async move {
                first_calls.increment();
                Outcome::success(request.n)
            }
        })
        .register_handler::<Ping, _>(EchoHandler)
        .build();

    let response = mediator.send(Ping { n: 3 }).await;
    assert_eq!(response, Outcome::Success(6));
    assert_eq!(counter.count(), 0);
}

#[tokio::test]
async fn handler_panic_becomes_failure_not_unwind() {
    struct Explode;

    #[derive(Debug)]
    struct Boom;
    impl Request for Boom {
        type Response = Outcome<()>;
    }

    impl Handler<Boom> for Explode {
        async fn handle(&self, _request: Boom) -> Outcome<()> {
            panic!("boom");
        }
    }

    let mediator = Mediator::builder()
        .register_handler::<Boom, _>(Explode)
        .build();

    let result = mediator.try_send(Boom).await;
    match result {
        Err(SendError::Panicked { message, .. }) => assert_eq!(message, "boom"),
        other => panic!("expected Panicked, got {other:?}"),
    }

    // The mediator stays usable after containing a panic.
    let response = mediator.send(Boom).await;
    assert!(response.is_failure());
}
