//! Cancellation: dispatch and publish honor a cancellation token.

mod common;

use common::{EchoHandler, Ping, TickEvent};
use courier::testing::RecordingSubscriber;
use courier::{EventBus, Handler, Mediator, Outcome, Request, SendError};
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn pre_cancelled_token_aborts_dispatch() {
    let mediator = Mediator::builder()
        .register_handler::<Ping, _>(EchoHandler)
        .build();

    let token = CancellationToken::new();
    token.cancel();

    let result = mediator.try_send_with(Ping { n: 1 }, &token).await;
    assert!(matches!(result, Err(SendError::Cancelled { .. })));
}

#[tokio::test]
async fn cancellation_unblocks_a_stuck_handler() {
    #[derive(Debug)]
    struct Stall;
    impl Request for Stall {
        type Response = Outcome<()>;
    }

    struct StallHandler;
    impl Handler<Stall> for StallHandler {
        async fn handle(&self, _request: Stall) -> Outcome<()> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Outcome::success(())
        }
    }

    let mediator = Mediator::builder()
        .register_handler::<Stall, _>(StallHandler)
        .build();

    let token = CancellationToken::new();
    let cancel = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();
    });

    let result = mediator.try_send_with(Stall, &token).await;
    assert!(matches!(result, Err(SendError::Cancelled { .. })));
}

#[tokio::test]
async fn unused_token_does_not_disturb_dispatch() {
    let mediator = Mediator::builder()
        .register_handler::<Ping, _>(EchoHandler)
        .build();

    let token = CancellationToken::new();
    let result = mediator.try_send_with(Ping { n: 4 }, &token).await;
    assert_eq!(result.unwrap(), Outcome::Success(8));
}

#[tokio::test]
async fn pre_cancelled_token_aborts_publish() {
    let bus = EventBus::new();
    let recorder = Arc::new(RecordingSubscriber::<TickEvent>::new());
    bus.subscribe::<TickEvent, _>(Arc::clone(&recorder));

    let token = CancellationToken::new();
    token.cancel();

    let result = bus.publish_with(TickEvent { tick: 1 }, &token).await;
    assert!(result.is_err());
    assert!(recorder.is_empty());
}

#[tokio::test]
async fn live_token_lets_publish_complete() {
    let bus = EventBus::new();
    let recorder = Arc::new(RecordingSubscriber::<TickEvent>::new());
    bus.subscribe::<TickEvent, _>(Arc::clone(&recorder));

    let token = CancellationToken::new();
    let result = bus
        .publish_all_with((1..=2).map(|tick| TickEvent { tick }), &token)
        .await;
    assert!(result.is_ok());
    assert_eq!(recorder.len(), 2);
}
