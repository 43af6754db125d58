//! Event bus: fan-out, isolation, identity, ordering.

mod common;

use common::TickEvent;
use courier::testing::{FailingSubscriber, PanickingSubscriber, RecordingSubscriber};
use courier::EventBus;
use std::sync::Arc;

#[tokio::test]
async fn publishing_with_no_subscribers_is_a_noop() {
    let bus = EventBus::new();
    bus.publish(TickEvent { tick: 1 }).await;
    assert_eq!(bus.subscriber_count::<TickEvent>(), 0);
}

#[tokio::test]
async fn every_subscriber_receives_the_event() {
    let bus = EventBus::new();
    let first = Arc::new(RecordingSubscriber::<TickEvent>::new());
    let second = Arc::new(RecordingSubscriber::<TickEvent>::new());
    bus.subscribe::<TickEvent, _>(Arc::clone(&first));
    bus.subscribe::<TickEvent, _>(Arc::clone(&second));

    bus.publish(TickEvent { tick: 7 }).await;

    assert_eq!(first.events(), vec![TickEvent { tick: 7 }]);
    assert_eq!(second.events(), vec![TickEvent { tick: 7 }]);
}

#[tokio::test]
async fn failing_subscriber_does_not_block_siblings() {
    let bus = EventBus::new();
    let recorder = Arc::new(RecordingSubscriber::<TickEvent>::new());
    bus.subscribe::<TickEvent, _>(Arc::new(FailingSubscriber));
    bus.subscribe::<TickEvent, _>(Arc::clone(&recorder));

    bus.publish(TickEvent { tick: 1 }).await;

    assert_eq!(recorder.len(), 1);
}

#[tokio::test]
async fn panicking_subscriber_does_not_block_siblings() {
    let bus = EventBus::new();
    let recorder = Arc::new(RecordingSubscriber::<TickEvent>::new());
    bus.subscribe::<TickEvent, _>(Arc::new(PanickingSubscriber));
    bus.subscribe::<TickEvent, _>(Arc::clone(&recorder));

    bus.publish(TickEvent { tick: 1 }).await;

    assert_eq!(recorder.len(), 1);
}

#[tokio::test]
async fn subscribing_the_same_arc_twice_registers_once() {
    let bus = EventBus::new();
    let recorder = Arc::new(RecordingSubscriber::<TickEvent>::new());
    bus.subscribe::<TickEvent, _>(Arc::clone(&recorder));
    bus.subscribe::<TickEvent, _>(Arc::clone(&recorder));
    assert_eq!(bus.subscriber_count::<TickEvent>(), 1);

    bus.publish(TickEvent { tick: 1 }).await;
    assert_eq!(recorder.len(), 1);
}

#[tokio::test]
async fn unsubscribed_subscriber_stops_receiving() {
    let bus = EventBus::new();
    let recorder = Arc::new(RecordingSubscriber::<TickEvent>::new());
    bus.subscribe::<TickEvent, _>(Arc::clone(&recorder));

    bus.publish(TickEvent { tick: 1 }).await;
    bus.unsubscribe::<TickEvent, _>(&recorder);
    bus.publish(TickEvent { tick: 2 }).await;

    assert_eq!(recorder.events(), vec![TickEvent { tick: 1 }]);
    assert_eq!(bus.subscriber_count::<TickEvent>(), 0);
}

#[tokio::test]
async fn unsubscribing_an_unknown_subscriber_is_a_noop() {
    let bus = EventBus::new();
    let stranger = Arc::new(RecordingSubscriber::<TickEvent>::new());
    bus.unsubscribe::<TickEvent, _>(&stranger);
    assert_eq!(bus.subscriber_count::<TickEvent>(), 0);
}

#[tokio::test]
async fn batch_publish_preserves_event_order() {
    let bus = EventBus::new();
    let recorder = Arc::new(RecordingSubscriber::<TickEvent>::new());
    bus.subscribe::<TickEvent, _>(Arc::clone(&recorder));

    bus.publish_all((1..=3).map(|tick| TickEvent { tick })).await;

    assert_eq!(
        recorder.events(),
        vec![
            TickEvent { tick: 1 },
            TickEvent { tick: 2 },
            TickEvent { tick: 3 }
        ]
    );
}

#[tokio::test]
async fn subscribers_are_keyed_by_event_type() {
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct OtherEvent;
    impl courier::Event for OtherEvent {}

    let bus = EventBus::new();
    let ticks = Arc::new(RecordingSubscriber::<TickEvent>::new());
    let others = Arc::new(RecordingSubscriber::<OtherEvent>::new());
    bus.subscribe::<TickEvent, _>(Arc::clone(&ticks));
    bus.subscribe::<OtherEvent, _>(Arc::clone(&others));

    bus.publish(TickEvent { tick: 9 }).await;

    assert_eq!(ticks.len(), 1);
    assert!(others.is_empty());
}
