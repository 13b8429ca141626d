use pm_event_bus::{EventBus, EventReceiverExt};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
struct Reading(u32);

#[derive(Clone, Debug, PartialEq, Eq)]
struct Connected(bool);

#[tokio::test]
async fn every_subscriber_sees_every_reading() {
    let bus = EventBus::new();
    let mut first = bus.subscribe::<Reading>().unwrap();
    let mut second = bus.subscribe::<Reading>().unwrap();

    assert_eq!(bus.publish(Reading(100)).unwrap(), 2);

    assert_eq!(first.recv().await.unwrap().0, 100);
    assert_eq!(second.recv().await.unwrap().0, 100);
}

#[tokio::test]
async fn publish_without_subscribers_is_dropped() {
    let bus = EventBus::new();
    assert_eq!(bus.publish(Reading(1)).unwrap(), 0);
}

#[tokio::test]
async fn lagging_receiver_skips_to_retained_tail() {
    let bus = EventBus::new();
    let capacity = 2;
    let mut rx = bus.subscribe_with_capacity::<Reading>(capacity).unwrap();

    for i in 0..50 {
        bus.publish(Reading(i)).unwrap();
    }

    let first = EventReceiverExt::recv(&mut rx).await.expect("should recover from lag");
    assert_eq!(first.0, 48);
    let second = EventReceiverExt::recv(&mut rx).await.expect("should keep receiving");
    assert_eq!(second.0, 49);
}

#[tokio::test]
async fn watch_delivers_latest_state() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe_watch(Connected(false)).unwrap();

    bus.publish_watch(Connected(true)).unwrap();

    let state = tokio::time::timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("watch should notify")
        .expect("channel open");
    assert_eq!(*state, Connected(true));
}

#[tokio::test]
async fn shutdown_closes_receivers() {
    let bus = EventBus::new();
    let mut rx = bus.subscribe::<Reading>().unwrap();

    bus.shutdown();

    assert!(EventReceiverExt::recv(&mut rx).await.is_none());
}
