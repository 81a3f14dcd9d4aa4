//! Single-shot subscription tests.

use super::{chat, TestEvent, TestKind};
use crate::EventBus;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn once_fires_a_single_time() {
    let bus = EventBus::<TestEvent>::new();
    let count = Arc::new(AtomicUsize::new(0));

    let counter = count.clone();
    let sub = bus.once(TestKind::Chat, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    bus.publish(chat("x"));
    bus.publish(chat("x"));

    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!sub.is_active());
    assert!(!sub.unsubscribe());
    assert_eq!(bus.subscriber_count(TestKind::Chat), 0);
}

#[test]
fn once_survives_reentrant_publish() {
    let bus = EventBus::<TestEvent>::new();
    let count = Arc::new(AtomicUsize::new(0));

    let counter = count.clone();
    let inner_bus = bus.clone();
    let _sub = bus.once(TestKind::Chat, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        // Re-publishing the same kind from inside the callback must not
        // deliver to this callback again.
        inner_bus.publish(chat("nested"));
    });

    bus.publish(chat("outer"));
    bus.publish(chat("again"));

    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[test]
fn once_can_be_cancelled_before_firing() {
    let bus = EventBus::<TestEvent>::new();
    let count = Arc::new(AtomicUsize::new(0));

    let counter = count.clone();
    let sub = bus.once(TestKind::Chat, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    assert!(sub.unsubscribe());
    bus.publish(chat("x"));
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn once_does_not_disturb_regular_subscribers() {
    let bus = EventBus::<TestEvent>::new();
    let regular = Arc::new(AtomicUsize::new(0));
    let single = Arc::new(AtomicUsize::new(0));

    let r = regular.clone();
    let _regular_sub = bus.subscribe(TestKind::Chat, move |_| {
        r.fetch_add(1, Ordering::SeqCst);
    });
    let s = single.clone();
    let _once_sub = bus.once(TestKind::Chat, move |_| {
        s.fetch_add(1, Ordering::SeqCst);
    });

    bus.publish(chat("1"));
    bus.publish(chat("2"));

    assert_eq!(regular.load(Ordering::SeqCst), 2);
    assert_eq!(single.load(Ordering::SeqCst), 1);
}
