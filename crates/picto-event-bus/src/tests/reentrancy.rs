//! Mutation of the subscriber list during dispatch.

use super::{chat, log, TestEvent, TestKind};
use crate::{EventBus, Subscription};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn subscriber_added_during_dispatch_waits_for_next_publish() {
    let bus = EventBus::<TestEvent>::new();
    let seen = log();
    let added: Arc<Mutex<Vec<Subscription<TestEvent>>>> = Arc::new(Mutex::new(Vec::new()));

    let inner_bus = bus.clone();
    let sink = seen.clone();
    let holder = added.clone();
    let _adder = bus.subscribe(TestKind::Chat, move |_| {
        sink.lock().push("adder".into());
        if holder.lock().is_empty() {
            let late_sink = sink.clone();
            let late = inner_bus.subscribe(TestKind::Chat, move |_| {
                late_sink.lock().push("late".into());
            });
            holder.lock().push(late);
        }
    });

    bus.publish(chat("1"));
    assert_eq!(*seen.lock(), vec!["adder"]);

    bus.publish(chat("2"));
    assert_eq!(*seen.lock(), vec!["adder", "adder", "late"]);
}

#[test]
fn subscriber_removed_during_dispatch_is_not_invoked() {
    let bus = EventBus::<TestEvent>::new();
    let seen = log();
    let victim: Arc<Mutex<Option<Subscription<TestEvent>>>> = Arc::new(Mutex::new(None));

    let sink = seen.clone();
    let target = victim.clone();
    let _remover = bus.subscribe(TestKind::Chat, move |_| {
        sink.lock().push("remover".into());
        if let Some(sub) = target.lock().take() {
            sub.unsubscribe();
        }
    });

    let sink = seen.clone();
    *victim.lock() = Some(bus.subscribe(TestKind::Chat, move |_| {
        sink.lock().push("victim".into());
    }));

    let sink = seen.clone();
    let _bystander = bus.subscribe(TestKind::Chat, move |_| {
        sink.lock().push("bystander".into());
    });

    bus.publish(chat("x"));
    assert_eq!(*seen.lock(), vec!["remover", "bystander"]);
}

#[test]
fn self_unsubscribe_does_not_skip_siblings() {
    let bus = EventBus::<TestEvent>::new();
    let seen = log();
    let own: Arc<Mutex<Option<Subscription<TestEvent>>>> = Arc::new(Mutex::new(None));

    let sink = seen.clone();
    let _before = bus.subscribe(TestKind::Chat, move |_| sink.lock().push("before".into()));

    let sink = seen.clone();
    let handle = own.clone();
    *own.lock() = Some(bus.subscribe(TestKind::Chat, move |_| {
        sink.lock().push("quitter".into());
        if let Some(sub) = handle.lock().take() {
            sub.unsubscribe();
        }
    }));

    let sink = seen.clone();
    let _after = bus.subscribe(TestKind::Chat, move |_| sink.lock().push("after".into()));

    bus.publish(chat("1"));
    bus.publish(chat("2"));

    assert_eq!(
        *seen.lock(),
        vec!["before", "quitter", "after", "before", "after"]
    );
}

#[test]
fn nested_publish_of_same_kind_completes() {
    let bus = EventBus::<TestEvent>::new();
    let depth = Arc::new(AtomicUsize::new(0));
    let calls = Arc::new(AtomicUsize::new(0));

    let inner_bus = bus.clone();
    let d = depth.clone();
    let c = calls.clone();
    let _sub = bus.subscribe(TestKind::Chat, move |_| {
        c.fetch_add(1, Ordering::SeqCst);
        if d.fetch_add(1, Ordering::SeqCst) < 2 {
            inner_bus.publish(chat("nested"));
        }
    });

    bus.publish(chat("outer"));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[test]
fn callback_can_query_the_bus() {
    let bus = EventBus::<TestEvent>::new();
    let observed = Arc::new(AtomicUsize::new(usize::MAX));

    let inner_bus = bus.clone();
    let o = observed.clone();
    let _sub = bus.subscribe(TestKind::Chat, move |_| {
        o.store(inner_bus.subscriber_count(TestKind::Chat), Ordering::SeqCst);
    });

    bus.publish(chat("x"));
    assert_eq!(observed.load(Ordering::SeqCst), 1);
}
