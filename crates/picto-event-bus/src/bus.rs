//! The event bus and its subscriber registry.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{error, trace};

use crate::subscription::{Subscription, SubscriptionId};

/// An event that can travel over an [`EventBus`].
///
/// `Kind` is the subscription key: a fieldless discriminant shared by every
/// payload of the same event name.
pub trait BusEvent: Send + Sync + 'static {
    type Kind: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    fn kind(&self) -> Self::Kind;
}

type Callback<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// One registered callback.
struct Registration<E> {
    id: SubscriptionId,
    callback: Callback<E>,
    /// Cleared by unsubscribe, or by the first delivery of a `once` callback.
    active: Arc<AtomicBool>,
    once: bool,
}

impl<E> Clone for Registration<E> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            callback: Arc::clone(&self.callback),
            active: Arc::clone(&self.active),
            once: self.once,
        }
    }
}

/// Shared subscriber table. Subscriptions hold a weak reference to it.
pub(crate) struct Registry<E: BusEvent> {
    next_id: AtomicU64,
    subscribers: Mutex<HashMap<E::Kind, Vec<Registration<E>>>>,
}

impl<E: BusEvent> Registry<E> {
    /// Drops the registration `id` from `kind`'s list.
    pub(crate) fn remove(&self, kind: E::Kind, id: SubscriptionId) {
        let mut subscribers = self.subscribers.lock();
        if let Some(list) = subscribers.get_mut(&kind) {
            list.retain(|registration| registration.id != id);
            if list.is_empty() {
                subscribers.remove(&kind);
            }
        }
    }
}

/// A synchronous publish/subscribe register.
///
/// Cloning yields another handle to the same register.
pub struct EventBus<E: BusEvent> {
    registry: Arc<Registry<E>>,
}

impl<E: BusEvent> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
        }
    }
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> EventBus<E> {
    /// Creates a register with no subscribers.
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                next_id: AtomicU64::new(1),
                subscribers: Mutex::new(HashMap::new()),
            }),
        }
    }

    /// Registers `callback` for every future event of `kind`.
    ///
    /// The returned handle removes exactly this registration.
    pub fn subscribe<F>(&self, kind: E::Kind, callback: F) -> Subscription<E>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.register(kind, Arc::new(callback), false)
    }

    /// Registers `callback` for the next event of `kind` only.
    ///
    /// The callback fires at most once, even when the event is published
    /// again from inside the callback itself.
    pub fn once<F>(&self, kind: E::Kind, callback: F) -> Subscription<E>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.register(kind, Arc::new(callback), true)
    }

    fn register(&self, kind: E::Kind, callback: Callback<E>, once: bool) -> Subscription<E> {
        let id = SubscriptionId(self.registry.next_id.fetch_add(1, Ordering::Relaxed));
        let active = Arc::new(AtomicBool::new(true));

        self.registry
            .subscribers
            .lock()
            .entry(kind)
            .or_default()
            .push(Registration {
                id,
                callback,
                active: Arc::clone(&active),
                once,
            });

        trace!(?kind, id = id.0, once, "subscribed");
        Subscription::new(id, kind, active, Arc::downgrade(&self.registry))
    }

    /// Delivers `event` to every subscriber of its kind.
    ///
    /// Returns the number of callbacks invoked. Publishing to a kind nobody
    /// listens to is a no-op.
    pub fn publish(&self, event: E) -> usize {
        self.dispatch(&event)
    }

    /// Same as [`publish`](Self::publish) for a borrowed event.
    pub fn dispatch(&self, event: &E) -> usize {
        let kind = event.kind();
        let snapshot: Vec<Registration<E>> = match self.registry.subscribers.lock().get(&kind) {
            Some(list) => list.clone(),
            None => return 0,
        };

        let mut delivered = 0;
        for registration in snapshot {
            if registration.once {
                // Claim the single delivery before running the callback so a
                // nested publish cannot fire it again.
                if !registration.active.swap(false, Ordering::SeqCst) {
                    continue;
                }
                self.registry.remove(kind, registration.id);
            } else if !registration.active.load(Ordering::SeqCst) {
                continue;
            }

            let callback = &registration.callback;
            if let Err(payload) = panic::catch_unwind(AssertUnwindSafe(|| callback(event))) {
                error!(
                    ?kind,
                    id = registration.id.0,
                    panic = %panic_message(payload.as_ref()),
                    "event subscriber panicked"
                );
            }
            delivered += 1;
        }

        delivered
    }

    /// Number of live registrations for `kind`.
    pub fn subscriber_count(&self, kind: E::Kind) -> usize {
        self.registry
            .subscribers
            .lock()
            .get(&kind)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// Removes every registration.
    pub fn clear(&self) {
        let mut subscribers = self.registry.subscribers.lock();
        for registration in subscribers.values().flatten() {
            registration.active.store(false, Ordering::SeqCst);
        }
        subscribers.clear();
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
