//! Subscription handles.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use crate::bus::{BusEvent, Registry};

/// Identity of one registration. Unique per bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Capability to remove one registration from its bus.
///
/// Dropping the handle leaves the registration in place.
pub struct Subscription<E: BusEvent> {
    id: SubscriptionId,
    kind: E::Kind,
    active: Arc<AtomicBool>,
    registry: Weak<Registry<E>>,
}

impl<E: BusEvent> Subscription<E> {
    pub(crate) fn new(
        id: SubscriptionId,
        kind: E::Kind,
        active: Arc<AtomicBool>,
        registry: Weak<Registry<E>>,
    ) -> Self {
        Self {
            id,
            kind,
            active,
            registry,
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn kind(&self) -> E::Kind {
        self.kind
    }

    /// Whether the callback can still fire.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Removes this registration.
    ///
    /// Returns `false` if it was already removed (or a `once` callback
    /// already fired). Takes effect immediately, including for a dispatch
    /// that is currently in progress.
    pub fn unsubscribe(&self) -> bool {
        if !self.active.swap(false, Ordering::SeqCst) {
            return false;
        }
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.kind, self.id);
        }
        true
    }
}

impl<E: BusEvent> fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("active", &self.is_active())
            .finish()
    }
}
