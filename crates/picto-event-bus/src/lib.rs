//! # Picto Event Bus
//!
//! A synchronous publish/subscribe register keyed by a closed set of event
//! kinds.
//!
//! ## Dispatch Rules
//!
//! - Subscribers of a kind run in registration order, on the publisher's thread
//! - The payload is passed by reference, never cloned
//! - The subscriber list is snapshotted when dispatch starts: subscribers added
//!   during dispatch wait for the next publish, subscribers removed during
//!   dispatch are skipped from that point on
//! - No lock is held while a callback runs, so callbacks may publish,
//!   subscribe and unsubscribe freely
//! - A panicking callback is caught and logged; its siblings still run
//!
//! ## Example
//!
//! ```rust
//! use picto_event_bus::{BusEvent, EventBus};
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//!
//! #[derive(Debug)]
//! enum Ping { Ping(u32) }
//!
//! impl BusEvent for Ping {
//!     type Kind = &'static str;
//!     fn kind(&self) -> Self::Kind { "ping" }
//! }
//!
//! let bus = EventBus::<Ping>::new();
//! let seen = Arc::new(AtomicUsize::new(0));
//! let counter = seen.clone();
//! let sub = bus.subscribe("ping", move |_| { counter.fetch_add(1, Ordering::SeqCst); });
//!
//! bus.publish(Ping::Ping(1));
//! sub.unsubscribe();
//! bus.publish(Ping::Ping(2));
//!
//! assert_eq!(seen.load(Ordering::SeqCst), 1);
//! ```

mod bus;
mod subscription;

#[cfg(test)]
mod tests;

pub use bus::{BusEvent, EventBus};
pub use subscription::{Subscription, SubscriptionId};
