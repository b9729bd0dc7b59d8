#![forbid(unsafe_code)]

//! Observable properties for reactive view-model pipelines.
//!
//! This crate provides the change-notification primitives that wire a model,
//! its derived view-models, and the display layer together:
//!
//! - [`ObservableProperty`]: read-only, clonable view of a value with
//!   subscriber callbacks.
//! - [`MutableObservableProperty`]: the owning side; `set` notifies only on
//!   change, `set_forced` notifies unconditionally.
//! - [`LiveObservableProperty`]: a mutable property bound to an external
//!   control through two distinct write paths, so a control update never
//!   echoes back into the control and a model update never re-enters the
//!   property.
//! - [`ScopedConnection`]: RAII handle for one subscription.
//! - [`Derivation`]: eager derivation stage that recomputes and force-publishes
//!   its output whenever an upstream property or a local input changes.
//!
//! # Architecture
//!
//! Properties use `Rc<RefCell<..>>` for single-threaded shared ownership.
//! Connections keep only a `Weak` reference to the property they came from,
//! so releasing a connection after its property is gone is a no-op.
//!
//! # Invariants
//!
//! 1. `set` with a value equal to the current one is a no-op (no version bump,
//!    no notifications).
//! 2. `set_forced` notifies every live subscriber exactly once.
//! 3. Subscribers are notified in registration order.
//! 4. A released [`ScopedConnection`] is never invoked again, including later
//!    in a dispatch that is already running.
//! 5. `value()` is never older than a notification already delivered.
//!
//! # Execution context
//!
//! All types here are `!Send` and `!Sync`. Every mutation and every
//! notification happens on the thread that created the property; producers
//! elsewhere must marshal onto that thread first. The compiler enforces this:
//!
//! ```compile_fail
//! use propwire_core::MutableObservableProperty;
//!
//! let cutoff = MutableObservableProperty::new(100.0_f64);
//! std::thread::spawn(move || {
//!     cutoff.set(250.0);
//! });
//! ```
//!
//! # Example
//!
//! ```
//! use propwire_core::{Derivation, MutableObservableProperty};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! let source = MutableObservableProperty::new(100.0_f64);
//! let mut doubled = Derivation::new(source.value(), |x: &f64| x * 2.0);
//! doubled.track(&source, |input, v| *input = *v);
//!
//! let seen = Rc::new(Cell::new(0.0));
//! let sink = Rc::clone(&seen);
//! let _conn = doubled.output().observe(move |v| sink.set(*v));
//!
//! source.set(250.0);
//! assert_eq!(doubled.value(), 500.0);
//! assert_eq!(seen.get(), 500.0);
//! ```

pub mod connection;
pub mod derivation;
pub mod live;
mod notifier;
pub mod property;

pub use connection::ScopedConnection;
pub use derivation::Derivation;
pub use live::LiveObservableProperty;
pub use property::{MutableObservableProperty, ObservableProperty};
