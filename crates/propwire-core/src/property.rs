#![forbid(unsafe_code)]

//! Observable value containers.
//!
//! # Design
//!
//! [`MutableObservableProperty<T>`] owns the value and is the only type that
//! can write it. It dereferences to [`ObservableProperty<T>`], the read-only
//! capability handed to consumers: read the value, subscribe, nothing else.
//!
//! `observe` does not call the new subscriber with the current value. A
//! consumer that needs initial synchronization reads `value()` first, then
//! subscribes.
//!
//! # Invariants
//!
//! 1. `set(v)` with `v == value()` stores nothing and notifies nobody.
//! 2. `set(v)` with `v != value()` stores `v`, bumps the version by one, then
//!    notifies each live subscriber once with `v`, in subscription order.
//! 3. `set_forced(v)` always stores, bumps, and notifies.
//! 4. The value is stored before any subscriber runs, so a subscriber reading
//!    `value()` sees at least the value it was called with.
//!
//! # Failure Modes
//!
//! - **Subscriber panics**: propagates out of `set` / `set_forced`. The new
//!   value is already stored; subscribers after the panicking one miss that
//!   notification.
//! - **Write inside `with`**: calling `set` on a property from inside its own
//!   [`with`](ObservableProperty::with) closure panics on the `RefCell`.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use crate::connection::ScopedConnection;
use crate::notifier::Notifier;

struct PropertyShared<T> {
    value: RefCell<T>,
    version: Cell<u64>,
    notifier: Notifier<T>,
}

/// Read-only view of an observable value.
///
/// Cloning creates another handle to the **same** property. Handles can read
/// and subscribe but never write; only the owning
/// [`MutableObservableProperty`] can.
pub struct ObservableProperty<T> {
    shared: Rc<PropertyShared<T>>,
}

impl<T> Clone for ObservableProperty<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObservableProperty")
            .field("id", &self.shared.notifier.id())
            .field("value", &*self.shared.value.borrow())
            .field("version", &self.shared.version.get())
            .finish()
    }
}

impl<T: 'static> ObservableProperty<T> {
    /// Current value.
    #[must_use]
    pub fn value(&self) -> T
    where
        T: Clone,
    {
        self.shared.value.borrow().clone()
    }

    /// Access the current value by reference without cloning.
    ///
    /// # Panics
    ///
    /// Panics if the closure writes to this same property.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.borrow())
    }

    /// Register `callback` for future notifications.
    ///
    /// The callback is not invoked with the current value. Delivery stops when
    /// the returned connection is released or dropped.
    pub fn observe(&self, callback: impl FnMut(&T) + 'static) -> ScopedConnection {
        self.shared.notifier.subscribe(callback)
    }

    /// Number of stored updates so far.
    #[inline]
    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.version.get()
    }

    /// Number of live subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.shared.notifier.len()
    }

    /// Process-unique identifier, used in log fields.
    #[inline]
    #[must_use]
    pub fn id(&self) -> u64 {
        self.shared.notifier.id()
    }
}

/// Owning, writable observable value.
///
/// Not `Clone`: a property has exactly one owner. Hand consumers
/// [`observable()`](Self::observable) or a `&ObservableProperty<T>` via deref.
pub struct MutableObservableProperty<T> {
    view: ObservableProperty<T>,
}

impl<T: fmt::Debug> fmt::Debug for MutableObservableProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("MutableObservableProperty")
            .field(&self.view)
            .finish()
    }
}

impl<T: Default + 'static> Default for MutableObservableProperty<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: 'static> MutableObservableProperty<T> {
    /// Create a property holding `initial`.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            view: ObservableProperty {
                shared: Rc::new(PropertyShared {
                    value: RefCell::new(initial),
                    version: Cell::new(0),
                    notifier: Notifier::new(),
                }),
            },
        }
    }

    /// A read-only handle to this property.
    #[must_use]
    pub fn observable(&self) -> ObservableProperty<T> {
        self.view.clone()
    }

    /// Store `value` and notify, unless it equals the current value.
    ///
    /// Returns whether subscribers were notified.
    pub fn set(&self, value: T) -> bool
    where
        T: Clone + PartialEq,
    {
        let unchanged = *self.view.shared.value.borrow() == value;
        if unchanged {
            return false;
        }
        self.store_and_notify(value, false);
        true
    }

    /// Store `value` and notify every live subscriber, even if it equals the
    /// current value.
    ///
    /// Use this when the producer, not `T`'s equality, decides that consumers
    /// must react (for example, a freshly recomputed curve).
    pub fn set_forced(&self, value: T)
    where
        T: Clone,
    {
        self.store_and_notify(value, true);
    }

    fn store_and_notify(&self, value: T, forced: bool)
    where
        T: Clone,
    {
        let shared = &self.view.shared;
        shared.value.replace(value.clone());
        let version = shared.version.get() + 1;
        shared.version.set(version);
        shared.notifier.notify(value, version, forced);
    }
}

impl<T> Deref for MutableObservableProperty<T> {
    type Target = ObservableProperty<T>;

    fn deref(&self) -> &Self::Target {
        &self.view
    }
}
