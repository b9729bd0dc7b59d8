#![forbid(unsafe_code)]

//! Subscriber list and synchronous dispatch shared by every property type.
//!
//! # Dispatch policy
//!
//! A dispatch snapshots the subscriber list when it starts. Each entry's
//! liveness flag is checked right before its turn, so a subscriber released
//! mid-dispatch is skipped. Subscribers registered mid-dispatch wait for the
//! next dispatch.
//!
//! A notification requested while this notifier is already dispatching is
//! queued and delivered after the current wave, in request order. Callbacks
//! are therefore never re-entered.
//!
//! # Failure Modes
//!
//! - **Subscriber panics**: the panic unwinds to whoever triggered the
//!   dispatch. The dispatch guard resets the in-progress flag and discards
//!   queued notifications, so the notifier stays usable.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, trace};

use crate::connection::ScopedConnection;

static NEXT_NOTIFIER_ID: AtomicU64 = AtomicU64::new(1);

fn next_notifier_id() -> u64 {
    NEXT_NOTIFIER_ID.fetch_add(1, Ordering::Relaxed)
}

type Callback<T> = Rc<RefCell<dyn FnMut(&T)>>;

struct Subscriber<T> {
    key: u64,
    live: Rc<Cell<bool>>,
    callback: Callback<T>,
}

impl<T> Clone for Subscriber<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key,
            live: Rc::clone(&self.live),
            callback: Rc::clone(&self.callback),
        }
    }
}

struct NotifierInner<T> {
    id: u64,
    subscribers: RefCell<Vec<Subscriber<T>>>,
    next_key: Cell<u64>,
    dispatching: Cell<bool>,
    queued: RefCell<VecDeque<T>>,
}

impl<T> NotifierInner<T> {
    /// The removed entry is dropped after the list borrow ends, since its
    /// callback may own connections to this same notifier.
    fn remove(&self, key: u64) {
        let removed = {
            let mut subscribers = self.subscribers.borrow_mut();
            subscribers
                .iter()
                .position(|s| s.key == key)
                .map(|index| subscribers.remove(index))
        };
        debug!(property = self.id, key, "subscriber released");
        drop(removed);
    }
}

/// Resets dispatch state even when a subscriber unwinds.
struct DispatchGuard<'a, T> {
    inner: &'a NotifierInner<T>,
}

impl<'a, T> DispatchGuard<'a, T> {
    fn enter(inner: &'a NotifierInner<T>) -> Self {
        inner.dispatching.set(true);
        Self { inner }
    }
}

impl<T> Drop for DispatchGuard<'_, T> {
    fn drop(&mut self) {
        self.inner.dispatching.set(false);
        self.inner.queued.borrow_mut().clear();
    }
}

pub(crate) struct Notifier<T> {
    inner: Rc<NotifierInner<T>>,
}

impl<T> Notifier<T> {
    #[inline]
    pub(crate) fn id(&self) -> u64 {
        self.inner.id
    }

    pub(crate) fn len(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }
}

impl<T: 'static> Notifier<T> {
    pub(crate) fn new() -> Self {
        Self {
            inner: Rc::new(NotifierInner {
                id: next_notifier_id(),
                subscribers: RefCell::new(Vec::new()),
                next_key: Cell::new(0),
                dispatching: Cell::new(false),
                queued: RefCell::new(VecDeque::new()),
            }),
        }
    }

    pub(crate) fn subscribe(&self, callback: impl FnMut(&T) + 'static) -> ScopedConnection {
        let key = self.inner.next_key.get();
        self.inner.next_key.set(key + 1);

        let live = Rc::new(Cell::new(true));
        let callback: Callback<T> = Rc::new(RefCell::new(callback));
        self.inner.subscribers.borrow_mut().push(Subscriber {
            key,
            live: Rc::clone(&live),
            callback,
        });
        debug!(property = self.inner.id, key, "subscriber added");

        let weak: Weak<NotifierInner<T>> = Rc::downgrade(&self.inner);
        ScopedConnection::new(move || {
            live.set(false);
            if let Some(inner) = weak.upgrade() {
                inner.remove(key);
            }
        })
    }

    /// Deliver `value` to every live subscriber, or queue it behind the
    /// dispatch already in progress.
    pub(crate) fn notify(&self, value: T, version: u64, forced: bool) {
        if self.inner.dispatching.get() {
            trace!(property = self.inner.id, version, "nested notification queued");
            self.inner.queued.borrow_mut().push_back(value);
            return;
        }

        let _guard = DispatchGuard::enter(&self.inner);
        trace!(
            property = self.inner.id,
            version,
            subscribers = self.len(),
            forced,
            "dispatch"
        );
        self.deliver(&value);

        loop {
            let next = self.inner.queued.borrow_mut().pop_front();
            match next {
                Some(value) => self.deliver(&value),
                None => break,
            }
        }
    }

    fn deliver(&self, value: &T) {
        let snapshot: Vec<Subscriber<T>> = self.inner.subscribers.borrow().clone();
        for subscriber in snapshot {
            if !subscriber.live.get() {
                continue;
            }
            (subscriber.callback.borrow_mut())(value);
        }
    }
}
