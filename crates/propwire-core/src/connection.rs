#![forbid(unsafe_code)]

//! Scoped subscription handles.
//!
//! A [`ScopedConnection`] is returned by every `observe` call. It is the only
//! way to stop delivery: dropping it, or calling [`release`](ScopedConnection::release),
//! removes the subscriber from the property it was registered on.
//!
//! # Invariants
//!
//! 1. A connection has exactly one owner (it is not `Clone`).
//! 2. Release happens at most once; releasing again is a no-op.
//! 3. After release the subscriber is never invoked again, even by a dispatch
//!    that started before the release.
//!
//! # Failure Modes
//!
//! - **Property dropped first**: the connection only holds a weak reference,
//!   so release finds nothing to remove and returns quietly. Owners should
//!   still declare their connections before the state they observe so drop
//!   order matches construction order.

use std::fmt;

/// RAII guard for one subscription.
///
/// Consumers typically collect these in a `Vec<ScopedConnection>` declared as
/// their first field, so every subscription ends before the rest of the
/// consumer is torn down. Entries release independently, in any order.
#[must_use = "dropping a ScopedConnection immediately unsubscribes"]
pub struct ScopedConnection {
    release: Option<Box<dyn FnOnce()>>,
}

impl ScopedConnection {
    pub(crate) fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Unsubscribe now. Idempotent.
    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }

    /// Whether this handle still owns a subscription that has not been
    /// released.
    #[inline]
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.release.is_some()
    }
}

impl Default for ScopedConnection {
    /// An empty handle that owns nothing.
    fn default() -> Self {
        Self { release: None }
    }
}

impl Drop for ScopedConnection {
    fn drop(&mut self) {
        self.release();
    }
}

impl fmt::Debug for ScopedConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedConnection")
            .field("connected", &self.is_connected())
            .finish()
    }
}
