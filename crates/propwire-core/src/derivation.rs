#![forbid(unsafe_code)]

//! Eager derivation stages.
//!
//! # Design
//!
//! A [`Derivation<I, O>`] caches an input record `I` (the last value seen from
//! each tracked upstream property plus any local inputs, such as layout
//! bounds) and publishes `derive(&I)` through its own observable output.
//!
//! Unlike a lazily invalidated computed value, a derivation recomputes inside
//! the triggering call and force-publishes the result. When a trigger returns,
//! the output is consistent with the latest inputs and every downstream
//! subscriber has already run.
//!
//! # Invariants
//!
//! 1. Each trigger (an upstream notification or an [`update`](Derivation::update)
//!    call) runs `derive` exactly once and publishes with `set_forced`.
//! 2. Reads never run `derive`.
//! 3. The output is initialized from `derive(&inputs)` at construction; that
//!    computation is not counted as a trigger.
//!
//! # Failure Modes
//!
//! - **Upstream dropped**: the tracking connection becomes inert; the stage
//!   keeps its last inputs and output.
//! - **Unseeded inputs**: [`track`](Derivation::track) does not read the
//!   upstream's current value. Seed `inputs` from `upstream.value()` when
//!   constructing the stage.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::debug;

use crate::connection::ScopedConnection;
use crate::property::{MutableObservableProperty, ObservableProperty};

struct DerivationState<I, O> {
    inputs: RefCell<I>,
    derive: Box<dyn Fn(&I) -> O>,
    output: MutableObservableProperty<O>,
    recomputations: Cell<u64>,
}

impl<I: 'static, O: Clone + 'static> DerivationState<I, O> {
    fn apply(&self, change: impl FnOnce(&mut I)) {
        change(&mut self.inputs.borrow_mut());
        let derived = (self.derive)(&self.inputs.borrow());
        let recomputations = self.recomputations.get() + 1;
        self.recomputations.set(recomputations);
        debug!(property = self.output.id(), recomputations, "derivation recomputed");
        self.output.set_forced(derived);
    }
}

/// A derivation stage: cached inputs, an injected pure function, and an
/// observable output.
///
/// Connections are declared first so they are released before the state they
/// feed is dropped.
pub struct Derivation<I, O> {
    connections: Vec<ScopedConnection>,
    state: Rc<DerivationState<I, O>>,
}

impl<I: fmt::Debug, O: fmt::Debug> fmt::Debug for Derivation<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derivation")
            .field("inputs", &*self.state.inputs.borrow())
            .field("output", &*self.state.output)
            .field("recomputations", &self.state.recomputations.get())
            .field("upstreams", &self.connections.len())
            .finish()
    }
}

impl<I: 'static, O: Clone + 'static> Derivation<I, O> {
    /// Create a stage with the given inputs, computing the initial output.
    #[must_use]
    pub fn new(inputs: I, derive: impl Fn(&I) -> O + 'static) -> Self {
        let initial = derive(&inputs);
        Self {
            connections: Vec::new(),
            state: Rc::new(DerivationState {
                inputs: RefCell::new(inputs),
                derive: Box::new(derive),
                output: MutableObservableProperty::new(initial),
                recomputations: Cell::new(0),
            }),
        }
    }

    /// Recompute whenever `upstream` notifies.
    ///
    /// `apply` writes the notified value into the cached inputs before the
    /// recomputation.
    pub fn track<U: 'static>(
        &mut self,
        upstream: &ObservableProperty<U>,
        apply: impl Fn(&mut I, &U) + 'static,
    ) {
        let weak: Weak<DerivationState<I, O>> = Rc::downgrade(&self.state);
        let conn = upstream.observe(move |value| {
            if let Some(state) = weak.upgrade() {
                state.apply(|inputs| apply(inputs, value));
            }
        });
        self.connections.push(conn);
    }

    /// Apply a local input change and recompute.
    pub fn update(&self, change: impl FnOnce(&mut I)) {
        self.state.apply(change);
    }

    /// Read the cached inputs.
    pub fn inputs<R>(&self, f: impl FnOnce(&I) -> R) -> R {
        f(&self.state.inputs.borrow())
    }

    /// The published output.
    #[must_use]
    pub fn output(&self) -> &ObservableProperty<O> {
        &self.state.output
    }

    /// Current output value.
    #[must_use]
    pub fn value(&self) -> O {
        self.state.output.value()
    }

    /// Number of trigger-driven recomputations so far.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.state.recomputations.get()
    }

    /// Number of upstream properties being tracked.
    #[must_use]
    pub fn upstream_count(&self) -> usize {
        self.connections.len()
    }
}
