#![forbid(unsafe_code)]

//! Two-way binding between a property and an external control.
//!
//! # Design
//!
//! A [`LiveObservableProperty<T>`] is a mutable property plus one extra
//! subscriber channel reserved for the bound control's *silent* display sink.
//! There is no suppression flag. Instead each direction has its own method:
//!
//! | origin  | method                  | property observers | control sink |
//! |---------|-------------------------|--------------------|--------------|
//! | control | `update_from_control`   | notified           | not called   |
//! | model   | `set` / `set_forced`    | notified           | called       |
//!
//! The control sink must only change what the control shows (the equivalent
//! of "set value without sending a change event"); it must not write back to
//! the property.
//!
//! # Invariants
//!
//! 1. `update_from_control` never reaches the control sink.
//! 2. A model-side write reaches the control sink at most once, after the
//!    property observers, and with the property's value at that point. A
//!    nested model write made by an observer updates the control itself; the
//!    outer write then skips the control so it never shows a stale value.

use std::cell::Cell;
use std::fmt;
use std::ops::Deref;

use crate::connection::ScopedConnection;
use crate::notifier::Notifier;
use crate::property::{MutableObservableProperty, ObservableProperty};

/// A mutable property with a bound control and echo-free write paths.
pub struct LiveObservableProperty<T> {
    property: MutableObservableProperty<T>,
    control: Notifier<T>,
    /// Property version the control sink last displayed.
    displayed_version: Cell<u64>,
}

impl<T: fmt::Debug> fmt::Debug for LiveObservableProperty<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LiveObservableProperty")
            .field("property", &*self.property)
            .field("control_sinks", &self.control.len())
            .finish()
    }
}

impl<T: Clone + 'static> LiveObservableProperty<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self {
            property: MutableObservableProperty::new(initial),
            control: Notifier::new(),
            displayed_version: Cell::new(0),
        }
    }

    /// Bind the control's silent display sink.
    ///
    /// The sink receives model-originated values only.
    pub fn bind_control(&self, sink: impl FnMut(&T) + 'static) -> ScopedConnection {
        self.control.subscribe(sink)
    }

    /// Control → property: the user changed the control.
    ///
    /// Notifies property observers if the value changed. The control already
    /// shows `value`, so it is not told again.
    pub fn update_from_control(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        self.property.set(value)
    }

    /// Property → control: a model-originated change.
    ///
    /// Notifies property observers and then the control sink, if the value
    /// changed.
    pub fn set(&self, value: T) -> bool
    where
        T: PartialEq,
    {
        if !self.property.set(value) {
            return false;
        }
        self.sync_control(false);
        true
    }

    /// Property → control, unconditionally.
    pub fn set_forced(&self, value: T) {
        self.property.set_forced(value);
        self.sync_control(true);
    }

    fn sync_control(&self, forced: bool) {
        let version = self.property.version();
        if self.displayed_version.get() >= version {
            return;
        }
        self.displayed_version.set(version);
        self.control.notify(self.property.value(), version, forced);
    }

    /// A read-only handle to the underlying property.
    #[must_use]
    pub fn observable(&self) -> ObservableProperty<T> {
        self.property.observable()
    }

    /// Number of bound control sinks.
    #[must_use]
    pub fn control_sink_count(&self) -> usize {
        self.control.len()
    }
}

impl<T> Deref for LiveObservableProperty<T> {
    type Target = ObservableProperty<T>;

    fn deref(&self) -> &Self::Target {
        &self.property
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Harness {
        live: LiveObservableProperty<f64>,
        observed: Rc<RefCell<Vec<f64>>>,
        echoed: Rc<RefCell<Vec<f64>>>,
        _conns: Vec<ScopedConnection>,
    }

    fn harness() -> Harness {
        let live = LiveObservableProperty::new(100.0);
        let observed = Rc::new(RefCell::new(Vec::new()));
        let echoed = Rc::new(RefCell::new(Vec::new()));
        let o = Rc::clone(&observed);
        let e = Rc::clone(&echoed);
        let conns = vec![
            live.observe(move |v| o.borrow_mut().push(*v)),
            live.bind_control(move |v| e.borrow_mut().push(*v)),
        ];
        Harness {
            live,
            observed,
            echoed,
            _conns: conns,
        }
    }

    #[test]
    fn control_update_skips_control_sink() {
        let h = harness();
        assert!(h.live.update_from_control(5000.0));
        assert_eq!(h.live.value(), 5000.0);
        assert_eq!(*h.observed.borrow(), vec![5000.0]);
        assert!(h.echoed.borrow().is_empty());
    }

    #[test]
    fn model_update_reaches_control_sink() {
        let h = harness();
        assert!(h.live.set(3000.0));
        assert_eq!(*h.observed.borrow(), vec![3000.0]);
        assert_eq!(*h.echoed.borrow(), vec![3000.0]);
    }

    #[test]
    fn unchanged_model_update_is_silent_on_both_sides() {
        let h = harness();
        assert!(!h.live.set(100.0));
        assert!(h.observed.borrow().is_empty());
        assert!(h.echoed.borrow().is_empty());
    }

    #[test]
    fn forced_model_update_always_reaches_control() {
        let h = harness();
        h.live.set_forced(100.0);
        h.live.set_forced(100.0);
        assert_eq!(h.echoed.borrow().len(), 2);
        assert_eq!(h.observed.borrow().len(), 2);
    }

    #[test]
    fn released_control_sink_stops_echo() {
        let live = LiveObservableProperty::new(0.0);
        let echoed = Rc::new(RefCell::new(Vec::new()));
        let e = Rc::clone(&echoed);
        let mut sink = live.bind_control(move |v| e.borrow_mut().push(*v));
        assert_eq!(live.control_sink_count(), 1);
        sink.release();
        live.set(1.0);
        assert!(echoed.borrow().is_empty());
        assert_eq!(live.control_sink_count(), 0);
    }

    #[test]
    fn observers_run_before_control_sink() {
        let live = LiveObservableProperty::new(0);
        let order = Rc::new(RefCell::new(Vec::new()));
        let a = Rc::clone(&order);
        let b = Rc::clone(&order);
        let _sink = live.bind_control(move |_| a.borrow_mut().push("control"));
        let _obs = live.observe(move |_| b.borrow_mut().push("observer"));
        live.set(1);
        assert_eq!(*order.borrow(), vec!["observer", "control"]);
    }

    #[test]
    fn nested_model_write_leaves_control_on_final_value() {
        let live = Rc::new(LiveObservableProperty::new(0));
        let echoed = Rc::new(RefCell::new(Vec::new()));
        let e = Rc::clone(&echoed);
        let _sink = live.bind_control(move |v| e.borrow_mut().push(*v));

        let weak = Rc::downgrade(&live);
        let _clamp = live.observe(move |v| {
            if *v > 10 {
                if let Some(live) = weak.upgrade() {
                    live.set(10);
                }
            }
        });

        assert!(live.set(15));
        assert_eq!(live.value(), 10);
        assert_eq!(*echoed.borrow(), vec![10]);
        assert_eq!(echoed.borrow().last().copied(), Some(live.value()));
    }

    #[test]
    fn control_update_then_model_write_reaches_control() {
        let h = harness();
        h.live.update_from_control(5000.0);
        assert!(h.live.set(3000.0));
        assert_eq!(*h.echoed.borrow(), vec![3000.0]);
    }

    #[test]
    fn debug_lists_property_and_sinks() {
        let live = LiveObservableProperty::new(7);
        let _sink = live.bind_control(|_| {});
        let text = format!("{live:?}");
        assert!(text.contains("value: 7"), "{text}");
        assert!(text.contains("control_sinks: 1"), "{text}");
    }
}
