#![forbid(unsafe_code)]

//! Cutoff slider view-model and component.
//!
//! The slider and the view-model's `frequency_slider_value` are bound both
//! ways without an echo:
//!
//! - user drags the slider → [`EqFilterComponent::user_drag`] →
//!   [`EqFilterViewModel::on_cutoff_frequency_changed`], which takes the
//!   control path of the live property and then runs the
//!   cutoff-frequency-changed use case. The slider is not told again.
//! - the model changes the cutoff → the view-model (if it follows the model)
//!   takes the model path, which updates the slider through
//!   [`SliderControl::display_silently`]. The use case does not run.

use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use propwire_core::{LiveObservableProperty, ObservableProperty, ScopedConnection};
use tracing::debug;

use crate::filter::DEFAULT_CUTOFF_HZ;
use crate::slider::{SliderControl, SliderRange};

/// Invoked with every user-chosen cutoff frequency.
pub type CutoffFrequencyChanged = Box<dyn Fn(f64)>;

pub struct EqFilterViewModel {
    connections: Vec<ScopedConnection>,
    frequency_slider_value: Rc<LiveObservableProperty<f64>>,
    cutoff_frequency_changed: CutoffFrequencyChanged,
}

impl std::fmt::Debug for EqFilterViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EqFilterViewModel")
            .field("frequency_slider_value", &self.frequency_slider_value.value())
            .field("following", &!self.connections.is_empty())
            .finish()
    }
}

impl EqFilterViewModel {
    /// A view-model whose slider value starts at the default cutoff.
    #[must_use]
    pub fn new(on_cutoff_frequency_changed: impl Fn(f64) + 'static) -> Self {
        Self::with_initial(DEFAULT_CUTOFF_HZ, on_cutoff_frequency_changed)
    }

    #[must_use]
    pub fn with_initial(initial_hz: f64, on_cutoff_frequency_changed: impl Fn(f64) + 'static) -> Self {
        Self {
            connections: Vec::new(),
            frequency_slider_value: Rc::new(LiveObservableProperty::new(initial_hz)),
            cutoff_frequency_changed: Box::new(on_cutoff_frequency_changed),
        }
    }

    #[must_use]
    pub fn frequency_slider_value(&self) -> &LiveObservableProperty<f64> {
        &self.frequency_slider_value
    }

    /// The user picked a new cutoff on the control.
    pub fn on_cutoff_frequency_changed(&self, cutoff_hz: f64) {
        let changed = self.frequency_slider_value.update_from_control(cutoff_hz);
        debug!(cutoff_hz, changed, "cutoff changed from control");
        (self.cutoff_frequency_changed)(cutoff_hz);
    }

    /// Reflect model-side cutoff changes in the control.
    ///
    /// Reads the current model value first, then subscribes.
    pub fn follow_model(&mut self, cutoff_frequency: &ObservableProperty<f64>) {
        self.frequency_slider_value.set(cutoff_frequency.value());
        let weak: Weak<LiveObservableProperty<f64>> = Rc::downgrade(&self.frequency_slider_value);
        let conn = cutoff_frequency.observe(move |hz| {
            if let Some(live) = weak.upgrade() {
                live.set(*hz);
            }
        });
        self.connections.push(conn);
    }
}

/// Owns the slider and the view-model it is bound to.
pub struct EqFilterComponent {
    connections: Vec<ScopedConnection>,
    slider: Rc<RefCell<SliderControl>>,
    view_model: EqFilterViewModel,
}

impl std::fmt::Debug for EqFilterComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EqFilterComponent")
            .field("slider", &*self.slider.borrow())
            .field("view_model", &self.view_model)
            .finish()
    }
}

impl EqFilterComponent {
    #[must_use]
    pub fn new(view_model: EqFilterViewModel, range: SliderRange) -> Self {
        let initial = view_model.frequency_slider_value().value();
        let slider = Rc::new(RefCell::new(SliderControl::new(range, initial)));

        let weak = Rc::downgrade(&slider);
        let conn = view_model.frequency_slider_value().bind_control(move |hz| {
            if let Some(slider) = weak.upgrade() {
                slider.borrow_mut().display_silently(*hz);
            }
        });

        Self {
            connections: vec![conn],
            slider,
            view_model,
        }
    }

    /// Simulate the user dragging the slider to `value`.
    ///
    /// Returns whether the slider moved and emitted a change.
    pub fn user_drag(&self, value: f64) -> bool {
        let emitted = self.slider.borrow_mut().drag_to(value);
        match emitted {
            Some(cutoff_hz) => {
                self.view_model.on_cutoff_frequency_changed(cutoff_hz);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn slider(&self) -> Ref<'_, SliderControl> {
        self.slider.borrow()
    }

    #[must_use]
    pub fn view_model(&self) -> &EqFilterViewModel {
        &self.view_model
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
