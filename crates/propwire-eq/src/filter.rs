#![forbid(unsafe_code)]

//! The EQ filter model.
//!
//! [`EqFilter`] owns the source property of the pipeline, the cutoff
//! frequency, and derives the magnitude response from it through an injected
//! [`ResponseCalculator`].
//!
//! # Invariants
//!
//! 1. The magnitude response is recalculated exactly once per cutoff change.
//! 2. Setting the cutoff to its current value recalculates nothing.
//! 3. Non-finite cutoffs are rejected and leave the model untouched.

use propwire_core::{Derivation, MutableObservableProperty, ObservableProperty};
use tracing::{debug, warn};

use crate::response::{MagnitudeResponse, ResponseCalculator};

/// Cutoff frequency of a freshly constructed filter, in Hz.
pub const DEFAULT_CUTOFF_HZ: f64 = 100.0;

pub struct EqFilter {
    magnitude_response: Derivation<f64, MagnitudeResponse>,
    cutoff_frequency: MutableObservableProperty<f64>,
}

impl std::fmt::Debug for EqFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EqFilter")
            .field("cutoff_frequency", &self.cutoff_frequency.value())
            .field("recalculations", &self.recalculations())
            .finish()
    }
}

impl EqFilter {
    #[must_use]
    pub fn new(calculator: impl ResponseCalculator + 'static) -> Self {
        Self::with_cutoff(DEFAULT_CUTOFF_HZ, calculator)
    }

    #[must_use]
    pub fn with_cutoff(cutoff_hz: f64, calculator: impl ResponseCalculator + 'static) -> Self {
        let cutoff_frequency = MutableObservableProperty::new(cutoff_hz);
        let mut magnitude_response = Derivation::new(cutoff_hz, move |hz: &f64| {
            calculator.magnitude_response(*hz)
        });
        magnitude_response.track(&cutoff_frequency, |input, hz| *input = *hz);
        Self {
            magnitude_response,
            cutoff_frequency,
        }
    }

    /// Apply a new cutoff frequency.
    ///
    /// Returns whether the cutoff changed (and the response was recalculated).
    pub fn on_cutoff_frequency_changed(&self, cutoff_hz: f64) -> bool {
        if !cutoff_hz.is_finite() {
            warn!(cutoff_hz, "ignoring non-finite cutoff frequency");
            return false;
        }
        let changed = self.cutoff_frequency.set(cutoff_hz);
        debug!(cutoff_hz, changed, "cutoff frequency applied");
        changed
    }

    #[must_use]
    pub fn cutoff_frequency(&self) -> &ObservableProperty<f64> {
        &self.cutoff_frequency
    }

    #[must_use]
    pub fn magnitude_response(&self) -> &ObservableProperty<MagnitudeResponse> {
        self.magnitude_response.output()
    }

    /// Number of cutoff-driven recalculations so far.
    #[must_use]
    pub fn recalculations(&self) -> u64 {
        self.magnitude_response.recompute_count()
    }
}
