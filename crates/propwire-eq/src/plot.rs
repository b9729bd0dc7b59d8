#![forbid(unsafe_code)]

//! Magnitude response plot: view-model and display consumer.
//!
//! # Design
//!
//! [`MagnitudeResponsePlotViewModel`] is a derivation stage with two
//! independent triggers: the model's magnitude response (observed) and the
//! plot bounds (a local input set by the display on resize). Either one
//! recomputes the path once and force-publishes it.
//!
//! [`PlotView`] is the terminal consumer. It observes the path only to mark
//! itself dirty; the actual drawing reads `plot().value()` when painting.
//!
//! # Invariants
//!
//! 1. The cached bounds and cached response always equal the latest of each.
//! 2. Every published path is `geometry.plot(&response, bounds)` for the
//!    cached inputs at the time of publication.
//! 3. A `PlotView` is dirty iff a path was published since its last paint.

use std::cell::Cell;
use std::rc::Rc;

use propwire_core::{Derivation, ObservableProperty, ScopedConnection};
use tracing::debug;

use crate::geometry::{Bounds, PlotGeometry, PlotPath};
use crate::response::MagnitudeResponse;

/// Cached inputs of the plot derivation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotInputs {
    pub magnitude_response: MagnitudeResponse,
    pub bounds: Bounds,
}

pub struct MagnitudeResponsePlotViewModel {
    plot: Derivation<PlotInputs, PlotPath>,
}

impl std::fmt::Debug for MagnitudeResponsePlotViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MagnitudeResponsePlotViewModel")
            .field("bounds", &self.bounds())
            .field("points", &self.plot.output().with(PlotPath::len))
            .field("recalculations", &self.recalculations())
            .finish()
    }
}

impl MagnitudeResponsePlotViewModel {
    /// Track `magnitude_response`, starting from its current value and empty
    /// bounds.
    #[must_use]
    pub fn new(
        magnitude_response: &ObservableProperty<MagnitudeResponse>,
        geometry: impl PlotGeometry + 'static,
    ) -> Self {
        let inputs = PlotInputs {
            magnitude_response: magnitude_response.value(),
            bounds: Bounds::default(),
        };
        let mut plot = Derivation::new(inputs, move |inputs: &PlotInputs| {
            geometry.plot(&inputs.magnitude_response, inputs.bounds)
        });
        plot.track(magnitude_response, |inputs, response| {
            inputs.magnitude_response = response.clone();
        });
        Self { plot }
    }

    #[must_use]
    pub fn plot(&self) -> &ObservableProperty<PlotPath> {
        self.plot.output()
    }

    /// The display area changed.
    pub fn on_plot_bounds_changed(&self, bounds: Bounds) {
        debug!(
            width = bounds.width,
            height = bounds.height,
            "plot bounds changed"
        );
        self.plot.update(|inputs| inputs.bounds = bounds);
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.plot.inputs(|inputs| inputs.bounds)
    }

    /// The last magnitude response received from the model.
    #[must_use]
    pub fn magnitude_response(&self) -> MagnitudeResponse {
        self.plot.inputs(|inputs| inputs.magnitude_response.clone())
    }

    #[must_use]
    pub fn recalculations(&self) -> u64 {
        self.plot.recompute_count()
    }
}

#[derive(Debug, Default)]
struct RepaintState {
    dirty: Cell<bool>,
    requests: Cell<u64>,
}

impl RepaintState {
    fn request(&self) {
        self.dirty.set(true);
        self.requests.set(self.requests.get() + 1);
    }
}

/// Display consumer for the plot.
pub struct PlotView {
    connections: Vec<ScopedConnection>,
    repaint: Rc<RepaintState>,
    view_model: MagnitudeResponsePlotViewModel,
}

impl std::fmt::Debug for PlotView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlotView")
            .field("needs_repaint", &self.needs_repaint())
            .field("repaint_requests", &self.repaint_requests())
            .field("view_model", &self.view_model)
            .finish()
    }
}

impl PlotView {
    #[must_use]
    pub fn new(view_model: MagnitudeResponsePlotViewModel) -> Self {
        let repaint = Rc::new(RepaintState::default());
        let state = Rc::clone(&repaint);
        let conn = view_model.plot().observe(move |_| state.request());
        Self {
            connections: vec![conn],
            repaint,
            view_model,
        }
    }

    /// The view was laid out with new bounds.
    pub fn resized(&self, bounds: Bounds) {
        self.view_model.on_plot_bounds_changed(bounds);
    }

    /// Take the current path for drawing and clear the dirty flag.
    #[must_use]
    pub fn paint(&self) -> PlotPath {
        self.repaint.dirty.set(false);
        self.view_model.plot().value()
    }

    #[must_use]
    pub fn needs_repaint(&self) -> bool {
        self.repaint.dirty.get()
    }

    /// Number of repaint requests received so far.
    #[must_use]
    pub fn repaint_requests(&self) -> u64 {
        self.repaint.requests.get()
    }

    #[must_use]
    pub fn view_model(&self) -> &MagnitudeResponsePlotViewModel {
        &self.view_model
    }

    #[must_use]
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }
}
