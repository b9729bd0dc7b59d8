#![forbid(unsafe_code)]

//! End-to-end wiring of the EQ pipeline.
//!
//! ```text
//! slider ──user_drag──▶ EqFilterViewModel ──use case──▶ EqFilter.cutoff_frequency
//!    ▲                         ▲                              │
//!    └──display_silently───────┴────────follow_model──────────┤
//!                                                             ▼
//!                               EqFilter.magnitude_response (derived)
//!                                                             │
//!                  PlotView.resized ──▶ MagnitudeResponsePlotViewModel.plot (derived)
//!                                                             │
//!                                                             ▼
//!                                                   PlotView (dirty flag)
//! ```
//!
//! Fields are declared consumer-first, so the plot view and the slider
//! component release their subscriptions before the filter they observe is
//! dropped.

use std::rc::Rc;

use tracing::{debug, info};

use crate::filter::{DEFAULT_CUTOFF_HZ, EqFilter};
use crate::filter_view::{EqFilterComponent, EqFilterViewModel};
use crate::geometry::{Bounds, PlotGeometry, PlotPath};
use crate::plot::{MagnitudeResponsePlotViewModel, PlotView};
use crate::response::ResponseCalculator;
use crate::slider::SliderRange;

/// Construction parameters for [`EqPipeline`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EqPipelineConfig {
    /// Cutoff the filter starts at; snapped into `slider_range`.
    pub initial_cutoff_hz: f64,
    pub slider_range: SliderRange,
}

impl Default for EqPipelineConfig {
    fn default() -> Self {
        Self {
            initial_cutoff_hz: DEFAULT_CUTOFF_HZ,
            slider_range: SliderRange::cutoff_frequency(),
        }
    }
}

/// Filter model, slider component, and plot view, wired together.
pub struct EqPipeline {
    plot_view: PlotView,
    filter_component: EqFilterComponent,
    filter: Rc<EqFilter>,
    slider_range: SliderRange,
}

impl std::fmt::Debug for EqPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EqPipeline")
            .field("filter", &self.filter)
            .field("filter_component", &self.filter_component)
            .field("plot_view", &self.plot_view)
            .field("slider_range", &self.slider_range)
            .finish()
    }
}

impl EqPipeline {
    #[must_use]
    pub fn new(
        config: EqPipelineConfig,
        calculator: impl ResponseCalculator + 'static,
        geometry: impl PlotGeometry + 'static,
    ) -> Self {
        let initial_cutoff_hz = config.slider_range.snap(config.initial_cutoff_hz);
        let filter = Rc::new(EqFilter::with_cutoff(initial_cutoff_hz, calculator));

        let weak_filter = Rc::downgrade(&filter);
        let mut view_model = EqFilterViewModel::with_initial(initial_cutoff_hz, move |hz| {
            if let Some(filter) = weak_filter.upgrade() {
                filter.on_cutoff_frequency_changed(hz);
            }
        });
        view_model.follow_model(filter.cutoff_frequency());
        let filter_component = EqFilterComponent::new(view_model, config.slider_range);

        let plot_view = PlotView::new(MagnitudeResponsePlotViewModel::new(
            filter.magnitude_response(),
            geometry,
        ));

        info!(
            initial_cutoff_hz,
            min_hz = config.slider_range.min(),
            max_hz = config.slider_range.max(),
            "eq pipeline wired"
        );

        Self {
            plot_view,
            filter_component,
            filter,
            slider_range: config.slider_range,
        }
    }

    /// The user dragged the cutoff slider.
    pub fn user_drag(&self, cutoff_hz: f64) -> bool {
        self.filter_component.user_drag(cutoff_hz)
    }

    /// A model-originated cutoff change, such as loading a preset.
    ///
    /// Finite values are snapped into the slider range first, so the model,
    /// the view-model, and the slider always agree.
    pub fn set_cutoff_from_model(&self, cutoff_hz: f64) -> bool {
        if !cutoff_hz.is_finite() {
            return self.filter.on_cutoff_frequency_changed(cutoff_hz);
        }
        let snapped = self.slider_range.snap(cutoff_hz);
        if snapped != cutoff_hz {
            debug!(cutoff_hz, snapped, "model cutoff snapped into slider range");
        }
        self.filter.on_cutoff_frequency_changed(snapped)
    }

    #[must_use]
    pub fn slider_range(&self) -> SliderRange {
        self.slider_range
    }

    /// The plot area was laid out with new bounds.
    pub fn resize_plot(&self, bounds: Bounds) {
        self.plot_view.resized(bounds);
    }

    /// Paint the plot if it is dirty. Returns the painted path.
    pub fn paint_if_needed(&self) -> Option<PlotPath> {
        self.plot_view
            .needs_repaint()
            .then(|| self.plot_view.paint())
    }

    #[must_use]
    pub fn filter(&self) -> &EqFilter {
        &self.filter
    }

    #[must_use]
    pub fn filter_component(&self) -> &EqFilterComponent {
        &self.filter_component
    }

    #[must_use]
    pub fn plot_view(&self) -> &PlotView {
        &self.plot_view
    }
}
