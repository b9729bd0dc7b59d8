//! Scripted pipeline session.
//!
//! A session lays the plot out once, then replays every drag followed by
//! every resize, painting after each step. Steps that leave the plot clean
//! are recorded without a repaint.

use propwire::{Bounds, EqPipeline, EqPipelineConfig, PlotPath, SliderRange};
use serde::Serialize;
use tracing::{debug, info};

use crate::curves::{FirstOrderLowpass, LogFrequencyPlot};
use crate::error::{DemoError, Result};

/// Validated session parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub pipeline: EqPipelineConfig,
    pub initial_bounds: Bounds,
    pub drags_hz: Vec<f64>,
    pub resizes: Vec<Bounds>,
    pub samples: usize,
}

impl SessionConfig {
    /// Checks the plot sizes and sample count; the slider range is checked
    /// when it is built.
    pub fn validate(self) -> Result<Self> {
        for bounds in std::iter::once(&self.initial_bounds).chain(&self.resizes) {
            if bounds.is_empty() {
                return Err(DemoError::invalid(format!(
                    "plot size must be positive, got {}x{}",
                    bounds.width, bounds.height
                )));
            }
        }
        if self.samples < 2 {
            return Err(DemoError::invalid(format!(
                "need at least 2 response samples, got {}",
                self.samples
            )));
        }
        if !self.pipeline.initial_cutoff_hz.is_finite() {
            return Err(DemoError::invalid("initial cutoff must be finite"));
        }
        Ok(self)
    }
}

/// What triggered a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Layout { bounds: Bounds },
    Drag { requested_hz: f64 },
    Resize { bounds: Bounds },
}

/// State observed after one step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub step: Step,
    pub cutoff_hz: f64,
    pub repainted: bool,
    pub path_points: usize,
}

/// Outcome of a whole session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub slider_range: SliderRange,
    pub initial_cutoff_hz: f64,
    pub final_cutoff_hz: f64,
    pub frames: Vec<Frame>,
    pub filter_recalculations: u64,
    pub plot_recalculations: u64,
    pub slider_user_changes: u64,
    pub slider_silent_updates: u64,
    pub final_plot: PlotPath,
}

struct Session {
    pipeline: EqPipeline,
    last_plot: PlotPath,
    frames: Vec<Frame>,
}

impl Session {
    fn record(&mut self, step: Step) {
        let painted = self.pipeline.paint_if_needed();
        let repainted = painted.is_some();
        if let Some(path) = painted {
            self.last_plot = path;
        }
        let cutoff_hz = self.pipeline.filter().cutoff_frequency().value();
        debug!(?step, cutoff_hz, repainted, "session step");
        self.frames.push(Frame {
            step,
            cutoff_hz,
            repainted,
            path_points: self.last_plot.len(),
        });
    }
}

/// Replay the configured steps against a freshly wired pipeline.
#[must_use]
pub fn run_session(config: &SessionConfig) -> SessionReport {
    let pipeline = EqPipeline::new(
        config.pipeline,
        FirstOrderLowpass::new(config.samples),
        LogFrequencyPlot::default(),
    );
    let initial_cutoff_hz = pipeline.filter().cutoff_frequency().value();
    let mut session = Session {
        pipeline,
        last_plot: PlotPath::default(),
        frames: Vec::with_capacity(1 + config.drags_hz.len() + config.resizes.len()),
    };

    session.pipeline.resize_plot(config.initial_bounds);
    session.record(Step::Layout {
        bounds: config.initial_bounds,
    });

    for &requested_hz in &config.drags_hz {
        session.pipeline.user_drag(requested_hz);
        session.record(Step::Drag { requested_hz });
    }

    for &bounds in &config.resizes {
        session.pipeline.resize_plot(bounds);
        session.record(Step::Resize { bounds });
    }

    let Session {
        pipeline,
        last_plot,
        frames,
    } = session;
    let slider = pipeline.filter_component().slider();
    let report = SessionReport {
        slider_range: config.pipeline.slider_range,
        initial_cutoff_hz,
        final_cutoff_hz: pipeline.filter().cutoff_frequency().value(),
        filter_recalculations: pipeline.filter().recalculations(),
        plot_recalculations: pipeline.plot_view().view_model().recalculations(),
        slider_user_changes: slider.user_changes(),
        slider_silent_updates: slider.silent_updates(),
        frames,
        final_plot: last_plot,
    };
    drop(slider);

    info!(
        steps = report.frames.len(),
        final_cutoff_hz = report.final_cutoff_hz,
        filter_recalculations = report.filter_recalculations,
        "session finished"
    );
    report
}
