#![forbid(unsafe_code)]

//! EQ filter pipeline built on propwire properties.
//!
//! - [`filter`]: the filter model; cutoff frequency (source) and magnitude
//!   response (derived).
//! - [`filter_view`]: cutoff slider view-model and component, bound both ways.
//! - [`plot`]: magnitude response plot view-model and its display consumer.
//! - [`pipeline`]: wiring of the three in a safe drop order.
//! - [`response`], [`geometry`]: collaborator data types and the DSP /
//!   plotting interfaces, supplied by the caller.
//! - [`slider`]: slider range validation and the headless slider control.

pub mod filter;
pub mod filter_view;
pub mod geometry;
pub mod pipeline;
pub mod plot;
pub mod response;
pub mod slider;

pub use filter::{DEFAULT_CUTOFF_HZ, EqFilter};
pub use filter_view::{CutoffFrequencyChanged, EqFilterComponent, EqFilterViewModel};
pub use geometry::{Bounds, PlotGeometry, PlotPath, PlotPoint};
pub use pipeline::{EqPipeline, EqPipelineConfig};
pub use plot::{MagnitudeResponsePlotViewModel, PlotInputs, PlotView};
pub use response::{MagnitudeResponse, ResponseCalculator, ResponsePoint};
pub use slider::{SliderControl, SliderRange, SliderRangeError};
