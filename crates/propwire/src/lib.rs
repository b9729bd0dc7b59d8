#![forbid(unsafe_code)]

//! propwire public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users.

pub use propwire_core::{
    Derivation, LiveObservableProperty, MutableObservableProperty, ObservableProperty,
    ScopedConnection,
};

#[cfg(feature = "eq")]
pub use propwire_eq::{
    Bounds, DEFAULT_CUTOFF_HZ, EqFilter, EqPipeline, EqPipelineConfig, MagnitudeResponse,
    PlotGeometry, PlotPath, PlotPoint, ResponseCalculator, ResponsePoint, SliderRange,
    SliderRangeError,
};

pub mod prelude {
    pub use propwire_core as core;
    #[cfg(feature = "eq")]
    pub use propwire_eq as eq;

    pub use propwire_core::{
        Derivation, LiveObservableProperty, MutableObservableProperty, ObservableProperty,
        ScopedConnection,
    };

    #[cfg(feature = "eq")]
    pub use propwire_eq::{
        Bounds, EqPipeline, EqPipelineConfig, MagnitudeResponse, PlotGeometry, PlotPath,
        ResponseCalculator, SliderRange,
    };
}
