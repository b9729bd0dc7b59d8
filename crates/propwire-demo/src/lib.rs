#![forbid(unsafe_code)]

//! Headless driver for the EQ pipeline.
//!
//! Builds an [`EqPipeline`](propwire::EqPipeline) with a first-order lowpass
//! response and a log-frequency plot, replays a scripted sequence of slider
//! drags and plot resizes, and reports every repaint.

pub mod cli;
pub mod curves;
pub mod error;
pub mod logging;
pub mod session;

pub use cli::{Cli, run, run_from_env};
pub use error::{DemoError, Result};
