//! Demo collaborators: an analytic lowpass response and a log-frequency plot.

use propwire::{
    Bounds, MagnitudeResponse, PlotGeometry, PlotPath, PlotPoint, ResponseCalculator,
    ResponsePoint,
};

/// Lowest displayed frequency, in Hz.
pub const DISPLAY_MIN_HZ: f64 = 20.0;
/// Highest displayed frequency, in Hz.
pub const DISPLAY_MAX_HZ: f64 = 20_000.0;

/// First-order lowpass magnitude sampled at log-spaced frequencies.
///
/// Gain at `f` for cutoff `fc` is `-10 * log10(1 + (f / fc)^2)` dB.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FirstOrderLowpass {
    samples: usize,
    min_hz: f64,
    max_hz: f64,
}

impl FirstOrderLowpass {
    /// `samples` is raised to at least two so both display edges are sampled.
    #[must_use]
    pub fn new(samples: usize) -> Self {
        Self {
            samples: samples.max(2),
            min_hz: DISPLAY_MIN_HZ,
            max_hz: DISPLAY_MAX_HZ,
        }
    }

    #[must_use]
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Gain in dB at `frequency_hz`.
    #[must_use]
    pub fn gain_db(frequency_hz: f64, cutoff_hz: f64) -> f64 {
        let ratio = frequency_hz / cutoff_hz;
        -10.0 * (1.0 + ratio * ratio).log10()
    }

    fn frequency_at(&self, index: usize) -> f64 {
        let t = index as f64 / (self.samples - 1) as f64;
        self.min_hz * (self.max_hz / self.min_hz).powf(t)
    }
}

impl ResponseCalculator for FirstOrderLowpass {
    fn magnitude_response(&self, cutoff_hz: f64) -> MagnitudeResponse {
        (0..self.samples)
            .map(|i| {
                let hz = self.frequency_at(i);
                ResponsePoint::new(hz, Self::gain_db(hz, cutoff_hz))
            })
            .collect()
    }
}

/// Maps frequency logarithmically to x and gain linearly to y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogFrequencyPlot {
    min_hz: f64,
    max_hz: f64,
    floor_db: f64,
    ceiling_db: f64,
}

impl Default for LogFrequencyPlot {
    fn default() -> Self {
        Self {
            min_hz: DISPLAY_MIN_HZ,
            max_hz: DISPLAY_MAX_HZ,
            floor_db: -48.0,
            ceiling_db: 6.0,
        }
    }
}

impl LogFrequencyPlot {
    fn x_fraction(&self, frequency_hz: f64) -> f64 {
        let span = (self.max_hz / self.min_hz).ln();
        ((frequency_hz / self.min_hz).ln() / span).clamp(0.0, 1.0)
    }

    fn y_fraction(&self, gain_db: f64) -> f64 {
        ((self.ceiling_db - gain_db) / (self.ceiling_db - self.floor_db)).clamp(0.0, 1.0)
    }
}

impl PlotGeometry for LogFrequencyPlot {
    fn plot(&self, response: &MagnitudeResponse, bounds: Bounds) -> PlotPath {
        if bounds.is_empty() {
            return PlotPath::default();
        }
        let width = f64::from(bounds.width);
        let height = f64::from(bounds.height);
        response
            .points()
            .iter()
            .map(|p| PlotPoint {
                x: (f64::from(bounds.x) + self.x_fraction(p.frequency_hz) * width) as f32,
                y: (f64::from(bounds.y) + self.y_fraction(p.gain_db) * height) as f32,
            })
            .collect()
    }
}
