#![forbid(unsafe_code)]

//! Slider range validation and a headless slider control.
//!
//! [`SliderControl`] stands in for a widget. It has exactly two write paths:
//! [`drag_to`](SliderControl::drag_to) for user input, whose result the owner
//! forwards to the view-model, and
//! [`display_silently`](SliderControl::display_silently) for values pushed from
//! the model, which never produce a change event.

use thiserror::Error;

/// Invalid slider range parameters.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SliderRangeError {
    #[error("slider bounds must be finite (min={min}, max={max})")]
    NonFinite { min: f64, max: f64 },

    #[error("slider minimum {min} must be below maximum {max}")]
    Inverted { min: f64, max: f64 },

    #[error("slider interval must be positive and finite, got {interval}")]
    InvalidInterval { interval: f64 },
}

/// Closed value range with a step interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SliderRange {
    min: f64,
    max: f64,
    interval: f64,
}

impl SliderRange {
    /// Lowest selectable cutoff frequency, in Hz.
    pub const CUTOFF_MIN_HZ: f64 = 30.0;
    /// Highest selectable cutoff frequency, in Hz.
    pub const CUTOFF_MAX_HZ: f64 = 10_000.0;
    /// Cutoff slider step, in Hz.
    pub const CUTOFF_STEP_HZ: f64 = 0.1;

    pub fn new(min: f64, max: f64, interval: f64) -> Result<Self, SliderRangeError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(SliderRangeError::NonFinite { min, max });
        }
        if min >= max {
            return Err(SliderRangeError::Inverted { min, max });
        }
        if !interval.is_finite() || interval <= 0.0 {
            return Err(SliderRangeError::InvalidInterval { interval });
        }
        Ok(Self { min, max, interval })
    }

    /// The cutoff frequency range: 30 Hz to 10 kHz in 0.1 Hz steps.
    #[must_use]
    pub const fn cutoff_frequency() -> Self {
        Self {
            min: Self::CUTOFF_MIN_HZ,
            max: Self::CUTOFF_MAX_HZ,
            interval: Self::CUTOFF_STEP_HZ,
        }
    }

    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    #[must_use]
    pub const fn interval(&self) -> f64 {
        self.interval
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Clamp into the range and round to the nearest step from `min`.
    ///
    /// Values already on a step are returned unchanged, so round-off never
    /// moves them. NaN snaps to `min`.
    #[must_use]
    pub fn snap(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.interval).round();
        let snapped = (self.min + steps * self.interval).min(self.max);
        if (snapped - clamped).abs() <= self.interval * 1e-9 {
            clamped
        } else {
            snapped
        }
    }
}

impl Default for SliderRange {
    fn default() -> Self {
        Self::cutoff_frequency()
    }
}

/// Headless slider.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderControl {
    range: SliderRange,
    value: f64,
    user_changes: u64,
    silent_updates: u64,
}

impl SliderControl {
    #[must_use]
    pub fn new(range: SliderRange, initial: f64) -> Self {
        Self {
            range,
            value: range.snap(initial),
            user_changes: 0,
            silent_updates: 0,
        }
    }

    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    #[must_use]
    pub fn range(&self) -> SliderRange {
        self.range
    }

    /// User input. Returns the snapped value if the slider moved; the caller
    /// forwards it as the control's change event.
    pub fn drag_to(&mut self, value: f64) -> Option<f64> {
        let snapped = self.range.snap(value);
        if snapped == self.value {
            return None;
        }
        self.value = snapped;
        self.user_changes += 1;
        Some(snapped)
    }

    /// Show `value` without emitting a change event.
    pub fn display_silently(&mut self, value: f64) {
        self.value = self.range.snap(value);
        self.silent_updates += 1;
    }

    /// Number of change events produced by user input.
    #[must_use]
    pub fn user_changes(&self) -> u64 {
        self.user_changes
    }

    /// Number of silent, model-driven display updates.
    #[must_use]
    pub fn silent_updates(&self) -> u64 {
        self.silent_updates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_ranges() {
        assert_eq!(
            SliderRange::new(10.0, 10.0, 1.0),
            Err(SliderRangeError::Inverted {
                min: 10.0,
                max: 10.0
            })
        );
        assert!(matches!(
            SliderRange::new(f64::NEG_INFINITY, 1.0, 1.0),
            Err(SliderRangeError::NonFinite { .. })
        ));
        assert!(matches!(
            SliderRange::new(0.0, 1.0, 0.0),
            Err(SliderRangeError::InvalidInterval { .. })
        ));
        assert!(matches!(
            SliderRange::new(0.0, 1.0, f64::NAN),
            Err(SliderRangeError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn error_messages_name_the_problem() {
        let err = SliderRange::new(5.0, 1.0, 1.0).unwrap_err();
        assert_eq!(err.to_string(), "slider minimum 5 must be below maximum 1");
    }

    #[test]
    fn snap_clamps_and_rounds() {
        let range = SliderRange::new(0.0, 10.0, 0.5).unwrap();
        assert_eq!(range.snap(-3.0), 0.0);
        assert_eq!(range.snap(42.0), 10.0);
        assert_eq!(range.snap(3.3), 3.5);
        assert_eq!(range.snap(3.2), 3.0);
        assert_eq!(range.snap(f64::NAN), 0.0);
        assert_eq!(range.snap(f64::INFINITY), 10.0);
    }

    #[test]
    fn on_grid_values_are_exact() {
        let range = SliderRange::cutoff_frequency();
        assert_eq!(range.snap(5000.0), 5000.0);
        assert_eq!(range.snap(3000.0), 3000.0);
        assert_eq!(range.snap(100.0), 100.0);
    }

    #[test]
    fn default_range_is_cutoff_range() {
        let range = SliderRange::default();
        assert_eq!(range.min(), 30.0);
        assert_eq!(range.max(), 10_000.0);
        assert_eq!(range.interval(), 0.1);
        assert!(range.contains(1000.0));
        assert!(!range.contains(20.0));
    }

    #[test]
    fn drag_reports_only_movement() {
        let mut slider = SliderControl::new(SliderRange::cutoff_frequency(), 100.0);
        assert_eq!(slider.drag_to(100.0), None);
        assert_eq!(slider.drag_to(5000.0), Some(5000.0));
        assert_eq!(slider.drag_to(20_000.0), Some(10_000.0));
        assert_eq!(slider.drag_to(50_000.0), None);
        assert_eq!(slider.user_changes(), 2);
    }

    #[test]
    fn silent_display_never_counts_as_user_change() {
        let mut slider = SliderControl::new(SliderRange::cutoff_frequency(), 100.0);
        slider.display_silently(3000.0);
        assert_eq!(slider.value(), 3000.0);
        assert_eq!(slider.user_changes(), 0);
        assert_eq!(slider.silent_updates(), 1);
    }
}
