#![forbid(unsafe_code)]

//! Magnitude response data and the DSP collaborator interface.

/// One point of a magnitude response.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResponsePoint {
    pub frequency_hz: f64,
    pub gain_db: f64,
}

impl ResponsePoint {
    #[must_use]
    pub const fn new(frequency_hz: f64, gain_db: f64) -> Self {
        Self {
            frequency_hz,
            gain_db,
        }
    }
}

/// Frequencies and their corresponding gains, ordered by frequency.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MagnitudeResponse {
    points: Vec<ResponsePoint>,
}

impl MagnitudeResponse {
    /// Build a response; points are sorted by frequency.
    #[must_use]
    pub fn new(mut points: Vec<ResponsePoint>) -> Self {
        points.sort_by(|a, b| a.frequency_hz.total_cmp(&b.frequency_hz));
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[ResponsePoint] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Lowest and highest frequency, if any.
    #[must_use]
    pub fn frequency_range(&self) -> Option<(f64, f64)> {
        Some((self.points.first()?.frequency_hz, self.points.last()?.frequency_hz))
    }

    /// Lowest and highest gain in dB, if any.
    #[must_use]
    pub fn gain_range(&self) -> Option<(f64, f64)> {
        self.points.iter().fold(None, |acc, p| match acc {
            None => Some((p.gain_db, p.gain_db)),
            Some((lo, hi)) => Some((lo.min(p.gain_db), hi.max(p.gain_db))),
        })
    }
}

impl FromIterator<ResponsePoint> for MagnitudeResponse {
    fn from_iter<I: IntoIterator<Item = ResponsePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Turns a cutoff frequency into a magnitude response.
///
/// Implementations must be pure: the same cutoff always yields the same
/// response.
pub trait ResponseCalculator {
    fn magnitude_response(&self, cutoff_hz: f64) -> MagnitudeResponse;
}

impl<F> ResponseCalculator for F
where
    F: Fn(f64) -> MagnitudeResponse,
{
    fn magnitude_response(&self, cutoff_hz: f64) -> MagnitudeResponse {
        self(cutoff_hz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_are_sorted_by_frequency() {
        let response = MagnitudeResponse::new(vec![
            ResponsePoint::new(1000.0, -3.0),
            ResponsePoint::new(20.0, 0.0),
            ResponsePoint::new(200.0, -1.0),
        ]);
        let freqs: Vec<f64> = response.points().iter().map(|p| p.frequency_hz).collect();
        assert_eq!(freqs, vec![20.0, 200.0, 1000.0]);
        assert_eq!(response.frequency_range(), Some((20.0, 1000.0)));
        assert_eq!(response.gain_range(), Some((-3.0, 0.0)));
    }

    #[test]
    fn empty_response_has_no_ranges() {
        let response = MagnitudeResponse::default();
        assert!(response.is_empty());
        assert_eq!(response.frequency_range(), None);
        assert_eq!(response.gain_range(), None);
    }

    #[test]
    fn closures_are_calculators() {
        let flat = |cutoff: f64| {
            [ResponsePoint::new(cutoff, 0.0)]
                .into_iter()
                .collect::<MagnitudeResponse>()
        };
        let response = flat.magnitude_response(440.0);
        assert_eq!(response.len(), 1);
        assert_eq!(response.points()[0].frequency_hz, 440.0);
    }
}
