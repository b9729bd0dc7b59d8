#![forbid(unsafe_code)]

//! Plot geometry: pixel bounds, drawable paths, and the plotting
//! collaborator interface.

use crate::response::MagnitudeResponse;

/// An integer pixel rectangle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Bounds at the origin with the given size.
    #[must_use]
    pub const fn from_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[must_use]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    #[must_use]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }
}

/// A vertex of a drawable path, in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotPoint {
    pub x: f32,
    pub y: f32,
}

/// A drawable poly-line.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlotPath {
    points: Vec<PlotPoint>,
}

impl PlotPath {
    #[must_use]
    pub fn new(points: Vec<PlotPoint>) -> Self {
        Self { points }
    }

    #[must_use]
    pub fn points(&self) -> &[PlotPoint] {
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
}

impl FromIterator<PlotPoint> for PlotPath {
    fn from_iter<I: IntoIterator<Item = PlotPoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Turns a magnitude response and pixel bounds into a drawable path.
///
/// Implementations must be pure.
pub trait PlotGeometry {
    fn plot(&self, response: &MagnitudeResponse, bounds: Bounds) -> PlotPath;
}

impl<F> PlotGeometry for F
where
    F: Fn(&MagnitudeResponse, Bounds) -> PlotPath,
{
    fn plot(&self, response: &MagnitudeResponse, bounds: Bounds) -> PlotPath {
        self(response, bounds)
    }
}
