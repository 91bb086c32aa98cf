//! Coordinate store - the user's current coordinate

use domain::Coordinate;

/// Holds the most recent confirmed coordinate
///
/// Range checking lives in [`Coordinate`] itself; no history is kept.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CoordinateStore {
    current: Option<Coordinate>,
}

impl CoordinateStore {
    /// Create an empty store
    #[must_use]
    pub const fn new() -> Self {
        Self { current: None }
    }

    /// Most recent coordinate, if any is known
    #[must_use]
    pub const fn current(&self) -> Option<Coordinate> {
        self.current
    }

    /// Most recent coordinate, or `fallback` if none is known
    #[must_use]
    pub fn current_or(&self, fallback: Coordinate) -> Coordinate {
        self.current.unwrap_or(fallback)
    }

    /// Replace the current coordinate
    pub fn set_current(&mut self, coordinate: Coordinate) {
        self.current = Some(coordinate);
    }
}
