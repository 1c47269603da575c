//! Day-over-day helpers for ordered series

use serde::{Deserialize, Serialize};

/// First differences of a series: `values[i] - values[i - 1]`
///
/// The result has one element fewer than the input. Empty and
/// single-element inputs give an empty vector.
pub fn differences(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Sign category of a movement between two consecutive observations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    /// Exactly zero change. Its own category, never coerced to up or down.
    Flat,
}

impl Direction {
    /// Classify a single change
    pub fn of(delta: f64) -> Self {
        if delta > 0.0 {
            Direction::Up
        } else if delta < 0.0 {
            Direction::Down
        } else {
            Direction::Flat
        }
    }

    /// Directions of every consecutive pair in the series
    pub fn of_series(values: &[f64]) -> Vec<Self> {
        values.windows(2).map(|w| Self::of(w[1] - w[0])).collect()
    }
}
