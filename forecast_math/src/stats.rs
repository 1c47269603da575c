//! Descriptive statistics over an entire series
//!
//! All functions work on the full slice they are given. There is no
//! rolling window here; callers slice the data themselves.

use crate::{MathError, Result};
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Which denominator a standard deviation uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviationKind {
    /// Divide by `n`
    #[default]
    Population,
    /// Divide by `n - 1` (Bessel's correction)
    Sample,
}

impl DeviationKind {
    /// Minimum number of values needed for a finite result
    pub fn min_len(self) -> usize {
        match self {
            DeviationKind::Population => 1,
            DeviationKind::Sample => 2,
        }
    }
}

/// Arithmetic mean of the values
pub fn mean(values: &[f64]) -> Result<f64> {
    if values.is_empty() {
        return Err(MathError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    Ok(values.iter().mean())
}

/// Standard deviation of the values
pub fn std_dev(values: &[f64], kind: DeviationKind) -> Result<f64> {
    if values.len() < kind.min_len() {
        return Err(MathError::InsufficientData {
            required: kind.min_len(),
            actual: values.len(),
        });
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(MathError::InvalidInput(
            "Standard deviation requires finite values".to_string(),
        ));
    }

    Ok(match kind {
        DeviationKind::Population => values.iter().population_std_dev(),
        DeviationKind::Sample => values.iter().std_dev(),
    })
}
