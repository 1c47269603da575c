//! # Forecast Math
//!
//! Numeric building blocks shared by the forecast evaluation and alerting
//! code: descriptive statistics over whole series, first differences and
//! movement direction.

use thiserror::Error;

pub mod series;
pub mod stats;

pub use crate::series::{differences, Direction};
pub use crate::stats::{mean, std_dev, DeviationKind};

/// Errors that can occur in forecast math calculations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Insufficient data for calculation: need {required} values, have {actual}")]
    InsufficientData { required: usize, actual: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for forecast math operations
pub type Result<T> = std::result::Result<T, MathError>;
