//! Metrics for evaluating forecast performance against realized values

use crate::config::{EvaluatorConfig, ZeroRealPolicy};
use crate::data::ForecastTable;
use crate::error::{ForecastError, Result};
use forecast_math::{mean, Direction};
use serde::Serialize;

/// Evaluate a forecast against realized values with the default settings
///
/// `real` and `predicted` must be index-aligned and hold at least two
/// points. A zero realized value fails the whole evaluation; see
/// [`Evaluator`] with [`ZeroRealPolicy::Exclude`] for the lenient variant.
pub fn evaluate(real: &[f64], predicted: &[f64]) -> Result<EvaluationReport> {
    Evaluator::default().evaluate(real, predicted)
}

/// Evaluate the realized rows of a table with the default settings
pub fn evaluate_table(table: &ForecastTable) -> Result<EvaluationReport> {
    Evaluator::default().evaluate_table(table)
}

/// Computes accuracy, error and direction statistics
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator {
    config: EvaluatorConfig,
}

impl Evaluator {
    pub fn new(config: EvaluatorConfig) -> Self {
        Self { config }
    }

    /// Evaluate two aligned series
    pub fn evaluate(&self, real: &[f64], predicted: &[f64]) -> Result<EvaluationReport> {
        if real.len() != predicted.len() {
            return Err(ForecastError::LengthMismatch {
                real: real.len(),
                predicted: predicted.len(),
            });
        }
        if real.len() < 2 {
            return Err(ForecastError::InsufficientData {
                required: 2,
                actual: real.len(),
            });
        }

        let errors: Vec<f64> = real
            .iter()
            .zip(predicted)
            .map(|(&r, &p)| p - r)
            .collect();
        let abs_errors: Vec<f64> = errors.iter().map(|e| e.abs()).collect();
        let sq_errors: Vec<f64> = errors.iter().map(|e| e * e).collect();

        Ok(EvaluationReport {
            mae: mean(&abs_errors)?,
            rmse: mean(&sq_errors)?.sqrt(),
            mape: self.mape(real, &abs_errors)?,
            bias: mean(&errors)?,
            directional_accuracy: directional_accuracy(real, predicted)?,
            mean_confidence: None,
            points: real.len(),
        })
    }

    /// Evaluate a table, excluding rows without a realized value
    ///
    /// Mean confidence is taken over every row of the table that carries
    /// one, and is `None` when no row does.
    pub fn evaluate_table(&self, table: &ForecastTable) -> Result<EvaluationReport> {
        let (real, predicted) = table.realized();
        let report = self.evaluate(&real, &predicted)?;

        let confidences = table.confidences();
        let mean_confidence = if confidences.is_empty() {
            None
        } else {
            Some(mean(&confidences)?)
        };

        Ok(EvaluationReport {
            mean_confidence,
            ..report
        })
    }

    fn mape(&self, real: &[f64], abs_errors: &[f64]) -> Result<Option<f64>> {
        let mut ratios = Vec::with_capacity(real.len());
        for (index, (&r, &e)) in real.iter().zip(abs_errors).enumerate() {
            if r == 0.0 {
                match self.config.zero_real {
                    ZeroRealPolicy::Fail => return Err(ForecastError::DivisionByZero { index }),
                    ZeroRealPolicy::Exclude => continue,
                }
            }
            ratios.push(e / r.abs());
        }

        if ratios.is_empty() {
            return Ok(None);
        }
        Ok(Some(mean(&ratios)? * 100.0))
    }
}

/// Percentage of steps where predicted and realized movements share a sign
///
/// A zero change is its own category: a flat realized step only matches
/// a flat predicted step.
pub fn directional_accuracy(real: &[f64], predicted: &[f64]) -> Result<f64> {
    if real.len() != predicted.len() {
        return Err(ForecastError::LengthMismatch {
            real: real.len(),
            predicted: predicted.len(),
        });
    }
    if real.len() < 2 {
        return Err(ForecastError::InsufficientData {
            required: 2,
            actual: real.len(),
        });
    }

    let matches = Direction::of_series(real)
        .into_iter()
        .zip(Direction::of_series(predicted))
        .filter(|(r, p)| r == p)
        .count();

    Ok(matches as f64 / (real.len() - 1) as f64 * 100.0)
}

/// Forecast performance metrics
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvaluationReport {
    /// Mean Absolute Error
    pub mae: f64,
    /// Root Mean Squared Error
    pub rmse: f64,
    /// Mean Absolute Percentage Error, `None` if every realized value was
    /// excluded as zero
    pub mape: Option<f64>,
    /// Mean of `predicted - real`; positive means over-estimation
    pub bias: f64,
    /// Direction accuracy percentage
    pub directional_accuracy: f64,
    /// Mean model confidence, when the input carried confidences
    pub mean_confidence: Option<f64>,
    /// Number of aligned points evaluated
    pub points: usize,
}
