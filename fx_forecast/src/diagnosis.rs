//! Hit-rate reliability diagnosis over a daily outcome log
//!
//! A day is a hit when the model called the direction of the move
//! correctly, and a miss when it called the opposite direction. The
//! hit rate together with the mean confidence places the model in one of
//! three reliability tiers.

use crate::config::DiagnosisConfig;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use forecast_math::{mean, Direction};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one day's directional call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Hit,
    Miss,
    /// No call could be judged for this day
    Unmarked,
}

impl Outcome {
    /// Parse an outcome cell; unknown markers are `Unmarked`
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "✔️" | "✔" | "✅" | "1" | "true" | "hit" | "yes" => Outcome::Hit,
            "❌" | "✘" | "0" | "false" | "miss" | "no" => Outcome::Miss,
            _ => Outcome::Unmarked,
        }
    }
}

/// One row of the outcome log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeRecord {
    pub date: NaiveDate,
    pub outcome: Outcome,
    pub confidence: Option<f64>,
}

/// Reliability tier of the model over the diagnosed period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Reliability {
    /// Precise and stable
    High,
    /// Usable under supervision
    Moderate,
    /// Needs review
    Low,
}

impl fmt::Display for Reliability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Reliability::High => "high",
            Reliability::Moderate => "moderate",
            Reliability::Low => "low",
        };
        f.write_str(label)
    }
}

/// Summary of an outcome log
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Diagnosis {
    /// All days in the log, marked or not
    pub total: usize,
    pub hits: usize,
    pub misses: usize,
    /// `hits / total * 100`
    pub hit_rate: f64,
    /// `misses / total * 100`
    pub miss_rate: f64,
    pub mean_confidence: Option<f64>,
    pub reliability: Reliability,
}

/// Diagnose an outcome log
pub fn diagnose(records: &[OutcomeRecord], config: &DiagnosisConfig) -> Result<Diagnosis> {
    if records.is_empty() {
        return Err(ForecastError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let total = records.len();
    let hits = records.iter().filter(|r| r.outcome == Outcome::Hit).count();
    let misses = records.iter().filter(|r| r.outcome == Outcome::Miss).count();
    let hit_rate = hits as f64 / total as f64 * 100.0;
    let miss_rate = misses as f64 / total as f64 * 100.0;

    let confidences: Vec<f64> = records.iter().filter_map(|r| r.confidence).collect();
    let mean_confidence = if confidences.is_empty() {
        None
    } else {
        Some(mean(&confidences)?)
    };

    Ok(Diagnosis {
        total,
        hits,
        misses,
        hit_rate,
        miss_rate,
        mean_confidence,
        reliability: classify(hit_rate, mean_confidence, config),
    })
}

/// Place a hit rate and mean confidence in a reliability tier
///
/// A missing confidence never qualifies for the high tier.
pub fn classify(hit_rate: f64, mean_confidence: Option<f64>, config: &DiagnosisConfig) -> Reliability {
    let confident = mean_confidence.is_some_and(|c| c >= config.high_confidence);

    if hit_rate >= config.high_hit_rate && confident {
        Reliability::High
    } else if hit_rate >= config.moderate_hit_rate {
        Reliability::Moderate
    } else {
        Reliability::Low
    }
}

/// Build an outcome log from realized and predicted series
///
/// The first day has no previous value and is `Unmarked`. A day is a hit
/// when both series moved in the same direction, flat included.
pub fn outcomes_from_series(
    dates: &[NaiveDate],
    real: &[f64],
    predicted: &[f64],
    confidence: &[Option<f64>],
) -> Result<Vec<OutcomeRecord>> {
    if real.len() != predicted.len() {
        return Err(ForecastError::LengthMismatch {
            real: real.len(),
            predicted: predicted.len(),
        });
    }
    let n = real.len();
    for (name, len) in [("dates", dates.len()), ("confidence", confidence.len())] {
        if len != n {
            return Err(ForecastError::DataError(format!(
                "{} has {} values, expected {} to match the series",
                name, len, n
            )));
        }
    }

    let real_moves = Direction::of_series(real);
    let predicted_moves = Direction::of_series(predicted);

    Ok((0..n)
        .map(|i| {
            let outcome = match i.checked_sub(1) {
                None => Outcome::Unmarked,
                Some(step) if real_moves[step] == predicted_moves[step] => Outcome::Hit,
                Some(_) => Outcome::Miss,
            };
            OutcomeRecord {
                date: dates[i],
                outcome,
                confidence: confidence[i],
            }
        })
        .collect())
}
