//! Threshold-based alerting on forecast rows
//!
//! Two signals mark a forecast row as unreliable:
//!
//! - **High dispersion**: the uncertainty interval is wider than
//!   `mean(dispersion) + std(dispersion)`.
//! - **Abrupt variation**: the day-over-day change of the central forecast
//!   exceeds `2 * std(variation)` in magnitude. The mean variation is not
//!   subtracted, so the band is centred on zero rather than on the average
//!   drift.
//!
//! Statistics are taken over the whole table, never a rolling window.

use crate::config::DetectorConfig;
use crate::data::{ForecastTable, TimeSeriesPoint};
use crate::error::{ForecastError, Result};
use forecast_math::{differences, mean, std_dev};
use log::debug;
use serde::Serialize;

/// Multiple of the variation deviation that triggers an alert
pub const VARIATION_MULTIPLIER: f64 = 2.0;

/// Run the detector with the default settings
pub fn detect_anomalies(table: &ForecastTable) -> Result<AnomalyReport> {
    AnomalyDetector::default().detect(table)
}

/// Thresholds derived from one table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyThresholds {
    pub dispersion_threshold: f64,
    pub variation_threshold: f64,
}

/// A forecast row with the quantities it was judged on
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertRow {
    pub point: TimeSeriesPoint,
    pub dispersion: f64,
    /// Change from the previous row; `None` on the first row
    pub variation: Option<f64>,
    pub is_alert: bool,
    /// Dispersion exceeded its threshold
    pub dispersion_breach: bool,
    /// Variation magnitude exceeded its threshold
    pub variation_breach: bool,
}

/// Detector output: thresholds plus flagged rows in date order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalyReport {
    pub thresholds: AnomalyThresholds,
    pub alerts: Vec<AlertRow>,
    /// Number of flagged rows
    pub flagged: usize,
    /// Number of rows examined
    pub total: usize,
}

impl AnomalyReport {
    pub fn is_clean(&self) -> bool {
        self.alerts.is_empty()
    }
}

/// Flags forecast rows likely to be unreliable
#[derive(Debug, Clone, Copy, Default)]
pub struct AnomalyDetector {
    config: DetectorConfig,
}

impl AnomalyDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    /// Derive thresholds for a table without flagging rows
    pub fn thresholds(&self, table: &ForecastTable) -> Result<AnomalyThresholds> {
        let dispersions = dispersions(table)?;
        self.thresholds_from(&dispersions, &differences(&table.predicted()))
    }

    /// Score every row and keep the flagged ones
    pub fn detect(&self, table: &ForecastTable) -> Result<AnomalyReport> {
        let rows = self.score(table)?;
        let total = rows.len();
        let thresholds = rows.thresholds;

        let alerts: Vec<AlertRow> = rows.rows.into_iter().filter(|r| r.is_alert).collect();
        debug!(
            "Flagged {} of {} rows (dispersion > {:.4}, |variation| > {:.4})",
            alerts.len(),
            total,
            thresholds.dispersion_threshold,
            thresholds.variation_threshold
        );

        Ok(AnomalyReport {
            thresholds,
            flagged: alerts.len(),
            alerts,
            total,
        })
    }

    /// Score every row, flagged or not, in date order
    pub fn score(&self, table: &ForecastTable) -> Result<ScoredTable> {
        let dispersions = dispersions(table)?;
        let variations = differences(&table.predicted());
        let thresholds = self.thresholds_from(&dispersions, &variations)?;

        let rows = table
            .points()
            .iter()
            .zip(&dispersions)
            .enumerate()
            .map(|(i, (point, &dispersion))| {
                // The first row has no previous forecast to compare with
                let variation = i.checked_sub(1).map(|prev| variations[prev]);
                let dispersion_breach = dispersion > thresholds.dispersion_threshold;
                let variation_breach =
                    variation.is_some_and(|v| v.abs() > thresholds.variation_threshold);

                AlertRow {
                    point: point.clone(),
                    dispersion,
                    variation,
                    is_alert: dispersion_breach || variation_breach,
                    dispersion_breach,
                    variation_breach,
                }
            })
            .collect();

        Ok(ScoredTable { thresholds, rows })
    }

    fn thresholds_from(&self, dispersions: &[f64], variations: &[f64]) -> Result<AnomalyThresholds> {
        let kind = self.config.deviation;

        let dispersion_threshold = mean(dispersions)? + std_dev(dispersions, kind)?;

        // Too few defined variations leaves nothing to flag on that branch
        let variation_threshold = if variations.len() < kind.min_len() {
            0.0
        } else {
            VARIATION_MULTIPLIER * std_dev(variations, kind)?
        };

        Ok(AnomalyThresholds {
            dispersion_threshold,
            variation_threshold,
        })
    }
}

/// Every row of a table with its alert flags
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredTable {
    pub thresholds: AnomalyThresholds,
    pub rows: Vec<AlertRow>,
}

impl ScoredTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Per-row dispersion, failing on the first row where it cannot be derived
fn dispersions(table: &ForecastTable) -> Result<Vec<f64>> {
    if table.is_empty() {
        return Err(ForecastError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    table
        .points()
        .iter()
        .map(|p| {
            p.dispersion()
                .ok_or_else(|| ForecastError::missing_on("dispersion", p.date))
        })
        .collect()
}
