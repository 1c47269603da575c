//! Single-date lookups and date-range summaries of a forecast table

use crate::data::ForecastTable;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use forecast_math::mean;
use serde::Serialize;

/// The forecast published for one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointForecast {
    pub date: NaiveDate,
    pub predicted: f64,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub confidence: Option<f64>,
}

/// Forecast for a date, if the table has one
///
/// Forecasts are published for business days only, so weekends and
/// holidays usually come back as `None`.
pub fn lookup(table: &ForecastTable, date: NaiveDate) -> Option<PointForecast> {
    table.get(date).map(|p| PointForecast {
        date: p.date,
        predicted: p.predicted,
        lower: p.lower,
        upper: p.upper,
        confidence: p.confidence,
    })
}

/// Aggregates over a date range
#[derive(Debug, Clone, Serialize)]
pub struct PeriodSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Rows in the range
    pub days: usize,
    pub mean_predicted: f64,
    pub mean_confidence: Option<f64>,
    /// Mean over rows whose dispersion can be derived
    pub mean_dispersion: Option<f64>,
    /// The rows themselves, for tabular display
    #[serde(skip)]
    pub table: ForecastTable,
}

/// Summarize the rows dated within `from..=to`
pub fn summarize_period(table: &ForecastTable, from: NaiveDate, to: NaiveDate) -> Result<PeriodSummary> {
    let subset = table.range(from, to);
    if subset.is_empty() {
        return Err(ForecastError::InsufficientData {
            required: 1,
            actual: 0,
        });
    }

    let confidences = subset.confidences();
    let dispersions: Vec<f64> = subset.points().iter().filter_map(|p| p.dispersion()).collect();

    Ok(PeriodSummary {
        from,
        to,
        days: subset.len(),
        mean_predicted: mean(&subset.predicted())?,
        mean_confidence: optional_mean(&confidences)?,
        mean_dispersion: optional_mean(&dispersions)?,
        table: subset,
    })
}

fn optional_mean(values: &[f64]) -> Result<Option<f64>> {
    if values.is_empty() {
        Ok(None)
    } else {
        Ok(Some(mean(values)?))
    }
}
