//! Date-indexed forecast tables and the CSV loader that fills them

use crate::config::ColumnMap;
use crate::diagnosis::{Outcome, OutcomeRecord};
use crate::error::{ForecastError, Result};
use crate::scenario::{ScenarioPoint, ScenarioTable};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// One dated row of a forecast table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    /// Realized value, absent for future dates
    pub real: Option<f64>,
    /// Central forecast
    pub predicted: f64,
    /// Lower bound of the uncertainty interval
    pub lower: Option<f64>,
    /// Upper bound of the uncertainty interval
    pub upper: Option<f64>,
    /// Model confidence supplied by the upstream pipeline
    pub confidence: Option<f64>,
    /// Precomputed interval width, preferred over `upper - lower`
    pub dispersion: Option<f64>,
}

impl TimeSeriesPoint {
    /// Create a point carrying only a date and a central forecast
    pub fn new(date: NaiveDate, predicted: f64) -> Self {
        Self {
            date,
            real: None,
            predicted,
            lower: None,
            upper: None,
            confidence: None,
            dispersion: None,
        }
    }

    pub fn with_real(mut self, real: f64) -> Self {
        self.real = Some(real);
        self
    }

    pub fn with_band(mut self, lower: f64, upper: f64) -> Self {
        self.lower = Some(lower);
        self.upper = Some(upper);
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = Some(confidence);
        self
    }

    pub fn with_dispersion(mut self, dispersion: f64) -> Self {
        self.dispersion = Some(dispersion);
        self
    }

    /// Width of the uncertainty interval
    ///
    /// A precomputed dispersion wins; otherwise it is derived from the
    /// bounds. `None` when neither is available.
    pub fn dispersion(&self) -> Option<f64> {
        self.dispersion.or(match (self.lower, self.upper) {
            (Some(lower), Some(upper)) => Some(upper - lower),
            _ => None,
        })
    }
}

/// Chronologically ordered forecast rows with a date index
#[derive(Debug, Clone, Default)]
pub struct ForecastTable {
    points: Vec<TimeSeriesPoint>,
    index: HashMap<NaiveDate, usize>,
}

impl ForecastTable {
    /// Build a table, sorting rows by date
    ///
    /// Fails with [`ForecastError::DuplicateDate`] if two rows share a date.
    pub fn new(mut points: Vec<TimeSeriesPoint>) -> Result<Self> {
        points.sort_by_key(|p| p.date);

        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(ForecastError::DuplicateDate(pair[0].date));
        }

        Ok(Self::from_sorted(points))
    }

    // Caller guarantees strictly increasing dates
    fn from_sorted(points: Vec<TimeSeriesPoint>) -> Self {
        let index = points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.date, i))
            .collect();
        Self { points, index }
    }

    /// Rows in chronological order
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Look up the row for a date
    pub fn get(&self, date: NaiveDate) -> Option<&TimeSeriesPoint> {
        self.index.get(&date).map(|&i| &self.points[i])
    }

    /// Check whether the table has a row for a date
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.index.contains_key(&date)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }

    /// Rows dated within `from..=to`, as a new table
    pub fn range(&self, from: NaiveDate, to: NaiveDate) -> Self {
        let rows = self
            .points
            .iter()
            .filter(|p| p.date >= from && p.date <= to)
            .cloned()
            .collect();
        Self::from_sorted(rows)
    }

    /// Aligned `(real, predicted)` series over rows where `real` is known
    pub fn realized(&self) -> (Vec<f64>, Vec<f64>) {
        self.points
            .iter()
            .filter_map(|p| p.real.map(|r| (r, p.predicted)))
            .unzip()
    }

    /// Central forecasts in date order
    pub fn predicted(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.predicted).collect()
    }

    /// Confidence values of rows that carry one
    pub fn confidences(&self) -> Vec<f64> {
        self.points.iter().filter_map(|p| p.confidence).collect()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get the number of rows
    pub fn len(&self) -> usize {
        self.points.len()
    }
}

/// Parse a date cell, accepting plain dates and timestamps
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%d/%m/%Y") {
        return Ok(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.date_naive());
    }

    Err(ForecastError::DataError(format!(
        "Unrecognized date '{}'",
        raw
    )))
}

/// Parse a numeric cell; blanks and non-numbers are missing values
fn parse_value(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Headers plus records of a CSV file
struct CsvSheet {
    headers: Vec<String>,
    records: Vec<csv::StringRecord>,
}

impl CsvSheet {
    fn read<R: Read>(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(reader);

        let headers = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        let records = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self { headers, records })
    }

    /// Index of a column, matched exactly first, then case-insensitively
    fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name).or_else(|| {
            self.headers
                .iter()
                .position(|h| h.to_lowercase() == name.to_lowercase())
        })
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.column(name)
            .ok_or_else(|| ForecastError::missing_column(name))
    }

    fn cell<'a>(record: &'a csv::StringRecord, column: Option<usize>) -> Option<&'a str> {
        column.and_then(|i| record.get(i))
    }

    fn number(record: &csv::StringRecord, column: Option<usize>) -> Option<f64> {
        Self::cell(record, column).and_then(parse_value)
    }
}

/// Data loader for the dashboard's tabular inputs
#[derive(Debug)]
pub struct DataLoader;

impl DataLoader {
    /// Load a forecast table from a CSV file
    pub fn forecast_table<P: AsRef<Path>>(path: P, columns: &ColumnMap) -> Result<ForecastTable> {
        let path = path.as_ref();
        info!("Loading forecast table from {}", path.display());
        Self::forecast_table_from_reader(File::open(path)?, columns)
    }

    /// Load a forecast table from any CSV source
    ///
    /// The date and predicted columns are required. The other columns are
    /// optional; blank or non-numeric cells become missing values. Rows
    /// without a usable prediction are skipped.
    pub fn forecast_table_from_reader<R: Read>(
        reader: R,
        columns: &ColumnMap,
    ) -> Result<ForecastTable> {
        let sheet = CsvSheet::read(reader)?;

        let date_col = sheet.require(&columns.date)?;
        let predicted_col = sheet.require(&columns.predicted)?;
        let real_col = sheet.column(&columns.real);
        let lower_col = sheet.column(&columns.lower);
        let upper_col = sheet.column(&columns.upper);
        let confidence_col = sheet.column(&columns.confidence);
        let dispersion_col = sheet.column(&columns.dispersion);

        let mut points = Vec::with_capacity(sheet.records.len());
        for record in &sheet.records {
            let date = parse_date(CsvSheet::cell(record, Some(date_col)).unwrap_or_default())?;

            let Some(predicted) = CsvSheet::number(record, Some(predicted_col)) else {
                warn!("Skipping {}: no usable '{}' value", date, columns.predicted);
                continue;
            };

            points.push(TimeSeriesPoint {
                date,
                real: CsvSheet::number(record, real_col),
                predicted,
                lower: CsvSheet::number(record, lower_col),
                upper: CsvSheet::number(record, upper_col),
                confidence: CsvSheet::number(record, confidence_col),
                dispersion: CsvSheet::number(record, dispersion_col),
            });
        }

        info!("Loaded {} forecast rows", points.len());
        ForecastTable::new(points)
    }

    /// Load a scenario table from a CSV file
    pub fn scenario_table<P: AsRef<Path>>(path: P, columns: &ColumnMap) -> Result<ScenarioTable> {
        let path = path.as_ref();
        info!("Loading scenarios from {}", path.display());
        Self::scenario_table_from_reader(File::open(path)?, columns)
    }

    /// Load a scenario table from any CSV source
    pub fn scenario_table_from_reader<R: Read>(
        reader: R,
        columns: &ColumnMap,
    ) -> Result<ScenarioTable> {
        let sheet = CsvSheet::read(reader)?;

        let date_col = sheet.require(&columns.date)?;
        let neutral_col = sheet.require(&columns.neutral)?;
        let positive_col = sheet.require(&columns.positive)?;
        let negative_col = sheet.require(&columns.negative)?;
        let lower_col = sheet.column(&columns.lower);
        let upper_col = sheet.column(&columns.upper);
        let confidence_col = sheet.column(&columns.confidence);

        let mut points = Vec::with_capacity(sheet.records.len());
        for record in &sheet.records {
            let date = parse_date(CsvSheet::cell(record, Some(date_col)).unwrap_or_default())?;

            let scenario = (
                CsvSheet::number(record, Some(neutral_col)),
                CsvSheet::number(record, Some(positive_col)),
                CsvSheet::number(record, Some(negative_col)),
            );
            let (Some(neutral), Some(positive), Some(negative)) = scenario else {
                warn!("Skipping {}: incomplete scenario values", date);
                continue;
            };

            points.push(ScenarioPoint {
                date,
                neutral,
                positive,
                negative,
                lower: CsvSheet::number(record, lower_col),
                upper: CsvSheet::number(record, upper_col),
                confidence: CsvSheet::number(record, confidence_col),
            });
        }

        ScenarioTable::new(points)
    }

    /// Load a hit/miss outcome log from a CSV file
    pub fn outcome_log<P: AsRef<Path>>(path: P, columns: &ColumnMap) -> Result<Vec<OutcomeRecord>> {
        let path = path.as_ref();
        info!("Loading outcome log from {}", path.display());
        Self::outcome_log_from_reader(File::open(path)?, columns)
    }

    /// Load a hit/miss outcome log from any CSV source
    pub fn outcome_log_from_reader<R: Read>(
        reader: R,
        columns: &ColumnMap,
    ) -> Result<Vec<OutcomeRecord>> {
        let sheet = CsvSheet::read(reader)?;

        let date_col = sheet.require(&columns.date)?;
        let outcome_col = sheet.require(&columns.outcome)?;
        let confidence_col = sheet.column(&columns.confidence);

        let mut records = Vec::with_capacity(sheet.records.len());
        for record in &sheet.records {
            let date = parse_date(CsvSheet::cell(record, Some(date_col)).unwrap_or_default())?;
            records.push(OutcomeRecord {
                date,
                outcome: Outcome::parse(CsvSheet::cell(record, Some(outcome_col)).unwrap_or_default()),
                confidence: CsvSheet::number(record, confidence_col),
            });
        }
        records.sort_by_key(|r| r.date);

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, d).unwrap()
    }

    #[test]
    fn test_table_sorts_and_indexes() {
        let table = ForecastTable::new(vec![
            TimeSeriesPoint::new(day(12), 98.0),
            TimeSeriesPoint::new(day(10), 97.0),
            TimeSeriesPoint::new(day(11), 97.5),
        ])
        .unwrap();

        let dates: Vec<_> = table.points().iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![day(10), day(11), day(12)]);
        assert_eq!(table.get(day(11)).unwrap().predicted, 97.5);
        assert!(table.get(day(13)).is_none());
        assert_eq!(table.first_date(), Some(day(10)));
        assert_eq!(table.last_date(), Some(day(12)));
    }

    #[test]
    fn test_duplicate_dates_rejected() {
        let result = ForecastTable::new(vec![
            TimeSeriesPoint::new(day(10), 97.0),
            TimeSeriesPoint::new(day(10), 97.5),
        ]);
        assert!(matches!(result, Err(ForecastError::DuplicateDate(d)) if d == day(10)));
    }

    #[test]
    fn test_dispersion_prefers_precomputed() {
        let point = TimeSeriesPoint::new(day(1), 100.0).with_band(98.0, 103.0);
        assert_eq!(point.dispersion(), Some(5.0));
        assert_eq!(point.clone().with_dispersion(4.0).dispersion(), Some(4.0));
        assert_eq!(TimeSeriesPoint::new(day(1), 100.0).dispersion(), None);
    }

    #[test]
    fn test_range_is_inclusive() {
        let table = ForecastTable::new((1..=9).map(|d| TimeSeriesPoint::new(day(d), d as f64)).collect())
            .unwrap();
        let subset = table.range(day(3), day(5));
        assert_eq!(subset.len(), 3);
        assert_eq!(subset.get(day(5)).unwrap().predicted, 5.0);
        assert!(table.range(day(5), day(3)).is_empty());
    }

    #[test]
    fn test_realized_skips_future_rows() {
        let table = ForecastTable::new(vec![
            TimeSeriesPoint::new(day(1), 100.0).with_real(101.0),
            TimeSeriesPoint::new(day(2), 102.0),
            TimeSeriesPoint::new(day(3), 103.0).with_real(102.5),
        ])
        .unwrap();
        let (real, predicted) = table.realized();
        assert_eq!(real, vec![101.0, 102.5]);
        assert_eq!(predicted, vec![100.0, 103.0]);
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2025-09-10").unwrap(), day(10));
        assert_eq!(parse_date("10/09/2025").unwrap(), day(10));
        assert_eq!(parse_date("2025-09-10 00:00:00").unwrap(), day(10));
        assert_eq!(parse_date("2025-09-10T00:00:00Z").unwrap(), day(10));
        assert!(parse_date("September").is_err());
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value(" 1.25 "), Some(1.25));
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value("NaN"), None);
    }
}
