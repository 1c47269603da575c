//! # FX Forecast
//!
//! Evaluation and alerting for precomputed USD/EUR and DXY index forecasts.
//!
//! The forecasts themselves come from an offline modelling pipeline; this
//! crate only reads them. It provides:
//!
//! - Date-indexed forecast tables and a CSV loader
//! - Accuracy, error, bias and directional-accuracy metrics
//! - Threshold-based anomaly flags on forecast rows
//! - A hit-rate reliability diagnosis, scenario lookups and period reports
//! - The latest spot rate from FRED
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use fx_forecast::{detect_anomalies, evaluate, ForecastTable, TimeSeriesPoint};
//!
//! let report = evaluate(&[104.1, 104.5, 103.9], &[104.0, 104.6, 104.2])?;
//! assert!(report.rmse >= report.mae);
//!
//! let day = |d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
//! let table = ForecastTable::new(vec![
//!     TimeSeriesPoint::new(day(10), 97.2).with_band(96.1, 98.3),
//!     TimeSeriesPoint::new(day(11), 97.4).with_band(96.2, 98.6),
//!     TimeSeriesPoint::new(day(12), 97.3).with_band(95.0, 99.9),
//! ])?;
//! let alerts = detect_anomalies(&table)?;
//! assert_eq!(alerts.flagged, alerts.alerts.len());
//! # Ok::<(), fx_forecast::ForecastError>(())
//! ```

pub mod anomaly;
pub mod config;
pub mod data;
pub mod diagnosis;
pub mod error;
pub mod metrics;
pub mod render;
pub mod report;
pub mod scenario;
pub mod spot;

// Re-export commonly used types
pub use crate::anomaly::{
    detect_anomalies, AlertRow, AnomalyDetector, AnomalyReport, AnomalyThresholds,
};
pub use crate::config::{DashboardConfig, DetectorConfig, EvaluatorConfig, ZeroRealPolicy};
pub use crate::data::{DataLoader, ForecastTable, TimeSeriesPoint};
pub use crate::diagnosis::{diagnose, Diagnosis, Outcome, OutcomeRecord, Reliability};
pub use crate::error::{ForecastError, Result};
pub use crate::metrics::{evaluate, evaluate_table, EvaluationReport, Evaluator};
pub use crate::report::{lookup, summarize_period, PeriodSummary, PointForecast};
pub use crate::scenario::{ScenarioPoint, ScenarioTable};
pub use crate::spot::{SpotClient, SpotQuote, SpotStatus};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
