//! Dashboard configuration
//!
//! Paths, column names and credentials are passed in explicitly; nothing
//! here is read by the evaluation code itself. A configuration can be
//! loaded from a TOML file, and the spot-rate API key can be supplied
//! through the `FRED_API_KEY` environment variable.

use crate::error::{ForecastError, Result};
use forecast_math::DeviationKind;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides [`SpotConfig::api_key`]
pub const API_KEY_ENV: &str = "FRED_API_KEY";

/// Column names of the tabular inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMap {
    pub date: String,
    pub real: String,
    pub predicted: String,
    pub lower: String,
    pub upper: String,
    pub dispersion: String,
    pub confidence: String,
    pub outcome: String,
    pub neutral: String,
    pub positive: String,
    pub negative: String,
}

impl Default for ColumnMap {
    fn default() -> Self {
        Self {
            date: "Fecha".to_string(),
            real: "DXY real".to_string(),
            predicted: "DXY estimado".to_string(),
            lower: "yhat_lower".to_string(),
            upper: "yhat_upper".to_string(),
            dispersion: "Dispersión".to_string(),
            confidence: "Confianza".to_string(),
            outcome: "Acierto".to_string(),
            neutral: "DXY_neutro".to_string(),
            positive: "DXY_positivo".to_string(),
            negative: "DXY_negativo".to_string(),
        }
    }
}

/// How MAPE treats a realized value of zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroRealPolicy {
    /// Abort the evaluation with a division-by-zero error
    #[default]
    Fail,
    /// Leave zero rows out of MAPE only
    Exclude,
}

/// Evaluator settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluatorConfig {
    pub zero_real: ZeroRealPolicy,
}

/// Anomaly detector settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Denominator used for both threshold deviations
    pub deviation: DeviationKind,
}

/// Cut-offs for the hit-rate reliability diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagnosisConfig {
    /// Minimum hit rate (percent) for high reliability
    pub high_hit_rate: f64,
    /// Minimum mean confidence for high reliability
    pub high_confidence: f64,
    /// Minimum hit rate (percent) for moderate reliability
    pub moderate_hit_rate: f64,
}

impl Default for DiagnosisConfig {
    fn default() -> Self {
        Self {
            high_hit_rate: 80.0,
            high_confidence: 0.15,
            moderate_hit_rate: 65.0,
        }
    }
}

/// Spot-rate service settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpotConfig {
    pub endpoint: String,
    pub series_id: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for SpotConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api.stlouisfed.org/fred/series/observations".to_string(),
            series_id: "DEXUSEU".to_string(),
            timeout_secs: 10,
            api_key: None,
        }
    }
}

/// Locations of the precomputed data files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPaths {
    /// Realized vs. predicted comparison series
    pub comparison: PathBuf,
    /// Future forecasts with uncertainty band
    pub forecasts: PathBuf,
    /// Neutral/positive/negative scenarios
    pub scenarios: PathBuf,
    /// Daily hit/miss log for one month
    pub outcomes: PathBuf,
}

impl Default for DataPaths {
    fn default() -> Self {
        Self {
            comparison: PathBuf::from("comparativa_dxy_modelo.csv"),
            forecasts: PathBuf::from("predicciones_2025_2029.csv"),
            scenarios: PathBuf::from("escenarios_dxy_2025_2029.csv"),
            outcomes: PathBuf::from("comparativa_julio_2025.csv"),
        }
    }
}

/// Complete dashboard configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub paths: DataPaths,
    pub columns: ColumnMap,
    pub evaluator: EvaluatorConfig,
    pub detector: DetectorConfig,
    pub diagnosis: DiagnosisConfig,
    pub spot: SpotConfig,
}

impl DashboardConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file, then apply environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading configuration from {}", path.display());
        let mut config = Self::from_toml_str(&fs::read_to_string(path)?)?;
        config.apply_env();
        Ok(config)
    }

    /// Defaults plus environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Take the API key from the environment when it is set
    pub fn apply_env(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV) {
            if !key.trim().is_empty() {
                self.spot.api_key = Some(key.trim().to_string());
            }
        }
    }

    /// Check the configuration for inconsistent values
    pub fn validate(&self) -> Result<()> {
        let d = &self.diagnosis;
        for (name, value) in [
            ("high_hit_rate", d.high_hit_rate),
            ("moderate_hit_rate", d.moderate_hit_rate),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(ForecastError::ConfigError(format!(
                    "diagnosis.{} must be between 0 and 100, got {}",
                    name, value
                )));
            }
        }
        if d.moderate_hit_rate > d.high_hit_rate {
            return Err(ForecastError::ConfigError(
                "diagnosis.moderate_hit_rate cannot exceed diagnosis.high_hit_rate".to_string(),
            ));
        }
        if self.columns.date.trim().is_empty() || self.columns.predicted.trim().is_empty() {
            return Err(ForecastError::ConfigError(
                "columns.date and columns.predicted must be named".to_string(),
            ));
        }
        if self.spot.timeout_secs == 0 {
            return Err(ForecastError::ConfigError(
                "spot.timeout_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = DashboardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.columns.predicted, "DXY estimado");
        assert_eq!(config.evaluator.zero_real, ZeroRealPolicy::Fail);
        assert_eq!(config.detector.deviation, DeviationKind::Population);
        assert!(config.spot.api_key.is_none());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = DashboardConfig::from_toml_str(
            r#"
            [detector]
            deviation = "sample"

            [evaluator]
            zero_real = "exclude"

            [columns]
            predicted = "forecast"
            "#,
        )
        .unwrap();

        assert_eq!(config.detector.deviation, DeviationKind::Sample);
        assert_eq!(config.evaluator.zero_real, ZeroRealPolicy::Exclude);
        assert_eq!(config.columns.predicted, "forecast");
        assert_eq!(config.columns.date, "Fecha");
        assert_eq!(config.diagnosis, DiagnosisConfig::default());
    }

    #[test]
    fn test_invalid_diagnosis_rejected() {
        let result = DashboardConfig::from_toml_str(
            r#"
            [diagnosis]
            high_hit_rate = 60.0
            moderate_hit_rate = 70.0
            "#,
        );
        assert!(matches!(result, Err(ForecastError::ConfigError(_))));
    }

    #[test]
    fn test_malformed_toml_is_config_error() {
        let result = DashboardConfig::from_toml_str("detector = [");
        assert!(matches!(result, Err(ForecastError::ConfigError(_))));
    }
}
