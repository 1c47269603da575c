//! Error types for the fx_forecast crate

use chrono::NaiveDate;
use forecast_math::MathError;
use thiserror::Error;

/// Custom error types for the fx_forecast crate
#[derive(Debug, Error)]
pub enum ForecastError {
    /// Too few aligned points for the requested computation
    #[error("Insufficient data: need at least {required} points, have {actual}")]
    InsufficientData { required: usize, actual: usize },

    /// A realized value of zero made a relative error undefined
    #[error("Division by zero: realized value at index {index} is zero")]
    DivisionByZero { index: usize },

    /// A required column or field could not be found or derived
    #[error("Missing field '{field}'{}", .date.map(|d| format!(" on {}", d)).unwrap_or_default())]
    MissingField {
        field: String,
        date: Option<NaiveDate>,
    },

    /// Real and predicted series are not index-aligned
    #[error("Length mismatch: {real} real values vs {predicted} predicted values")]
    LengthMismatch { real: usize, predicted: usize },

    /// The same date appears twice in a table
    #[error("Duplicate date in table: {0}")]
    DuplicateDate(NaiveDate),

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error in dashboard configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Error talking to the spot-rate service
    #[error("API error: {0}")]
    ApiError(String),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from JSON parsing
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error from the math helpers
    #[error("Math error: {0}")]
    MathError(MathError),
}

impl ForecastError {
    /// Shorthand for a missing table-level column
    pub fn missing_column(field: impl Into<String>) -> Self {
        ForecastError::MissingField {
            field: field.into(),
            date: None,
        }
    }

    /// Shorthand for a field missing on a specific row
    pub fn missing_on(field: impl Into<String>, date: NaiveDate) -> Self {
        ForecastError::MissingField {
            field: field.into(),
            date: Some(date),
        }
    }
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, ForecastError>;

impl From<toml::de::Error> for ForecastError {
    fn from(err: toml::de::Error) -> Self {
        ForecastError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for ForecastError {
    /// The request URL carries the API key as a query parameter, so it is
    /// stripped before the message is kept.
    fn from(err: reqwest::Error) -> Self {
        ForecastError::ApiError(err.without_url().to_string())
    }
}

impl From<MathError> for ForecastError {
    fn from(err: MathError) -> Self {
        match err {
            MathError::InsufficientData { required, actual } => {
                ForecastError::InsufficientData { required, actual }
            }
            other => ForecastError::MathError(other),
        }
    }
}
