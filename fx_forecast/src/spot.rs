//! Latest USD/EUR spot rate from the FRED observations API

use crate::config::SpotConfig;
use crate::data::parse_date;
use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Latest published observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpotQuote {
    pub date: NaiveDate,
    /// Rate rounded to four decimals
    pub value: f64,
}

/// Outcome of a spot-rate request, ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SpotStatus {
    Live { quote: SpotQuote, latency_ms: f64 },
    Unavailable { reason: String },
}

#[derive(Debug, Deserialize)]
struct ObservationsPayload {
    observations: Vec<Observation>,
}

#[derive(Debug, Deserialize)]
struct Observation {
    date: String,
    value: String,
}

/// Pick the latest numeric observation out of a FRED payload
///
/// FRED marks missing days with `"."`; those and any other non-numeric
/// values are skipped.
pub fn parse_observations(json: &str) -> Result<SpotQuote> {
    let payload: ObservationsPayload = serde_json::from_str(json)?;

    let mut latest: Option<SpotQuote> = None;
    for obs in &payload.observations {
        let Ok(value) = obs.value.trim().parse::<f64>() else {
            continue;
        };
        if !value.is_finite() {
            continue;
        }
        let date = parse_date(&obs.date)?;
        if latest.is_none_or(|q| date > q.date) {
            latest = Some(SpotQuote {
                date,
                value: (value * 10_000.0).round() / 10_000.0,
            });
        }
    }

    latest.ok_or_else(|| ForecastError::DataError("No valid observations in response".to_string()))
}

/// Blocking client for the observations endpoint
#[derive(Debug)]
pub struct SpotClient {
    config: SpotConfig,
    http: reqwest::blocking::Client,
}

impl SpotClient {
    pub fn new(config: SpotConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { config, http })
    }

    /// Fetch the latest observation and the request latency in milliseconds
    pub fn latest(&self) -> Result<(SpotQuote, f64)> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| ForecastError::ConfigError("No spot-rate API key configured".to_string()))?;

        debug!("Requesting series {} from {}", self.config.series_id, self.config.endpoint);
        let start = Instant::now();
        let response = self
            .http
            .get(&self.config.endpoint)
            .query(&[
                ("series_id", self.config.series_id.as_str()),
                ("api_key", api_key),
                ("file_type", "json"),
            ])
            .send()?;
        let latency_ms = (start.elapsed().as_secs_f64() * 1000.0 * 100.0).round() / 100.0;

        let body = response.error_for_status()?.text()?;
        let quote = parse_observations(&body)?;
        info!("Spot rate {} on {} ({} ms)", quote.value, quote.date, latency_ms);

        Ok((quote, latency_ms))
    }

    /// Fetch the latest observation, folding failures into a status
    pub fn status(&self) -> SpotStatus {
        match self.latest() {
            Ok((quote, latency_ms)) => SpotStatus::Live { quote, latency_ms },
            Err(err) => SpotStatus::Unavailable {
                reason: err.to_string(),
            },
        }
    }
}
