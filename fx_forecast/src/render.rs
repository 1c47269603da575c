//! Plain-text rendering of evaluation and alerting results
//!
//! All number formatting lives here. The computation modules only hand
//! back values; the row highlighting of alerts is a `!` marker.

use crate::anomaly::{AlertRow, AnomalyReport};
use crate::diagnosis::Diagnosis;
use crate::metrics::EvaluationReport;
use crate::report::{PeriodSummary, PointForecast};
use crate::scenario::ScenarioPoint;
use crate::spot::SpotStatus;
use std::fmt;

const NOT_AVAILABLE: &str = "N/A";

/// Format an optional value with two decimals
pub fn fmt_opt(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:.2}", v))
}

/// Format an optional day-over-day change with an explicit sign
pub fn fmt_signed(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), |v| format!("{:+.2}", v))
}

fn fmt_range(lower: Option<f64>, upper: Option<f64>) -> String {
    match (lower, upper) {
        (Some(l), Some(u)) => format!("{:.2} - {:.2}", l, u),
        _ => NOT_AVAILABLE.to_string(),
    }
}

impl fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forecast Performance Metrics ({} points):", self.points)?;
        writeln!(f, "  MAE:        {:.2}", self.mae)?;
        writeln!(f, "  RMSE:       {:.2}", self.rmse)?;
        match self.mape {
            Some(mape) => writeln!(f, "  MAPE:       {:.2}%", mape)?,
            None => writeln!(f, "  MAPE:       {}", NOT_AVAILABLE)?,
        }
        writeln!(f, "  Bias:       {:+.2}", self.bias)?;
        writeln!(f, "  Direction:  {:.2}%", self.directional_accuracy)?;
        writeln!(f, "  Confidence: {}", fmt_opt(self.mean_confidence))?;
        Ok(())
    }
}

impl fmt::Display for AlertRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.point;
        write!(
            f,
            "{} {}  {:>10.2}  {:>10}  {:>10}  {:>10.2}  {:>10}  {:>10}",
            if self.is_alert { "!" } else { " " },
            p.date,
            p.predicted,
            fmt_opt(p.lower),
            fmt_opt(p.upper),
            self.dispersion,
            fmt_opt(p.confidence),
            fmt_signed(self.variation),
        )
    }
}

impl fmt::Display for AnomalyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} of {} days flagged (dispersion > {:.2} or |variation| > {:.2})",
            self.flagged,
            self.total,
            self.thresholds.dispersion_threshold,
            self.thresholds.variation_threshold
        )?;
        if self.alerts.is_empty() {
            return Ok(());
        }
        writeln!(
            f,
            "  {:<10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}  {:>10}",
            "date", "predicted", "lower", "upper", "dispersion", "confidence", "variation"
        )?;
        for row in &self.alerts {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl fmt::Display for Diagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Reliability: {}", self.reliability)?;
        writeln!(f, "  Hits:       {} ({:.2}%)", self.hits, self.hit_rate)?;
        writeln!(f, "  Misses:     {} ({:.2}%)", self.misses, self.miss_rate)?;
        writeln!(f, "  Days:       {}", self.total)?;
        writeln!(f, "  Confidence: {}", fmt_opt(self.mean_confidence))?;
        Ok(())
    }
}

impl fmt::Display for PointForecast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forecast for {}", self.date.format("%d/%m/%Y"))?;
        writeln!(f, "  Estimate:   {:.2}", self.predicted)?;
        writeln!(f, "  Range:      {}", fmt_range(self.lower, self.upper))?;
        writeln!(f, "  Confidence: {}", fmt_opt(self.confidence))?;
        Ok(())
    }
}

impl fmt::Display for ScenarioPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scenarios for {}", self.date.format("%d/%m/%Y"))?;
        writeln!(f, "  Neutral:    {:.2}", self.neutral)?;
        writeln!(f, "  Positive:   {:.2}", self.positive)?;
        writeln!(f, "  Negative:   {:.2}", self.negative)?;
        writeln!(f, "  Range:      {}", fmt_range(self.lower, self.upper))?;
        writeln!(f, "  Confidence: {}", fmt_opt(self.confidence))?;
        Ok(())
    }
}

impl fmt::Display for PeriodSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Forecast report {} to {} ({} days)", self.from, self.to, self.days)?;
        for p in self.table.points() {
            writeln!(
                f,
                "  {}  {:>10.2}  {:>10}  {:>10}  {:>10}  {:>10}",
                p.date,
                p.predicted,
                fmt_opt(p.lower),
                fmt_opt(p.upper),
                fmt_opt(p.dispersion()),
                fmt_opt(p.confidence),
            )?;
        }
        writeln!(f, "  Mean estimate:   {:.2}", self.mean_predicted)?;
        writeln!(f, "  Mean confidence: {}", fmt_opt(self.mean_confidence))?;
        writeln!(f, "  Mean dispersion: {}", fmt_opt(self.mean_dispersion))?;
        Ok(())
    }
}

impl fmt::Display for SpotStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpotStatus::Live { quote, latency_ms } => write!(
                f,
                "1 USD = {} EUR on {} (latency {} ms, FRED OK)",
                quote.value, quote.date, latency_ms
            ),
            SpotStatus::Unavailable { reason } => write!(f, "Spot rate unavailable: {}", reason),
        }
    }
}
