//! Neutral, positive and negative scenario paths

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Scenario values for one date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioPoint {
    pub date: NaiveDate,
    /// Stable macroeconomic conditions
    pub neutral: f64,
    /// Favourable conditions
    pub positive: f64,
    /// Adverse conditions
    pub negative: f64,
    /// Lower bound of the neutral interval
    pub lower: Option<f64>,
    /// Upper bound of the neutral interval
    pub upper: Option<f64>,
    pub confidence: Option<f64>,
}

impl ScenarioPoint {
    /// Distance between the favourable and adverse paths
    pub fn spread(&self) -> f64 {
        self.positive - self.negative
    }
}

/// Date-indexed scenario rows, sorted chronologically
#[derive(Debug, Clone, Default)]
pub struct ScenarioTable {
    points: Vec<ScenarioPoint>,
    index: HashMap<NaiveDate, usize>,
}

impl ScenarioTable {
    pub fn new(mut points: Vec<ScenarioPoint>) -> Result<Self> {
        points.sort_by_key(|p| p.date);

        if let Some(pair) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(ForecastError::DuplicateDate(pair[0].date));
        }

        let index = points
            .iter()
            .enumerate()
            .map(|(i, p)| (p.date, i))
            .collect();
        Ok(Self { points, index })
    }

    pub fn get(&self, date: NaiveDate) -> Option<&ScenarioPoint> {
        self.index.get(&date).map(|&i| &self.points[i])
    }

    pub fn points(&self) -> &[ScenarioPoint] {
        &self.points
    }

    /// First and last dates covered
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}
