//! Assessment Types
//!
//! Output structures of the engine: one `EvaluatedReading` per scored
//! parameter and the `AssessmentResult` handed to the report/chart layer.

use super::deviation::{self, SafetyStatus};
use super::scorer;
use crate::catalog::{CategoryId, Parameter};
use serde::{Deserialize, Serialize};

/// Overall quality tier, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallStatus {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl OverallStatus {
    pub fn display_text(&self) -> &'static str {
        match self {
            OverallStatus::Excellent => "Excellent",
            OverallStatus::Good => "Good",
            OverallStatus::Fair => "Fair",
            OverallStatus::Poor => "Poor",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            OverallStatus::Excellent => "All parameters are within safe limits",
            OverallStatus::Good => "One parameter is outside safe limits",
            OverallStatus::Fair => "Several parameters are outside safe limits",
            OverallStatus::Poor => "Most parameters are outside safe limits; treatment is advised",
        }
    }
}

/// A validated reading scored against its safe range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedReading {
    pub parameter_name: String,
    pub value: f64,
    pub status: SafetyStatus,

    /// Distance outside the safe range, >= 0
    pub deviation: f64,

    /// 0-100, 100 when within the safe range
    pub safeness_percentage: f64,
}

impl EvaluatedReading {
    /// Run deviation and scoring for an already-validated value
    pub fn evaluate(parameter: &Parameter, value: f64) -> Self {
        let dev = deviation::evaluate(value, parameter.safe_range);
        Self {
            parameter_name: parameter.name.clone(),
            value,
            status: dev.status,
            deviation: dev.deviation,
            safeness_percentage: scorer::score(value, parameter.safe_range),
        }
    }

    pub fn is_safe(&self) -> bool {
        self.status == SafetyStatus::Safe
    }
}

/// Result of one assessment session
///
/// `evaluated_readings` follows the catalog's parameter order.
/// `overall_status` is `None` until the session is submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub category: CategoryId,
    pub evaluated_readings: Vec<EvaluatedReading>,
    pub safe_count: usize,
    pub unsafe_count: usize,
    pub overall_status: Option<OverallStatus>,
}

impl AssessmentResult {
    /// Build from evaluated readings, counting safe and unsafe entries
    pub fn new(
        category: CategoryId,
        evaluated_readings: Vec<EvaluatedReading>,
        overall_status: Option<OverallStatus>,
    ) -> Self {
        let unsafe_count = evaluated_readings.iter().filter(|r| !r.is_safe()).count();
        let safe_count = evaluated_readings.len() - unsafe_count;
        Self {
            category,
            evaluated_readings,
            safe_count,
            unsafe_count,
            overall_status,
        }
    }

    pub fn reading(&self, parameter_name: &str) -> Option<&EvaluatedReading> {
        self.evaluated_readings
            .iter()
            .find(|r| r.parameter_name == parameter_name)
    }

    pub fn has_unsafe(&self) -> bool {
        self.unsafe_count > 0
    }

    /// Share of evaluated parameters that are safe, in percent (chart input)
    pub fn safe_percentage(&self) -> f64 {
        let total = self.evaluated_readings.len();
        if total == 0 {
            return 0.0;
        }
        self.safe_count as f64 / total as f64 * 100.0
    }

    pub fn unsafe_percentage(&self) -> f64 {
        if self.evaluated_readings.is_empty() {
            return 0.0;
        }
        100.0 - self.safe_percentage()
    }
}
