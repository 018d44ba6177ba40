//! Advice Generation
//!
//! Turns an evaluated result into follow-up recommendations and a markdown
//! summary for the report layer. Nothing here affects the verdict itself.

use crate::catalog::{format_number, Parameter, WaterCategory};
use crate::engine::{evaluate, AssessmentResult, EvaluatedReading, RangeSide};
use serde::Serialize;

/// Follow-up actions offered after an assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    /// Talk to a water-treatment specialist
    RequestConsultation,
    /// Confirm the reading with a home test kit
    BuyTestKit,
    /// Nothing flagged; keep testing on schedule
    RoutineMonitoring,
}

impl Recommendation {
    pub fn display_text(&self) -> &'static str {
        match self {
            Recommendation::RequestConsultation => "Request a consultation with a water specialist",
            Recommendation::BuyTestKit => "Buy a test kit to confirm these readings",
            Recommendation::RoutineMonitoring => "Keep monitoring on your regular schedule",
        }
    }
}

/// Recommendations for a submitted result; empty until a verdict exists
pub fn recommendations(result: &AssessmentResult) -> Vec<Recommendation> {
    if result.overall_status.is_none() {
        return Vec::new();
    }

    if result.has_unsafe() {
        vec![Recommendation::RequestConsultation, Recommendation::BuyTestKit]
    } else {
        vec![Recommendation::RoutineMonitoring]
    }
}

/// One-line explanation of a reading against its safe range
/// E.g., "Turbidity: 3 NTU, above safe range 0-1 NTU by 2"
pub fn explain_reading(parameter: &Parameter, reading: &EvaluatedReading) -> String {
    let unit = unit_suffix(&parameter.unit);
    let range = format!("{}{}", parameter.safe_range.display_text(), unit);
    let value = format!("{}{}", format_number(reading.value), unit);

    match evaluate(reading.value, parameter.safe_range).side {
        RangeSide::Within => format!("{}: {}, within safe range {}", parameter.name, value, range),
        RangeSide::Below => format!(
            "{}: {}, below safe range {} by {}",
            parameter.name,
            value,
            range,
            format_number(reading.deviation)
        ),
        RangeSide::Above => format!(
            "{}: {}, above safe range {} by {}",
            parameter.name,
            value,
            range,
            format_number(reading.deviation)
        ),
    }
}

fn unit_suffix(unit: &str) -> String {
    if unit.is_empty() {
        String::new()
    } else {
        format!(" {}", unit)
    }
}

/// Unsafe rows are floored so they never round up to 100%
fn displayed_percentage(reading: &EvaluatedReading) -> f64 {
    if reading.is_safe() {
        reading.safeness_percentage
    } else {
        reading.safeness_percentage.floor()
    }
}

// ============================================================================
// Markdown Report
// ============================================================================

/// Markdown summary of a result for the report/export layer
pub fn generate_report(category: &WaterCategory, result: &AssessmentResult) -> String {
    let mut lines = Vec::new();

    lines.push(format!("## {} Assessment", category.id.display_text()));
    lines.push(String::new());

    match result.overall_status {
        Some(status) => {
            lines.push(format!("**Overall: {}** - {}", status.display_text(), status.description()));
        }
        None => lines.push("**Overall: not yet evaluated**".to_string()),
    }
    lines.push(String::new());

    lines.push("| Parameter | Value | Safe Range | Status | Within Limits |".to_string());
    lines.push("|---|---|---|---|---|".to_string());
    for parameter in &category.parameters {
        let row = match result.reading(&parameter.name) {
            Some(reading) => format!(
                "| {} | {}{} | {}{} | {} | {:.0}% |",
                parameter.name,
                format_number(reading.value),
                unit_suffix(&parameter.unit),
                parameter.safe_range.display_text(),
                unit_suffix(&parameter.unit),
                reading.status.display_text(),
                displayed_percentage(reading)
            ),
            None => format!(
                "| {} | - | {}{} | - | - |",
                parameter.name,
                parameter.safe_range.display_text(),
                unit_suffix(&parameter.unit)
            ),
        };
        lines.push(row);
    }
    lines.push(String::new());

    lines.push(format!(
        "Safe: {:.0}% ({} of {}), unsafe: {:.0}%",
        result.safe_percentage(),
        result.safe_count,
        result.evaluated_readings.len(),
        result.unsafe_percentage()
    ));

    let issues: Vec<String> = category
        .parameters
        .iter()
        .filter_map(|p| result.reading(&p.name).map(|r| (p, r)))
        .filter(|(_, r)| !r.is_safe())
        .map(|(p, r)| format!("- {}", explain_reading(p, r)))
        .collect();
    if !issues.is_empty() {
        lines.push(String::new());
        lines.push("### Issues".to_string());
        lines.extend(issues);
    }

    let recs = recommendations(result);
    if !recs.is_empty() {
        lines.push(String::new());
        lines.push("### Next Steps".to_string());
        lines.extend(recs.iter().map(|r| format!("- {}", r.display_text())));
    }

    lines.join("\n")
}
