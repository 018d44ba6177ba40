//! Built-in parameter tables
//!
//! Default safe and absolute ranges for the four water-use categories.

use super::{CategoryId, Parameter, Range};

// ============================================================================
// Shared absolute ranges
// ============================================================================

const PH_ABSOLUTE: Range = Range::new(0.0, 14.0);
const TURBIDITY_ABSOLUTE: Range = Range::new(0.0, 100.0);
const CHLORINE_ABSOLUTE: Range = Range::new(0.0, 10.0);
const TDS_ABSOLUTE: Range = Range::new(0.0, 10_000.0);

/// Parameters for a category, in display order
pub fn parameters_for(id: CategoryId) -> Vec<Parameter> {
    match id {
        CategoryId::Potable => potable(),
        CategoryId::NonPotable => non_potable(),
        CategoryId::Agricultural => agricultural(),
        CategoryId::Industrial => industrial(),
    }
}

/// Drinking water
fn potable() -> Vec<Parameter> {
    vec![
        Parameter::new("pH", "", Range::new(6.5, 8.5), PH_ABSOLUTE),
        Parameter::new("Turbidity", "NTU", Range::new(0.0, 1.0), TURBIDITY_ABSOLUTE),
        Parameter::new("Chlorine", "mg/L", Range::new(0.2, 2.0), CHLORINE_ABSOLUTE),
        Parameter::new("Total Dissolved Solids", "mg/L", Range::new(50.0, 500.0), TDS_ABSOLUTE),
    ]
}

/// Washing, flushing, landscaping
fn non_potable() -> Vec<Parameter> {
    vec![
        Parameter::new("pH", "", Range::new(6.0, 9.0), PH_ABSOLUTE),
        Parameter::new("Turbidity", "NTU", Range::new(0.0, 5.0), TURBIDITY_ABSOLUTE),
        Parameter::new("Chlorine", "mg/L", Range::new(0.5, 4.0), CHLORINE_ABSOLUTE),
        Parameter::new("BOD", "mg/L", Range::new(0.0, 30.0), Range::new(0.0, 500.0)),
    ]
}

/// Irrigation and livestock
fn agricultural() -> Vec<Parameter> {
    vec![
        Parameter::new("pH", "", Range::new(6.0, 8.5), PH_ABSOLUTE),
        Parameter::new("Electrical Conductivity", "dS/m", Range::new(0.0, 3.0), Range::new(0.0, 20.0)),
        Parameter::new("Sodium Adsorption Ratio", "", Range::new(0.0, 9.0), Range::new(0.0, 50.0)),
        Parameter::new("Nitrate", "mg/L", Range::new(0.0, 45.0), Range::new(0.0, 500.0)),
    ]
}

/// Process and cooling water
fn industrial() -> Vec<Parameter> {
    vec![
        Parameter::new("pH", "", Range::new(6.5, 9.0), PH_ABSOLUTE),
        Parameter::new("Hardness", "mg/L CaCO3", Range::new(0.0, 300.0), Range::new(0.0, 2_000.0)),
        Parameter::new("Total Dissolved Solids", "mg/L", Range::new(0.0, 1_000.0), TDS_ABSOLUTE),
        Parameter::new("Iron", "mg/L", Range::new(0.0, 0.3), Range::new(0.0, 50.0)),
    ]
}
