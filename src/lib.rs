//! Water Quality Assessment Engine
//!
//! Validates user-entered water test readings, scores each one against the
//! safe range for the chosen water use, and aggregates them into an overall
//! quality tier that drives follow-up recommendations.
//!
//! Layout:
//! - `catalog/`: Water-use categories and their parameter ranges
//! - `engine/`: Validation, deviation, scoring and classification
//! - `session`: Per-user state machine over the engine
//! - `advice`: Recommendations and markdown report text
//! - `config`: Environment and catalog-file configuration

pub mod error;
pub mod catalog;
pub mod engine;
pub mod session;
pub mod advice;
pub mod config;

// Re-export commonly used types
pub use error::{AssessmentError, CatalogError, FieldError, ValidationError};
pub use catalog::{CategoryId, Parameter, ParameterCatalog, Range, WaterCategory};
pub use engine::{AssessmentResult, EvaluatedReading, OverallStatus, SafetyStatus, TierPolicy};
pub use session::{AssessmentSession, FieldState, SessionState};
pub use advice::{generate_report, recommendations, Recommendation};
pub use config::EngineConfig;
