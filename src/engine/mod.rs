//! Assessment Engine
//!
//! Pure, synchronous scoring of water-quality readings.
//!
//! ## Architecture
//! - `validator.rs` - Raw input -> number, checked against the absolute range
//! - `deviation.rs` - Distance from the safe range and safe/unsafe status
//! - `scorer.rs` - 0-100 "within limits" percentage
//! - `classifier.rs` - Overall tier from the unsafe readings
//! - `assessment.rs` - EvaluatedReading and AssessmentResult output structs

pub mod validator;
pub mod deviation;
pub mod scorer;
pub mod classifier;
pub mod assessment;

pub use validator::validate;
pub use deviation::{evaluate, Deviation, RangeSide, SafetyStatus};
pub use scorer::score;
pub use classifier::{classify, classify_with, TierPolicy};
pub use assessment::{AssessmentResult, EvaluatedReading, OverallStatus};
