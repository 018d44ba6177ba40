//! Quality Classifier
//!
//! Aggregates evaluated readings into an overall tier. The default policy
//! counts unsafe parameters (0/1/2/3+); the ratio policy scales the same
//! boundaries to categories of any size.

use super::assessment::{EvaluatedReading, OverallStatus};
use crate::error::TierPolicyError;
use serde::{Deserialize, Serialize};

/// How unsafe readings map onto tiers
///
/// Deserialization goes through `TierPolicy::validate`, so a config file
/// cannot supply ratio boundaries that skip a tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case", try_from = "UncheckedTierPolicy")]
pub enum TierPolicy {
    /// 0 -> excellent, 1 -> good, 2 -> fair, 3+ -> poor
    UnsafeCount,

    /// Fraction of unsafe readings: 0 -> excellent, <= good -> good,
    /// <= fair -> fair, otherwise poor
    UnsafeRatio { good: f64, fair: f64 },
}

impl TierPolicy {
    /// Ratio boundaries equivalent to the count table for four parameters
    pub const DEFAULT_RATIO: TierPolicy = TierPolicy::UnsafeRatio { good: 0.25, fair: 0.5 };

    /// Ratio policy with finite boundaries `0 <= good <= fair <= 1`
    pub fn ratio(good: f64, fair: f64) -> Result<Self, TierPolicyError> {
        TierPolicy::UnsafeRatio { good, fair }.validate()
    }

    pub fn validate(self) -> Result<Self, TierPolicyError> {
        match self {
            TierPolicy::UnsafeCount => Ok(self),
            TierPolicy::UnsafeRatio { good, fair } => {
                // NaN fails every comparison, so it is rejected here too
                let ordered = 0.0 <= good && good <= fair && fair <= 1.0;
                if ordered {
                    Ok(self)
                } else {
                    Err(TierPolicyError { good, fair })
                }
            }
        }
    }
}

/// Wire form of `TierPolicy` before boundary checks
#[derive(Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
enum UncheckedTierPolicy {
    UnsafeCount,
    UnsafeRatio { good: f64, fair: f64 },
}

impl TryFrom<UncheckedTierPolicy> for TierPolicy {
    type Error = TierPolicyError;

    fn try_from(raw: UncheckedTierPolicy) -> Result<Self, Self::Error> {
        match raw {
            UncheckedTierPolicy::UnsafeCount => Ok(TierPolicy::UnsafeCount),
            UncheckedTierPolicy::UnsafeRatio { good, fair } => TierPolicy::ratio(good, fair),
        }
    }
}

impl Default for TierPolicy {
    fn default() -> Self {
        TierPolicy::UnsafeCount
    }
}

/// Classify using the default count policy
pub fn classify(readings: &[EvaluatedReading]) -> OverallStatus {
    classify_with(readings, TierPolicy::default())
}

pub fn classify_with(readings: &[EvaluatedReading], policy: TierPolicy) -> OverallStatus {
    let unsafe_count = readings.iter().filter(|r| !r.is_safe()).count();
    classify_counts(unsafe_count, readings.len(), policy)
}

/// Classify from counts alone
pub fn classify_counts(unsafe_count: usize, total: usize, policy: TierPolicy) -> OverallStatus {
    if unsafe_count == 0 {
        return OverallStatus::Excellent;
    }

    match policy {
        TierPolicy::UnsafeCount => match unsafe_count {
            1 => OverallStatus::Good,
            2 => OverallStatus::Fair,
            _ => OverallStatus::Poor,
        },
        TierPolicy::UnsafeRatio { good, fair } => {
            let ratio = unsafe_count as f64 / total.max(unsafe_count) as f64;
            if ratio <= good {
                OverallStatus::Good
            } else if ratio <= fair {
                OverallStatus::Fair
            } else {
                OverallStatus::Poor
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Parameter, Range};

    fn readings(safe: usize, unsafe_: usize) -> Vec<EvaluatedReading> {
        let param = Parameter::new("pH", "", Range::new(6.5, 8.5), Range::new(0.0, 14.0));
        let mut out = Vec::new();
        out.extend((0..safe).map(|_| EvaluatedReading::evaluate(&param, 7.0)));
        out.extend((0..unsafe_).map(|_| EvaluatedReading::evaluate(&param, 10.0)));
        out
    }

    #[test]
    fn test_count_table() {
        assert_eq!(classify(&readings(4, 0)), OverallStatus::Excellent);
        assert_eq!(classify(&readings(3, 1)), OverallStatus::Good);
        assert_eq!(classify(&readings(2, 2)), OverallStatus::Fair);
        assert_eq!(classify(&readings(1, 3)), OverallStatus::Poor);
        assert_eq!(classify(&readings(0, 4)), OverallStatus::Poor);
    }

    #[test]
    fn test_count_ignores_category_size() {
        assert_eq!(classify(&readings(20, 3)), OverallStatus::Poor);
        assert_eq!(classify(&readings(0, 2)), OverallStatus::Fair);
        assert_eq!(classify(&readings(50, 0)), OverallStatus::Excellent);
    }

    #[test]
    fn test_empty_is_excellent() {
        assert_eq!(classify(&[]), OverallStatus::Excellent);
        assert_eq!(classify_with(&[], TierPolicy::DEFAULT_RATIO), OverallStatus::Excellent);
    }

    #[test]
    fn test_ratio_matches_count_for_four_parameters() {
        for unsafe_count in 0..=4 {
            assert_eq!(
                classify_counts(unsafe_count, 4, TierPolicy::UnsafeCount),
                classify_counts(unsafe_count, 4, TierPolicy::DEFAULT_RATIO),
                "mismatch at {} unsafe",
                unsafe_count
            );
        }
    }

    #[test]
    fn test_ratio_scales_with_size() {
        // 3 of 12 is a quarter: still good under the ratio policy
        assert_eq!(classify_counts(3, 12, TierPolicy::DEFAULT_RATIO), OverallStatus::Good);
        assert_eq!(classify_counts(6, 12, TierPolicy::DEFAULT_RATIO), OverallStatus::Fair);
        assert_eq!(classify_counts(7, 12, TierPolicy::DEFAULT_RATIO), OverallStatus::Poor);
    }

    #[test]
    fn test_policy_deserialization() {
        let policy: TierPolicy =
            serde_json::from_str(r#"{"policy": "unsafe_ratio", "good": 0.2, "fair": 0.4}"#).unwrap();
        assert_eq!(policy, TierPolicy::UnsafeRatio { good: 0.2, fair: 0.4 });

        let policy: TierPolicy = serde_json::from_str(r#"{"policy": "unsafe_count"}"#).unwrap();
        assert_eq!(policy, TierPolicy::UnsafeCount);
    }

    #[test]
    fn test_ratio_rejects_unordered_boundaries() {
        assert_eq!(TierPolicy::ratio(0.25, 0.5), Ok(TierPolicy::DEFAULT_RATIO));
        assert_eq!(TierPolicy::ratio(0.0, 0.0), Ok(TierPolicy::UnsafeRatio { good: 0.0, fair: 0.0 }));

        // Inverted boundaries would make Fair unreachable
        assert!(TierPolicy::ratio(0.9, 0.1).is_err());
        assert!(TierPolicy::ratio(-0.1, 0.5).is_err());
        assert!(TierPolicy::ratio(0.5, 1.5).is_err());
        assert!(TierPolicy::ratio(f64::NAN, f64::NAN).is_err());
        assert!(TierPolicy::ratio(0.25, f64::INFINITY).is_err());

        let inverted = serde_json::from_str::<TierPolicy>(
            r#"{"policy": "unsafe_ratio", "good": 0.9, "fair": 0.1}"#,
        );
        assert!(inverted.is_err());
    }
}
