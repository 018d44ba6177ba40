//! Deviation Calculator
//!
//! Core comparison of a reading against its safe range: which side of the
//! range the value falls on, and how far outside it is.

use crate::catalog::Range;
use serde::{Deserialize, Serialize};

/// Whether a reading lies inside its safe range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafetyStatus {
    Safe,
    Unsafe,
}

impl SafetyStatus {
    pub fn display_text(&self) -> &'static str {
        match self {
            SafetyStatus::Safe => "Safe",
            SafetyStatus::Unsafe => "Unsafe",
        }
    }
}

/// Which side of the safe range a value falls on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSide {
    /// value < min
    Below,
    /// min <= value <= max
    Within,
    /// value > max
    Above,
}

/// Result of comparing a value to a safe range
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deviation {
    pub side: RangeSide,

    /// Distance to the nearest bound; 0 when within range
    pub deviation: f64,

    pub status: SafetyStatus,
}

impl Deviation {
    pub fn is_safe(&self) -> bool {
        self.status == SafetyStatus::Safe
    }
}

/// Compare a value against a safe range (bounds inclusive)
pub fn evaluate(value: f64, safe_range: Range) -> Deviation {
    let (side, deviation) = if value < safe_range.min {
        (RangeSide::Below, safe_range.min - value)
    } else if value > safe_range.max {
        (RangeSide::Above, value - safe_range.max)
    } else {
        (RangeSide::Within, 0.0)
    };

    let status = if side == RangeSide::Within {
        SafetyStatus::Safe
    } else {
        SafetyStatus::Unsafe
    };

    Deviation { side, deviation, status }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const PH: Range = Range::new(6.5, 8.5);

    #[test]
    fn test_within_range() {
        let dev = evaluate(7.0, PH);
        assert_eq!(dev.side, RangeSide::Within);
        assert_eq!(dev.deviation, 0.0);
        assert!(dev.is_safe());
    }

    #[test]
    fn test_bounds_are_safe() {
        for value in [PH.min, PH.max] {
            let dev = evaluate(value, PH);
            assert_eq!(dev.status, SafetyStatus::Safe);
            assert_eq!(dev.deviation, 0.0);
        }
    }

    #[test]
    fn test_below_range() {
        let dev = evaluate(5.0, PH);
        assert_eq!(dev.side, RangeSide::Below);
        assert_eq!(dev.status, SafetyStatus::Unsafe);
        assert_abs_diff_eq!(dev.deviation, 1.5);
    }

    #[test]
    fn test_above_range() {
        let dev = evaluate(3.0, Range::new(0.0, 1.0));
        assert_eq!(dev.side, RangeSide::Above);
        assert_eq!(dev.status, SafetyStatus::Unsafe);
        assert_abs_diff_eq!(dev.deviation, 2.0);
    }

    #[test]
    fn test_below_range_sweep() {
        // Every value between absolute min and safe min is unsafe by (min - v)
        let mut v = 0.0;
        while v < PH.min {
            let dev = evaluate(v, PH);
            assert_eq!(dev.status, SafetyStatus::Unsafe);
            assert!(dev.deviation > 0.0);
            assert_abs_diff_eq!(dev.deviation, PH.min - v, epsilon = 1e-12);
            v += 0.25;
        }
    }
}
