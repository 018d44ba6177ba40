//! Safeness Scorer
//!
//! Expresses how close a reading is to its safe range as a 0-100 percentage.
//! Inside the range scores 100; outside, the score falls linearly with the
//! deviation relative to the violated bound and floors at 0.

use super::deviation::{evaluate, RangeSide};
use crate::catalog::Range;

pub const MAX_SCORE: f64 = 100.0;

/// Percentage of "within limits" for a value
pub fn score(value: f64, safe_range: Range) -> f64 {
    let dev = evaluate(value, safe_range);
    let bound = match dev.side {
        RangeSide::Within => return MAX_SCORE,
        RangeSide::Below => safe_range.min,
        RangeSide::Above => safe_range.max,
    };

    // Negative bounds (loaded catalogs only) scale by magnitude; a zero
    // bound gives no scale at all, so any miss scores 0
    let scale = bound.abs();
    if scale == 0.0 {
        return 0.0;
    }

    ((1.0 - dev.deviation / scale) * MAX_SCORE).clamp(0.0, MAX_SCORE)
}
