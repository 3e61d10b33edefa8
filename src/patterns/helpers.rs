//! Thresholds and small numeric helpers shared by the pattern detectors
//!
//! All thresholds are fixed heuristics, not fitted parameters.

// ============================================================
// THRESHOLDS
// ============================================================

/// Double Top/Bottom: the two extrema differ by less than this fraction
pub const DOUBLE_TOLERANCE: f64 = 0.02;
/// Double Top/Bottom: the two extrema are more than this many bars apart
pub const DOUBLE_MIN_SEPARATION: usize = 5;

/// Head and Shoulders: the shoulders differ by less than this fraction
pub const SHOULDER_TOLERANCE: f64 = 0.03;
pub const HEAD_AND_SHOULDERS_CONFIDENCE: u8 = 75;

/// Higher/Lower Highs & Lows: number of recent bars compared
pub const MOMENTUM_WINDOW: usize = 10;
/// Higher/Lower Highs & Lows: minimum qualifying steps, out of `MOMENTUM_WINDOW - 1`, on each side
pub const MOMENTUM_MIN_STEPS: usize = 6;

/// Near Key Level: number of recent closes scanned for support/resistance
pub const KEY_LEVEL_WINDOW: usize = 30;
/// Near Key Level: distance to the level, as a fraction of the level
pub const KEY_LEVEL_TOLERANCE: f64 = 0.02;
pub const KEY_LEVEL_CONFIDENCE: u8 = 70;

// ============================================================
// HELPER FUNCTIONS
// ============================================================

/// `|a - b| / a`, or `None` when `a` is not a usable positive denominator.
#[inline]
pub fn relative_diff(a: f64, b: f64) -> Option<f64> {
  if a <= 0.0 || !a.is_finite() {
    return None;
  }
  let diff = (a - b).abs() / a;
  diff.is_finite().then_some(diff)
}

/// Round a 0.0..=1.0 score to an integer confidence, clamped to 0..=100.
#[inline]
pub fn to_confidence(score: f64) -> u8 {
  (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// The last `n` items, or `None` when there are fewer.
#[inline]
pub fn tail<T>(items: &[T], n: usize) -> Option<&[T]> {
  items.len().checked_sub(n).map(|start| &items[start..])
}
