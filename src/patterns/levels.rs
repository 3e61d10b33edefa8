//! Support/resistance proximity
//!
//! Resistance is checked first, so at most one of the two fires.

use super::{
  helpers::{tail, KEY_LEVEL_CONFIDENCE, KEY_LEVEL_TOLERANCE, KEY_LEVEL_WINDOW},
  Direction, Pattern, PatternContext, PatternDetector, PatternId,
};

/// Current close within 2% of the 30-bar closing high or low
#[derive(Debug, Clone, Copy, Default)]
pub struct NearKeyLevelDetector;

impl PatternDetector for NearKeyLevelDetector {
  fn id(&self) -> PatternId {
    PatternId::NearKeyLevel
  }

  fn min_bars(&self) -> usize {
    KEY_LEVEL_WINDOW
  }

  fn detect(&self, ctx: &PatternContext) -> Option<Pattern> {
    let recent = tail(&ctx.closes, KEY_LEVEL_WINDOW)?;
    let current = *recent.last()?;
    let max = recent.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min = recent.iter().copied().fold(f64::INFINITY, f64::min);

    if max > 0.0 && (max - current) / max < KEY_LEVEL_TOLERANCE {
      return Some(Pattern::new(
        self.id(),
        Direction::Bearish,
        format!("Price near resistance level at ₹{max:.2}"),
        KEY_LEVEL_CONFIDENCE,
        "Watch for breakout or rejection",
      ));
    }

    if min > 0.0 && (current - min) / min < KEY_LEVEL_TOLERANCE {
      return Some(Pattern::new(
        self.id(),
        Direction::Bullish,
        format!("Price near support level at ₹{min:.2}"),
        KEY_LEVEL_CONFIDENCE,
        "Potential bounce opportunity",
      ));
    }

    None
  }
}
