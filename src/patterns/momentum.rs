//! Continuation patterns from bar-to-bar direction of highs and lows
//!
//! Over the last ten bars there are nine steps; a pattern needs at least six
//! qualifying steps on the highs and six on the lows.

use super::{
  helpers::{tail, to_confidence, MOMENTUM_MIN_STEPS, MOMENTUM_WINDOW},
  Direction, Pattern, PatternContext, PatternDetector, PatternId,
};

/// Count consecutive pairs `(prev, next)` over the window where `step(prev, next)` holds.
fn count_steps(values: &[f64], step: impl Fn(f64, f64) -> bool) -> Option<usize> {
  let recent = tail(values, MOMENTUM_WINDOW)?;
  Some(recent.windows(2).filter(|w| step(w[0], w[1])).count())
}

/// Confidence when both sides reach the minimum step count.
fn momentum_confidence(ctx: &PatternContext, step: impl Fn(f64, f64) -> bool) -> Option<u8> {
  let high_steps = count_steps(&ctx.highs, &step)?;
  let low_steps = count_steps(&ctx.lows, &step)?;

  if high_steps < MOMENTUM_MIN_STEPS || low_steps < MOMENTUM_MIN_STEPS {
    return None;
  }

  let max_steps = 2 * (MOMENTUM_WINDOW - 1);
  Some(to_confidence((high_steps + low_steps) as f64 / max_steps as f64))
}

// ============================================================
// HIGHER HIGHS & HIGHER LOWS
// ============================================================

/// Consistent uptrend structure (bullish continuation)
#[derive(Debug, Clone, Copy, Default)]
pub struct HigherHighsHigherLowsDetector;

impl PatternDetector for HigherHighsHigherLowsDetector {
  fn id(&self) -> PatternId {
    PatternId::HigherHighsHigherLows
  }

  fn detect(&self, ctx: &PatternContext) -> Option<Pattern> {
    let confidence = momentum_confidence(ctx, |prev, next| next > prev)?;
    Some(Pattern::new(
      self.id(),
      Direction::Bullish,
      "Consistent uptrend pattern - bullish continuation",
      confidence,
      "Uptrend confirmed, hold or buy",
    ))
  }
}

// ============================================================
// LOWER HIGHS & LOWER LOWS
// ============================================================

/// Consistent downtrend structure (bearish continuation)
#[derive(Debug, Clone, Copy, Default)]
pub struct LowerHighsLowerLowsDetector;

impl PatternDetector for LowerHighsLowerLowsDetector {
  fn id(&self) -> PatternId {
    PatternId::LowerHighsLowerLows
  }

  fn detect(&self, ctx: &PatternContext) -> Option<Pattern> {
    let confidence = momentum_confidence(ctx, |prev, next| next < prev)?;
    Some(Pattern::new(
      self.id(),
      Direction::Bearish,
      "Consistent downtrend pattern - bearish continuation",
      confidence,
      "Downtrend confirmed, avoid or sell",
    ))
  }
}
