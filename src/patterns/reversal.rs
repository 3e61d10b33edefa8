//! Reversal pattern detectors built on the most recent extrema
//!
//! Double Top/Bottom compare the last two extrema, Head and Shoulders and its
//! inverse the last three.

use super::{
  helpers::{
    relative_diff, tail, to_confidence, DOUBLE_MIN_SEPARATION, DOUBLE_TOLERANCE,
    HEAD_AND_SHOULDERS_CONFIDENCE, SHOULDER_TOLERANCE,
  },
  Direction, Extremum, Pattern, PatternContext, PatternDetector, PatternId,
};

/// Confidence of two extrema at nearly the same level, far enough apart.
fn double_extremum(extrema: &[Extremum]) -> Option<u8> {
  let [first, second] = tail(extrema, 2)? else {
    return None;
  };

  let diff = relative_diff(first.value, second.value)?;
  if diff < DOUBLE_TOLERANCE && second.index - first.index > DOUBLE_MIN_SEPARATION {
    Some(to_confidence(1.0 - diff))
  } else {
    None
  }
}

/// Last three extrema form a head beyond two shoulders at a similar level.
fn head_and_shoulders(extrema: &[Extremum], beyond: impl Fn(f64, f64) -> bool) -> bool {
  let Some([left, head, right]) = tail(extrema, 3) else {
    return false;
  };

  beyond(head.value, left.value)
    && beyond(head.value, right.value)
    && relative_diff(left.value, right.value).is_some_and(|d| d < SHOULDER_TOLERANCE)
}

// ============================================================
// DOUBLE TOP
// ============================================================

/// Two highs tested at about the same level (bearish)
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleTopDetector;

impl PatternDetector for DoubleTopDetector {
  fn id(&self) -> PatternId {
    PatternId::DoubleTop
  }

  fn detect(&self, ctx: &PatternContext) -> Option<Pattern> {
    let confidence = double_extremum(&ctx.peaks)?;
    Some(Pattern::new(
      self.id(),
      Direction::Bearish,
      "Price tested resistance twice and failed - potential reversal",
      confidence,
      "Consider selling or taking profits",
    ))
  }
}

// ============================================================
// DOUBLE BOTTOM
// ============================================================

/// Two lows tested at about the same level (bullish)
#[derive(Debug, Clone, Copy, Default)]
pub struct DoubleBottomDetector;

impl PatternDetector for DoubleBottomDetector {
  fn id(&self) -> PatternId {
    PatternId::DoubleBottom
  }

  fn detect(&self, ctx: &PatternContext) -> Option<Pattern> {
    let confidence = double_extremum(&ctx.troughs)?;
    Some(Pattern::new(
      self.id(),
      Direction::Bullish,
      "Price tested support twice and held - potential reversal",
      confidence,
      "Consider buying opportunity",
    ))
  }
}

// ============================================================
// HEAD AND SHOULDERS
// ============================================================

/// Highest peak between two similar lower peaks (bearish)
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadAndShouldersDetector;

impl PatternDetector for HeadAndShouldersDetector {
  fn id(&self) -> PatternId {
    PatternId::HeadAndShoulders
  }

  fn detect(&self, ctx: &PatternContext) -> Option<Pattern> {
    if !head_and_shoulders(&ctx.peaks, |head, shoulder| head > shoulder) {
      return None;
    }
    Some(Pattern::new(
      self.id(),
      Direction::Bearish,
      "Classic reversal pattern - trend may reverse downward",
      HEAD_AND_SHOULDERS_CONFIDENCE,
      "Strong sell signal",
    ))
  }
}

// ============================================================
// INVERSE HEAD AND SHOULDERS
// ============================================================

/// Lowest trough between two similar higher troughs (bullish)
#[derive(Debug, Clone, Copy, Default)]
pub struct InverseHeadAndShouldersDetector;

impl PatternDetector for InverseHeadAndShouldersDetector {
  fn id(&self) -> PatternId {
    PatternId::InverseHeadAndShoulders
  }

  fn detect(&self, ctx: &PatternContext) -> Option<Pattern> {
    if !head_and_shoulders(&ctx.troughs, |head, shoulder| head < shoulder) {
      return None;
    }
    Some(Pattern::new(
      self.id(),
      Direction::Bullish,
      "Bullish reversal pattern - trend may reverse upward",
      HEAD_AND_SHOULDERS_CONFIDENCE,
      "Strong buy signal",
    ))
  }
}
