//! Chart pattern detectors
//!
//! Seven recognizers working on local extrema and recent bar direction.
//! Each looks only at the most recent qualifying extrema, so every pattern is
//! reported at most once per analysis.
//!
//! # Pattern Families
//!
//! - **Reversal (4)**: Double Top/Bottom, Head and Shoulders, Inverse Head and Shoulders
//! - **Momentum (2)**: Higher Highs & Higher Lows, Lower Highs & Lower Lows
//! - **Levels (1)**: Near Key Level (support or resistance)

use crate::OHLCV;

pub mod extrema;
pub mod helpers;
pub mod levels;
pub mod momentum;
pub mod reversal;

pub use extrema::{find_peaks, find_troughs, Extremum};
pub use levels::*;
pub use momentum::*;
pub use reversal::*;

/// Bars needed before any pattern is looked for
pub const MIN_PATTERN_BARS: usize = 30;

// ============================================================
// PATTERN TYPES
// ============================================================

/// Direction/bias of a pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
  Bullish,
  Neutral,
  Bearish,
}

impl Direction {
  #[inline]
  pub fn is_bullish(self) -> bool {
    matches!(self, Direction::Bullish)
  }

  #[inline]
  pub fn is_bearish(self) -> bool {
    matches!(self, Direction::Bearish)
  }
}

/// Unique identifier for a pattern type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatternId {
  DoubleTop,
  DoubleBottom,
  HeadAndShoulders,
  InverseHeadAndShoulders,
  HigherHighsHigherLows,
  LowerHighsLowerLows,
  NearKeyLevel,
}

impl PatternId {
  /// Returns the machine identifier
  pub fn as_str(self) -> &'static str {
    match self {
      PatternId::DoubleTop => "DOUBLE_TOP",
      PatternId::DoubleBottom => "DOUBLE_BOTTOM",
      PatternId::HeadAndShoulders => "HEAD_AND_SHOULDERS",
      PatternId::InverseHeadAndShoulders => "INVERSE_HEAD_AND_SHOULDERS",
      PatternId::HigherHighsHigherLows => "HIGHER_HIGHS_HIGHER_LOWS",
      PatternId::LowerHighsLowerLows => "LOWER_HIGHS_LOWER_LOWS",
      PatternId::NearKeyLevel => "NEAR_KEY_LEVEL",
    }
  }

  /// Returns the display name
  pub fn name(self) -> &'static str {
    match self {
      PatternId::DoubleTop => "Double Top",
      PatternId::DoubleBottom => "Double Bottom",
      PatternId::HeadAndShoulders => "Head and Shoulders",
      PatternId::InverseHeadAndShoulders => "Inverse Head and Shoulders",
      PatternId::HigherHighsHigherLows => "Higher Highs & Higher Lows",
      PatternId::LowerHighsLowerLows => "Lower Highs & Lower Lows",
      PatternId::NearKeyLevel => "Near Key Level",
    }
  }

  /// Returns the direction this pattern always signals.
  ///
  /// `None` for Near Key Level, which is bearish at resistance and bullish
  /// at support.
  pub fn typical_direction(self) -> Option<Direction> {
    match self {
      PatternId::DoubleBottom
      | PatternId::InverseHeadAndShoulders
      | PatternId::HigherHighsHigherLows => Some(Direction::Bullish),
      PatternId::DoubleTop | PatternId::HeadAndShoulders | PatternId::LowerHighsLowerLows => {
        Some(Direction::Bearish)
      }
      PatternId::NearKeyLevel => None,
    }
  }

  pub fn is_bidirectional(self) -> bool {
    self.typical_direction().is_none()
  }
}

/// A detected chart pattern
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Pattern {
  #[serde(skip)]
  pub id: PatternId,
  pub name: &'static str,
  #[serde(rename = "type")]
  pub direction: Direction,
  pub description: String,
  /// Heuristic match quality, 0..=100
  pub confidence: u8,
  /// Suggested course of action
  pub action: &'static str,
}

impl Pattern {
  pub fn new(
    id: PatternId,
    direction: Direction,
    description: impl Into<String>,
    confidence: u8,
    action: &'static str,
  ) -> Self {
    Self {
      id,
      name: id.name(),
      direction,
      description: description.into(),
      confidence: confidence.min(100),
      action,
    }
  }
}

// ============================================================
// PATTERN CONTEXT
// ============================================================

/// Price views and extrema shared by all detectors, computed once per scan.
#[derive(Debug, Clone, Default)]
pub struct PatternContext {
  pub closes: Vec<f64>,
  pub highs: Vec<f64>,
  pub lows: Vec<f64>,
  /// Strict local maxima of `highs`
  pub peaks: Vec<Extremum>,
  /// Strict local minima of `lows`
  pub troughs: Vec<Extremum>,
}

impl PatternContext {
  pub fn new(closes: Vec<f64>, highs: Vec<f64>, lows: Vec<f64>) -> Self {
    let peaks = find_peaks(&highs);
    let troughs = find_troughs(&lows);
    Self {
      closes,
      highs,
      lows,
      peaks,
      troughs,
    }
  }

  pub fn from_bars<T: OHLCV>(bars: &[T]) -> Self {
    Self::new(
      bars.iter().map(|b| b.close()).collect(),
      bars.iter().map(|b| b.high()).collect(),
      bars.iter().map(|b| b.low()).collect(),
    )
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.closes.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.closes.is_empty()
  }
}

// ============================================================
// PATTERN DETECTOR TRAIT
// ============================================================

/// Pattern detector trait
pub trait PatternDetector: Send + Sync {
  fn id(&self) -> PatternId;

  fn min_bars(&self) -> usize {
    MIN_PATTERN_BARS
  }

  fn detect(&self, ctx: &PatternContext) -> Option<Pattern>;
}

// ============================================================
// BUILTIN DETECTORS - generated via macro
// ============================================================

/// Macro to generate BuiltinDetector enum without boilerplate
macro_rules! define_builtin_detectors {
  (
    $(
      $variant:ident($detector:ty)
    ),* $(,)?
  ) => {
    /// All builtin detectors - enum dispatch, declared in reporting order
    #[derive(Debug, Clone)]
    pub enum BuiltinDetector {
      $($variant($detector)),*
    }

    impl BuiltinDetector {
      /// Every detector, in the order matches are reported
      pub fn all() -> Vec<Self> {
        vec![$(Self::$variant(<$detector>::default())),*]
      }

      #[inline]
      pub fn detect(&self, ctx: &PatternContext) -> Option<Pattern> {
        match self {
          $(Self::$variant(d) => PatternDetector::detect(d, ctx)),*
        }
      }

      #[inline]
      pub fn id(&self) -> PatternId {
        match self {
          $(Self::$variant(d) => PatternDetector::id(d)),*
        }
      }

      #[inline]
      pub fn min_bars(&self) -> usize {
        match self {
          $(Self::$variant(d) => PatternDetector::min_bars(d)),*
        }
      }
    }
  };
}

// Order is part of the output contract
define_builtin_detectors! {
  DoubleTop(DoubleTopDetector),
  DoubleBottom(DoubleBottomDetector),
  HeadAndShoulders(HeadAndShouldersDetector),
  InverseHeadAndShoulders(InverseHeadAndShouldersDetector),
  HigherHighsHigherLows(HigherHighsHigherLowsDetector),
  LowerHighsLowerLows(LowerHighsLowerLowsDetector),
  NearKeyLevel(NearKeyLevelDetector),
}

/// Run `detectors` in order over `bars`, collecting every match.
pub(crate) fn run_detectors<T: OHLCV>(detectors: &[BuiltinDetector], bars: &[T]) -> Vec<Pattern> {
  if bars.len() < MIN_PATTERN_BARS {
    return Vec::new();
  }

  let ctx = PatternContext::from_bars(bars);
  detectors
    .iter()
    .filter(|d| ctx.len() >= d.min_bars())
    .filter_map(|d| d.detect(&ctx))
    .collect()
}

/// Detect all seven patterns. Fewer than 30 bars yields an empty list.
pub fn detect_patterns<T: OHLCV>(bars: &[T]) -> Vec<Pattern> {
  run_detectors(&BuiltinDetector::all(), bars)
}
