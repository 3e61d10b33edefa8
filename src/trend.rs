//! Trend classification from recent closes
//!
//! Compares the mean of the last ten closes with the mean of the ten before
//! them and buckets the percentage change.

use crate::OHLCV;

/// Bars needed before a trend is reported
pub const TREND_MIN_BARS: usize = 20;
/// Size of each half of the comparison window
pub const TREND_HALF_WINDOW: usize = 10;

/// Percentage change above which an uptrend is strong
pub const STRONG_TREND_PCT: f64 = 5.0;
/// Percentage change above which prices are trending at all
pub const TREND_PCT: f64 = 2.0;

/// Market trend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TrendDirection {
  #[serde(rename = "STRONG UPTREND")]
  StrongUptrend,
  #[serde(rename = "UPTREND")]
  Uptrend,
  #[serde(rename = "SIDEWAYS")]
  Sideways,
  #[serde(rename = "DOWNTREND")]
  Downtrend,
  #[serde(rename = "STRONG DOWNTREND")]
  StrongDowntrend,
  #[serde(rename = "UNKNOWN")]
  Unknown,
}

impl TrendDirection {
  /// Bucket a percentage change. Exact thresholds fall into the weaker bucket.
  pub fn classify(change_pct: f64) -> Self {
    match change_pct {
      c if c > STRONG_TREND_PCT => TrendDirection::StrongUptrend,
      c if c > TREND_PCT => TrendDirection::Uptrend,
      c if c < -STRONG_TREND_PCT => TrendDirection::StrongDowntrend,
      c if c < -TREND_PCT => TrendDirection::Downtrend,
      _ => TrendDirection::Sideways,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      TrendDirection::StrongUptrend => "STRONG UPTREND",
      TrendDirection::Uptrend => "UPTREND",
      TrendDirection::Sideways => "SIDEWAYS",
      TrendDirection::Downtrend => "DOWNTREND",
      TrendDirection::StrongDowntrend => "STRONG DOWNTREND",
      TrendDirection::Unknown => "UNKNOWN",
    }
  }

  pub fn description(self) -> &'static str {
    match self {
      TrendDirection::StrongUptrend => "Strong bullish momentum",
      TrendDirection::Uptrend => "Moderate upward movement",
      TrendDirection::Sideways => "Consolidating, no clear direction",
      TrendDirection::Downtrend => "Moderate downward movement",
      TrendDirection::StrongDowntrend => "Strong bearish momentum",
      TrendDirection::Unknown => "Insufficient data",
    }
  }

  /// Display color used by the dashboard
  pub fn color(self) -> &'static str {
    match self {
      TrendDirection::StrongUptrend => "green",
      TrendDirection::Uptrend => "lightgreen",
      TrendDirection::Sideways | TrendDirection::Unknown => "gray",
      TrendDirection::Downtrend => "orange",
      TrendDirection::StrongDowntrend => "red",
    }
  }

  #[inline]
  pub fn is_up(self) -> bool {
    matches!(self, TrendDirection::Uptrend | TrendDirection::StrongUptrend)
  }

  #[inline]
  pub fn is_down(self) -> bool {
    matches!(self, TrendDirection::Downtrend | TrendDirection::StrongDowntrend)
  }
}

impl std::fmt::Display for TrendDirection {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Trend reading attached to every signal.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Trend {
  pub direction: TrendDirection,
  /// Magnitude, `min(100, |percentage| * 10)`
  pub strength: f64,
  pub description: &'static str,
  pub color: &'static str,
  /// Signed change of the recent mean over the older mean, two decimals
  pub percentage: f64,
}

impl Trend {
  pub fn unknown() -> Self {
    let direction = TrendDirection::Unknown;
    Self {
      direction,
      strength: 0.0,
      description: direction.description(),
      color: direction.color(),
      percentage: 0.0,
    }
  }

  pub fn from_change(change_pct: f64) -> Self {
    let direction = TrendDirection::classify(change_pct);
    Self {
      direction,
      strength: (change_pct.abs() * 10.0).min(100.0),
      description: direction.description(),
      color: direction.color(),
      percentage: (change_pct * 100.0).round() / 100.0,
    }
  }
}

fn mean_close<T: OHLCV>(bars: &[T]) -> f64 {
  bars.iter().map(|b| b.close()).sum::<f64>() / bars.len() as f64
}

/// Classify the trend over the last 20 bars.
///
/// Fewer than 20 bars gives [`TrendDirection::Unknown`]. A non-positive older
/// mean has no meaningful percentage change and reads as flat.
pub fn detect_trend<T: OHLCV>(bars: &[T]) -> Trend {
  if bars.len() < TREND_MIN_BARS {
    return Trend::unknown();
  }

  let window = &bars[bars.len() - TREND_MIN_BARS..];
  let (older, recent) = window.split_at(TREND_HALF_WINDOW);
  let older_avg = mean_close(older);
  let recent_avg = mean_close(recent);

  if older_avg <= 0.0 || !older_avg.is_finite() {
    return Trend::from_change(0.0);
  }

  Trend::from_change((recent_avg - older_avg) / older_avg * 100.0)
}
