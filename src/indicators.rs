//! Moving-average and momentum indicators
//!
//! Every function reads only the tail of the series it needs and returns
//! `None` when the series is shorter than its window. `None` means "no data",
//! which the scorer treats differently from a reading of zero.

use crate::{series::PriceSeries, OHLCV};

/// Short simple moving average window
pub const SMA_SHORT_PERIOD: usize = 20;
/// Long simple moving average window
pub const SMA_LONG_PERIOD: usize = 50;
/// RSI lookback (number of close-to-close differences)
pub const RSI_PERIOD: usize = 14;
/// Fast window of the simplified MACD
pub const MACD_FAST_PERIOD: usize = 12;
/// Slow window of the simplified MACD
pub const MACD_SLOW_PERIOD: usize = 26;

/// Mean close of the last `period` bars.
///
/// Accumulates offsets from the first close in the window, so a constant
/// window returns that close exactly.
pub fn sma<T: OHLCV>(bars: &[T], period: usize) -> Option<f64> {
  if period == 0 || bars.len() < period {
    return None;
  }
  let window = &bars[bars.len() - period..];
  let base = window[0].close();
  let offset: f64 = window.iter().map(|b| b.close() - base).sum();
  Some(base + offset / period as f64)
}

/// Relative Strength Index over the last `period` close-to-close differences.
///
/// Gains are the positive differences; every other difference (zero
/// included) counts as a loss. Both sums are divided by `period`.
///
/// When the window holds no loss at all, the average loss is taken as `1.0`
/// rather than `0.0`, so a steady climb reads `100 - 100 / (1 + avg_gain)`
/// instead of saturating. An average loss of exactly zero (flat differences
/// only on the loss side) reads 100.
///
/// Requires `period + 1` bars.
pub fn rsi<T: OHLCV>(bars: &[T], period: usize) -> Option<f64> {
  if period == 0 || bars.len() < period + 1 {
    return None;
  }

  let window = &bars[bars.len() - period - 1..];
  let (gains, losses, has_loss) =
    window
      .windows(2)
      .fold((0.0_f64, 0.0_f64, false), |(g, l, any_loss), w| {
        let diff = w[1].close() - w[0].close();
        if diff > 0.0 {
          (g + diff, l, any_loss)
        } else {
          (g, l + diff.abs(), true)
        }
      });

  let period_f = period as f64;
  let avg_gain = gains / period_f;
  let avg_loss = if has_loss { losses / period_f } else { 1.0 };

  if avg_loss == 0.0 {
    return Some(100.0);
  }
  let rs = avg_gain / avg_loss;
  Some(100.0 - 100.0 / (1.0 + rs))
}

/// Simplified MACD: mean of the last 12 closes minus mean of the last 26.
///
/// Plain means, not exponential averages.
pub fn macd<T: OHLCV>(bars: &[T]) -> Option<f64> {
  if bars.len() < MACD_SLOW_PERIOD {
    return None;
  }
  Some(sma(bars, MACD_FAST_PERIOD)? - sma(bars, MACD_SLOW_PERIOD)?)
}

/// Indicator snapshot reported with every signal.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
  pub sma20: Option<f64>,
  pub sma50: Option<f64>,
  pub rsi: Option<f64>,
  pub macd: Option<f64>,
  pub current_price: f64,
}

impl Indicators {
  pub fn compute<T: OHLCV>(series: &PriceSeries<'_, T>) -> Self {
    let bars = series.bars();
    Self {
      sma20: sma(bars, SMA_SHORT_PERIOD),
      sma50: sma(bars, SMA_LONG_PERIOD),
      rsi: rsi(bars, RSI_PERIOD),
      macd: macd(bars),
      current_price: series.current_price(),
    }
  }
}
