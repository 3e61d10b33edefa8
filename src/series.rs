//! Validated price series
//!
//! A [`PriceSeries`] borrows the caller's bars and guarantees they are
//! non-empty and in non-decreasing date order. It never copies or re-sorts;
//! derived views are built on demand.

use crate::{OHLCVExt, Result, SignalError, OHLCV};

/// Non-empty, date-ordered view over a slice of bars.
#[derive(Debug)]
pub struct PriceSeries<'a, T: OHLCV> {
  bars: &'a [T],
}

impl<'a, T: OHLCV> PriceSeries<'a, T> {
  /// Wrap `bars`, checking the non-empty and ordering invariants.
  ///
  /// Bars without a timestamp are not ordering-checked.
  pub fn new(bars: &'a [T]) -> Result<Self> {
    if bars.is_empty() {
      return Err(SignalError::EmptySeries);
    }

    let mut previous: Option<i64> = None;
    for (i, bar) in bars.iter().enumerate() {
      if let Some(ts) = bar.timestamp() {
        if previous.is_some_and(|prev| ts < prev) {
          return Err(SignalError::UnorderedSeries { index: i });
        }
        previous = Some(ts);
      }
    }

    Ok(Self { bars })
  }

  /// Like [`PriceSeries::new`], also validating every bar.
  pub fn validated(bars: &'a [T]) -> Result<Self> {
    let series = Self::new(bars)?;
    series.validate_bars()?;
    Ok(series)
  }

  /// Run [`OHLCVExt::validate`] over every bar, reporting the failing index.
  pub fn validate_bars(&self) -> Result<()> {
    for (i, bar) in self.bars.iter().enumerate() {
      bar.validate().map_err(|e| match e {
        SignalError::InvalidBar { reason, .. } => SignalError::InvalidBar { index: i, reason },
        other => other,
      })?;
    }
    Ok(())
  }

  #[inline]
  pub fn bars(&self) -> &'a [T] {
    self.bars
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.bars.len()
  }

  /// Always false; kept for API symmetry with slices.
  #[inline]
  pub fn is_empty(&self) -> bool {
    self.bars.is_empty()
  }

  /// Most recent bar.
  #[inline]
  pub fn last(&self) -> &'a T {
    &self.bars[self.bars.len() - 1]
  }

  /// Close of the most recent bar.
  #[inline]
  pub fn current_price(&self) -> f64 {
    self.last().close()
  }

  pub fn closes(&self) -> Vec<f64> {
    self.bars.iter().map(|b| b.close()).collect()
  }

  pub fn highs(&self) -> Vec<f64> {
    self.bars.iter().map(|b| b.high()).collect()
  }

  pub fn lows(&self) -> Vec<f64> {
    self.bars.iter().map(|b| b.low()).collect()
  }
}
