//! Integration tests for the chartsignal analysis engine.
//!
//! These tests drive full analyses through the public API.

use chartsignal::prelude::*;
use chrono::{DateTime, Duration, Utc};

/// Simple test bar structure
#[derive(Debug, Clone, Copy)]
struct TestBar {
  h: f64,
  l: f64,
  c: f64,
  t: i64,
}

impl OHLCV for TestBar {
  fn open(&self) -> f64 {
    self.c
  }

  fn high(&self) -> f64 {
    self.h
  }

  fn low(&self) -> f64 {
    self.l
  }

  fn close(&self) -> f64 {
    self.c
  }

  fn volume(&self) -> f64 {
    1000.0
  }

  fn timestamp(&self) -> Option<i64> {
    Some(self.t)
  }
}

/// Bars with the given closes, highs and lows one point away
fn from_closes(closes: impl IntoIterator<Item = f64>) -> Vec<TestBar> {
  closes
    .into_iter()
    .enumerate()
    .map(|(i, c)| TestBar {
      h: c + 1.0,
      l: c - 1.0,
      c,
      t: i as i64 * 86_400,
    })
    .collect()
}

/// Closes rising by one from 100
fn make_uptrend(n: usize) -> Vec<TestBar> {
  from_closes((0..n).map(|i| 100.0 + i as f64))
}

/// Closes falling by one from 200
fn make_downtrend(n: usize) -> Vec<TestBar> {
  from_closes((0..n).map(|i| 200.0 - i as f64))
}

fn daily_bars(closes: &[f64]) -> Vec<Bar> {
  let start: DateTime<Utc> = DateTime::from_timestamp(1_704_067_200, 0).unwrap();
  closes
    .iter()
    .enumerate()
    .map(|(i, &c)| Bar::new(start + Duration::days(i as i64), c, c + 1.0, c - 1.0, c, 5_000.0))
    .collect()
}

fn signal_labels(result: &SignalResult) -> Vec<(&'static str, &'static str)> {
  result.signals.iter().map(|s| (s.indicator, s.signal)).collect()
}

// ============================================================
// FULL ANALYSES
// ============================================================

#[test]
fn test_uptrend_analysis() {
  let result = analyze(&make_uptrend(60)).unwrap();

  assert_eq!(result.indicators.current_price, 159.0);
  assert_eq!(result.indicators.sma20, Some(149.5));
  assert_eq!(result.indicators.sma50, Some(134.5));
  // steady gains, no losses: unit loss guard gives 50
  assert_eq!(result.indicators.rsi, Some(50.0));
  assert_eq!(result.indicators.macd, Some(7.0));

  assert_eq!(result.trend.direction, TrendDirection::StrongUptrend);
  assert_eq!(
    signal_labels(&result),
    vec![
      ("SMA20", "Bullish"),
      ("SMA50", "Bullish"),
      ("Golden Cross", "Bullish"),
      ("MACD", "Bullish"),
      ("Trend Confirmation", "Bullish"),
    ]
  );
  assert_eq!(result.score, 5);
  assert_eq!(result.action, Action::StrongBuy);
  assert_eq!(result.strength, SignalStrength::Strong);

  let ids: Vec<PatternId> = result.patterns.iter().map(|p| p.id).collect();
  assert_eq!(
    ids,
    vec![PatternId::HigherHighsHigherLows, PatternId::NearKeyLevel]
  );
  assert_eq!(result.patterns[0].confidence, 100);
  assert_eq!(result.patterns[1].direction, Direction::Bearish);
}

#[test]
fn test_downtrend_analysis() {
  let result = analyze(&make_downtrend(60)).unwrap();

  // every difference is a loss: RSI 0 is oversold
  assert_eq!(result.indicators.rsi, Some(0.0));
  assert_eq!(result.trend.direction, TrendDirection::StrongDowntrend);
  assert_eq!(
    signal_labels(&result),
    vec![
      ("SMA20", "Bearish"),
      ("Death Cross", "Bearish"),
      ("RSI", "Strong Buy"),
      ("MACD", "Bearish"),
    ]
  );
  assert_eq!(result.score, -1);
  assert_eq!(result.action, Action::Sell);
  assert_eq!(result.strength, SignalStrength::Moderate);

  let ids: Vec<PatternId> = result.patterns.iter().map(|p| p.id).collect();
  assert_eq!(
    ids,
    vec![PatternId::LowerHighsLowerLows, PatternId::NearKeyLevel]
  );
  assert_eq!(
    result.patterns[1].description,
    "Price near support level at ₹141.00"
  );
}

#[test]
fn test_short_history_degrades_gracefully() {
  let result = analyze(&make_uptrend(10)).unwrap();

  assert_eq!(result.indicators.sma20, None);
  assert_eq!(result.indicators.sma50, None);
  assert_eq!(result.indicators.rsi, None);
  assert_eq!(result.indicators.macd, None);
  assert_eq!(result.trend.direction, TrendDirection::Unknown);
  assert!(result.patterns.is_empty());
  assert!(result.signals.is_empty());
  assert_eq!(result.action, Action::Hold);
}

#[test]
fn test_single_bar() {
  let result = analyze(&make_uptrend(1)).unwrap();
  assert_eq!(result.indicators.current_price, 100.0);
  assert_eq!(result.score, 0);
}

#[test]
fn test_partial_history_skips_missing_rules() {
  // 25 bars: SMA20 and RSI available, SMA50 and MACD not
  let result = analyze(&make_uptrend(25)).unwrap();
  assert!(result.indicators.sma20.is_some());
  assert!(result.indicators.sma50.is_none());
  assert!(result.indicators.macd.is_none());

  let indicators: Vec<&str> = result.signals.iter().map(|s| s.indicator).collect();
  assert!(!indicators.contains(&"SMA50"));
  assert!(!indicators.contains(&"Golden Cross"));
  assert!(!indicators.contains(&"Death Cross"));
  assert!(!indicators.contains(&"MACD"));
}

#[test]
fn test_double_top_in_full_analysis() {
  let mut bars: Vec<TestBar> = (0..40)
    .map(|i| TestBar {
      h: 101.0,
      l: 99.0,
      c: 100.0,
      t: i,
    })
    .collect();
  bars[20].h = 105.0;
  bars[27].h = 105.0;

  let result = analyze(&bars).unwrap();
  let ids: Vec<PatternId> = result.patterns.iter().map(|p| p.id).collect();
  assert_eq!(ids, vec![PatternId::DoubleTop, PatternId::NearKeyLevel]);
  assert_eq!(result.patterns[0].confidence, 100);

  // flat closes: price on SMA20 (-1), RSI 100 (-2)
  assert_eq!(result.indicators.rsi, Some(100.0));
  assert_eq!(result.score, -3);
  assert_eq!(result.action, Action::StrongSell);
}

#[test]
fn test_analysis_is_repeatable() {
  let engine = AnalysisEngine::default();
  let bars = make_downtrend(45);
  assert_eq!(engine.analyze(&bars).unwrap(), engine.analyze(&bars).unwrap());
}

// ============================================================
// CONTRACT VIOLATIONS
// ============================================================

#[test]
fn test_empty_series() {
  let bars: Vec<TestBar> = vec![];
  assert_eq!(analyze(&bars).unwrap_err(), SignalError::EmptySeries);
}

#[test]
fn test_unordered_dates() {
  let mut bars = daily_bars(&[10.0, 11.0, 12.0]);
  bars.swap(0, 2);
  assert!(matches!(
    analyze(&bars),
    Err(SignalError::UnorderedSeries { index: 1 })
  ));
}

// ============================================================
// BATCH
// ============================================================

#[test]
fn test_batch_isolates_empty_symbol() {
  let engine = AnalysisEngine::default();
  let aaa = daily_bars(&(0..60).map(|i| 100.0 + i as f64).collect::<Vec<_>>());
  let bbb: Vec<Bar> = Vec::new();

  let instruments: Vec<(&str, &[Bar])> = vec![("AAA", &aaa), ("BBB", &bbb)];
  let results = analyze_parallel(&engine, instruments);

  assert_eq!(results.len(), 2);
  assert_eq!(results[0].symbol, "AAA");
  assert_eq!(results[0].signal().unwrap().action, Action::StrongBuy);
  assert_eq!(results[1].symbol, "BBB");
  assert_eq!(results[1].error(), Some(&SignalError::EmptySeries));
}

#[test]
fn test_batch_through_source() {
  let engine = AnalysisEngine::default();
  let provider = |symbol: &str, _days: u32| -> std::result::Result<Vec<Bar>, SourceError> {
    match symbol {
      "AAA" => Ok(daily_bars(&[100.0; 35])),
      _ => Err(SourceError::new("HTTP 404")),
    }
  };

  let results = analyze_symbols(&engine, &provider, &["AAA", "BBB"]);
  assert!(results[0].is_ok());
  assert_eq!(
    results[1].error().map(ToString::to_string),
    Some("Failed to fetch historical data for BBB: HTTP 404".to_string())
  );
}

// ============================================================
// WIRE SHAPE
// ============================================================

#[test]
fn test_result_json_shape() {
  let result = analyze(&daily_bars(&(0..60).map(|i| 100.0 + i as f64).collect::<Vec<_>>())).unwrap();
  let json = serde_json::to_value(&result).unwrap();

  for key in [
    "action",
    "strength",
    "score",
    "signals",
    "indicators",
    "trend",
    "patterns",
  ] {
    assert!(json.get(key).is_some(), "missing {key}");
  }
  for key in ["sma20", "sma50", "rsi", "macd", "currentPrice"] {
    assert!(json["indicators"].get(key).is_some(), "missing indicators.{key}");
  }
  for key in ["direction", "strength", "description", "color", "percentage"] {
    assert!(json["trend"].get(key).is_some(), "missing trend.{key}");
  }
  for key in ["name", "type", "description", "confidence", "action"] {
    assert!(json["patterns"][0].get(key).is_some(), "missing patterns.{key}");
  }
  assert_eq!(json["signals"][0]["indicator"], "SMA20");
  assert_eq!(json["trend"]["direction"], "STRONG UPTREND");
}
