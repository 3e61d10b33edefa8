//! Signal scoring
//!
//! Independent rules each add to an integer score and record a signal entry.
//! The final score maps onto one of five actions. A rule whose indicator is
//! unavailable is skipped: no score change, no entry.

use crate::{
  indicators::Indicators,
  patterns::Pattern,
  trend::{Trend, TrendDirection},
};

/// RSI below this is oversold
pub const RSI_OVERSOLD: f64 = 30.0;
/// RSI above this is overbought
pub const RSI_OVERBOUGHT: f64 = 70.0;
/// RSI below this (and not oversold) is approaching oversold
pub const RSI_NEAR_OVERSOLD: f64 = 40.0;
/// RSI above this (and not overbought) is approaching overbought
pub const RSI_NEAR_OVERBOUGHT: f64 = 60.0;

/// Recommended action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Action {
  #[serde(rename = "STRONG BUY")]
  StrongBuy,
  #[serde(rename = "BUY")]
  Buy,
  #[serde(rename = "HOLD")]
  Hold,
  #[serde(rename = "SELL")]
  Sell,
  #[serde(rename = "STRONG SELL")]
  StrongSell,
}

impl Action {
  /// Map a cumulative score to an action. Total over all integers.
  pub fn from_score(score: i32) -> Self {
    match score {
      s if s >= 4 => Action::StrongBuy,
      2..=3 => Action::Buy,
      0..=1 => Action::Hold,
      -2..=-1 => Action::Sell,
      _ => Action::StrongSell,
    }
  }

  pub fn strength(self) -> SignalStrength {
    match self {
      Action::StrongBuy | Action::StrongSell => SignalStrength::Strong,
      Action::Buy | Action::Sell => SignalStrength::Moderate,
      Action::Hold => SignalStrength::Neutral,
    }
  }

  pub fn as_str(self) -> &'static str {
    match self {
      Action::StrongBuy => "STRONG BUY",
      Action::Buy => "BUY",
      Action::Hold => "HOLD",
      Action::Sell => "SELL",
      Action::StrongSell => "STRONG SELL",
    }
  }
}

impl std::fmt::Display for Action {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Conviction label paired with an action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum SignalStrength {
  Strong,
  Moderate,
  Neutral,
}

/// One rule that fired, as shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct SignalEntry {
  pub indicator: &'static str,
  pub signal: &'static str,
  pub description: &'static str,
}

/// Complete analysis of one instrument
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SignalResult {
  pub action: Action,
  pub strength: SignalStrength,
  pub score: i32,
  pub signals: Vec<SignalEntry>,
  pub indicators: Indicators,
  pub trend: Trend,
  pub patterns: Vec<Pattern>,
}

#[derive(Debug, Default)]
struct Scorecard {
  score: i32,
  signals: Vec<SignalEntry>,
}

impl Scorecard {
  fn record(
    &mut self,
    delta: i32,
    indicator: &'static str,
    signal: &'static str,
    description: &'static str,
  ) {
    self.score += delta;
    self.signals.push(SignalEntry {
      indicator,
      signal,
      description,
    });
  }
}

/// Evaluate every rule in order and return the score with the entries that fired.
pub fn score_signals(indicators: &Indicators, trend: &Trend) -> (i32, Vec<SignalEntry>) {
  let mut card = Scorecard::default();
  let price = indicators.current_price;

  // SMA position
  if let Some(sma20) = indicators.sma20 {
    if price > sma20 {
      card.record(1, "SMA20", "Bullish", "Price above 20-day SMA");
    } else {
      card.record(-1, "SMA20", "Bearish", "Price below 20-day SMA");
    }
  }

  if let Some(sma50) = indicators.sma50 {
    if price > sma50 {
      card.record(1, "SMA50", "Bullish", "Price above 50-day SMA");
    }
  }

  // Crossover
  if let (Some(sma20), Some(sma50)) = (indicators.sma20, indicators.sma50) {
    if sma20 > sma50 {
      card.record(1, "Golden Cross", "Bullish", "Short-term above long-term");
    } else if sma20 < sma50 {
      card.record(-1, "Death Cross", "Bearish", "Short-term below long-term");
    }
  }

  // RSI: at most one bucket
  if let Some(rsi) = indicators.rsi {
    if rsi < RSI_OVERSOLD {
      card.record(2, "RSI", "Strong Buy", "Oversold condition (RSI < 30)");
    } else if rsi > RSI_OVERBOUGHT {
      card.record(-2, "RSI", "Strong Sell", "Overbought condition (RSI > 70)");
    } else if rsi < RSI_NEAR_OVERSOLD {
      card.record(1, "RSI", "Buy", "Approaching oversold");
    } else if rsi > RSI_NEAR_OVERBOUGHT {
      card.record(-1, "RSI", "Sell", "Approaching overbought");
    }
  }

  if let Some(macd) = indicators.macd {
    if macd > 0.0 {
      card.record(1, "MACD", "Bullish", "Positive momentum");
    } else if macd < 0.0 {
      card.record(-1, "MACD", "Bearish", "Negative momentum");
    }
  }

  // Trend adjustments see the score accumulated so far
  if trend.direction == TrendDirection::StrongDowntrend && card.score > 0 {
    card.record(
      -1,
      "Trend Warning",
      "Caution",
      "⚠️ Strong downtrend active - wait for reversal",
    );
  }

  if trend.direction == TrendDirection::StrongUptrend && card.score >= 0 {
    card.record(1, "Trend Confirmation", "Bullish", "✅ Strong uptrend confirmed");
  }

  (card.score, card.signals)
}

/// Score the readings and assemble the final result.
///
/// Patterns are reported alongside the signal; they do not move the score.
pub fn generate_signal(indicators: Indicators, trend: Trend, patterns: Vec<Pattern>) -> SignalResult {
  let (score, signals) = score_signals(&indicators, &trend);
  let action = Action::from_score(score);

  SignalResult {
    action,
    strength: action.strength(),
    score,
    signals,
    indicators,
    trend,
    patterns,
  }
}
