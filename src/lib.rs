//! # chartsignal
//!
//! Technical-analysis engine that turns an ordered series of daily OHLCV bars
//! for one instrument into a single actionable trading signal: an action, a
//! strength label, an integer score, an indicator snapshot, a trend
//! classification and the chart patterns found in the series.
//!
//! ## Quick Start
//!
//! ```rust
//! use chartsignal::prelude::*;
//!
//! // Define your OHLCV data
//! struct Candle { o: f64, h: f64, l: f64, c: f64, v: f64 }
//!
//! impl OHLCV for Candle {
//!     fn open(&self) -> f64 { self.o }
//!     fn high(&self) -> f64 { self.h }
//!     fn low(&self) -> f64 { self.l }
//!     fn close(&self) -> f64 { self.c }
//!     fn volume(&self) -> f64 { self.v }
//! }
//!
//! let engine = EngineBuilder::new().build().unwrap();
//!
//! let candles: Vec<Candle> = (0..60)
//!     .map(|i| {
//!         let c = 100.0 + i as f64;
//!         Candle { o: c - 0.5, h: c + 1.0, l: c - 1.0, c, v: 1000.0 }
//!     })
//!     .collect();
//!
//! let signal = engine.analyze(&candles).unwrap();
//! assert_eq!(signal.action, Action::StrongBuy);
//! ```
//!
//! The engine holds no state between calls; every analysis is a pure function
//! of the bars it is given, so one engine can serve any number of symbols from
//! any number of threads.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{debug, warn};

pub mod indicators;
pub mod patterns;
pub mod series;
pub mod signal;
pub mod source;
pub mod trend;

pub mod prelude {
    pub use crate::{
        // Batch
        analyze,
        analyze_parallel,
        // Indicators
        indicators::{macd, rsi, sma, Indicators},
        // Patterns
        patterns::{
            detect_patterns, BuiltinDetector, Direction, Extremum, Pattern, PatternContext,
            PatternDetector, PatternId,
        },
        // Series
        series::PriceSeries,
        // Signal
        signal::{generate_signal, score_signals, Action, SignalEntry, SignalResult, SignalStrength},
        // Source boundary
        source::{analyze_symbol, analyze_symbols, BarSource, SourceError, LOOKBACK_DAYS},
        // Trend
        trend::{detect_trend, Trend, TrendDirection},
        // Engine
        AnalysisEngine,
        Bar,
        EngineBuilder,
        EngineConfig,
        OHLCVExt,
        // Errors
        Result,
        SignalError,
        SymbolAnalysis,
        OHLCV,
    };
}

// ============================================================
// ERRORS
// ============================================================

pub type Result<T> = std::result::Result<T, SignalError>;

/// Errors that can occur while analysing a price series.
///
/// Insufficient history is never an error: indicators report `None`, the
/// trend reports `UNKNOWN` and pattern detection returns an empty list.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SignalError {
    #[error("Empty price series")]
    EmptySeries,

    #[error("Unordered price series: bar {index} is dated before its predecessor")]
    UnorderedSeries { index: usize },

    #[error("Invalid OHLCV at index {index}: {reason}")]
    InvalidBar { index: usize, reason: &'static str },

    #[error("Failed to fetch historical data for {symbol}: {message}")]
    Source { symbol: String, message: String },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

// ============================================================
// OHLCV TRAITS
// ============================================================

/// Core OHLCV data trait
pub trait OHLCV {
    fn open(&self) -> f64;
    fn high(&self) -> f64;
    fn low(&self) -> f64;
    fn close(&self) -> f64;
    fn volume(&self) -> f64;

    /// Seconds since the Unix epoch. Series ordering is only checked for bars
    /// that report a timestamp.
    fn timestamp(&self) -> Option<i64> {
        None
    }
}

/// Extension trait with checks shared by every bar type
pub trait OHLCVExt: OHLCV {
    /// Validate OHLCV data consistency
    fn validate(&self) -> Result<()> {
        let prices = [self.open(), self.high(), self.low(), self.close()];
        if prices.iter().any(|p| p.is_nan()) {
            return Err(SignalError::InvalidBar {
                index: 0,
                reason: "NaN in OHLCV",
            });
        }
        if prices.iter().any(|p| p.is_infinite()) {
            return Err(SignalError::InvalidBar {
                index: 0,
                reason: "Infinite value in OHLCV",
            });
        }
        if self.high() < self.low() {
            return Err(SignalError::InvalidBar {
                index: 0,
                reason: "high < low",
            });
        }
        if self.volume().is_nan() || self.volume() < 0.0 {
            return Err(SignalError::InvalidBar {
                index: 0,
                reason: "negative or NaN volume",
            });
        }
        Ok(())
    }
}

impl<T: OHLCV + ?Sized> OHLCVExt for T {}

/// One trading day as delivered by the upstream market-data provider.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Bar {
    pub date: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    pub fn new(date: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

impl OHLCV for Bar {
    fn open(&self) -> f64 {
        self.open
    }

    fn high(&self) -> f64 {
        self.high
    }

    fn low(&self) -> f64 {
        self.low
    }

    fn close(&self) -> f64 {
        self.close
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn timestamp(&self) -> Option<i64> {
        Some(self.date.timestamp())
    }
}

// ============================================================
// ANALYSIS ENGINE
// ============================================================

/// Engine configuration
///
/// Filters only drop patterns from the output; detection thresholds are fixed.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Reject bars with non-finite prices, `high < low` or negative volume.
    pub validate_data: bool,
    /// Drop patterns whose confidence is below this value (0..=100).
    pub min_confidence: Option<u8>,
    /// Only run these pattern detectors.
    pub pattern_filter: Option<Vec<patterns::PatternId>>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            validate_data: true,
            min_confidence: None,
            pattern_filter: None,
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<()> {
        if let Some(min) = self.min_confidence {
            if min > 100 {
                return Err(SignalError::InvalidConfig(format!(
                    "min_confidence = {min} out of range [0, 100]"
                )));
            }
        }
        if let Some(ref filter) = self.pattern_filter {
            if filter.is_empty() {
                return Err(SignalError::InvalidConfig(
                    "pattern_filter must name at least one pattern".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Main analysis engine. Immutable once built.
#[derive(Debug, Clone)]
pub struct AnalysisEngine {
    detectors: Vec<patterns::BuiltinDetector>,
    config: EngineConfig,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self {
            detectors: patterns::BuiltinDetector::all(),
            config: EngineConfig::default(),
        }
    }
}

impl AnalysisEngine {
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Detectors in the order their matches are reported.
    pub fn detectors(&self) -> &[patterns::BuiltinDetector] {
        &self.detectors
    }

    /// Analyse one instrument.
    ///
    /// Fails only when the series breaks the caller contract (empty,
    /// out of order, or invalid bars when `validate_data` is on).
    pub fn analyze<T: OHLCV>(&self, bars: &[T]) -> Result<signal::SignalResult> {
        let series = series::PriceSeries::new(bars)?;
        if self.config.validate_data {
            series.validate_bars()?;
        }
        Ok(self.analyze_series(&series))
    }

    /// Analyse an already validated series.
    pub fn analyze_series<T: OHLCV>(&self, series: &series::PriceSeries<'_, T>) -> signal::SignalResult {
        let indicators = indicators::Indicators::compute(series);
        let trend = trend::detect_trend(series.bars());
        let patterns = self.detect_patterns(series.bars());

        let result = signal::generate_signal(indicators, trend, patterns);
        debug!(
            bars = series.len(),
            score = result.score,
            action = result.action.as_str(),
            trend = result.trend.direction.as_str(),
            patterns = result.patterns.len(),
            "analysis complete"
        );
        result
    }

    /// Run the configured pattern detectors, applying the output filters.
    pub fn detect_patterns<T: OHLCV>(&self, bars: &[T]) -> Vec<patterns::Pattern> {
        patterns::run_detectors(&self.detectors, bars)
            .into_iter()
            .filter(|p| self.should_include(p))
            .collect()
    }

    fn should_include(&self, p: &patterns::Pattern) -> bool {
        match self.config.min_confidence {
            Some(min) => p.confidence >= min,
            None => true,
        }
    }
}

// ============================================================
// BUILDER
// ============================================================

/// Builder for creating AnalysisEngine instances
#[derive(Debug, Clone, Default)]
pub struct EngineBuilder {
    config: EngineConfig,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration, e.g. one loaded from a file
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable/disable per-bar data validation
    pub fn validate_data(mut self, enable: bool) -> Self {
        self.config.validate_data = enable;
        self
    }

    /// Set minimum pattern confidence filter
    pub fn min_confidence(mut self, confidence: u8) -> Self {
        self.config.min_confidence = Some(confidence);
        self
    }

    /// Filter to specific patterns only
    pub fn only_patterns(mut self, ids: impl IntoIterator<Item = patterns::PatternId>) -> Self {
        self.config.pattern_filter = Some(ids.into_iter().collect());
        self
    }

    /// Build the engine
    pub fn build(self) -> Result<AnalysisEngine> {
        self.config.validate()?;

        let mut detectors = patterns::BuiltinDetector::all();
        if let Some(ref filter) = self.config.pattern_filter {
            detectors.retain(|d| filter.contains(&d.id()));
        }

        Ok(AnalysisEngine {
            detectors,
            config: self.config,
        })
    }
}

/// Analyse one series with the default engine.
pub fn analyze<T: OHLCV>(bars: &[T]) -> Result<signal::SignalResult> {
    AnalysisEngine::default().analyze(bars)
}

// ============================================================
// PARALLEL ANALYSIS
// ============================================================

/// Outcome for one symbol of a batch. A failure never affects other symbols.
#[derive(Debug, Clone)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub outcome: Result<signal::SignalResult>,
}

impl SymbolAnalysis {
    pub fn is_ok(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn signal(&self) -> Option<&signal::SignalResult> {
        self.outcome.as_ref().ok()
    }

    pub fn error(&self) -> Option<&SignalError> {
        self.outcome.as_ref().err()
    }
}

/// Serializes as `{symbol, ...signal}` on success and `{symbol, error}` on failure.
impl serde::Serialize for SymbolAnalysis {
    fn serialize<S: serde::Serializer>(&self, s: S) -> std::result::Result<S::Ok, S::Error> {
        #[derive(serde::Serialize)]
        struct Analysed<'a> {
            symbol: &'a str,
            #[serde(flatten)]
            signal: &'a signal::SignalResult,
        }

        #[derive(serde::Serialize)]
        struct Failed<'a> {
            symbol: &'a str,
            error: String,
        }

        match &self.outcome {
            Ok(signal) => Analysed {
                symbol: &self.symbol,
                signal,
            }
            .serialize(s),
            Err(e) => Failed {
                symbol: &self.symbol,
                error: e.to_string(),
            }
            .serialize(s),
        }
    }
}

/// Parallel analysis of multiple instruments. Results keep input order.
pub fn analyze_parallel<'a, T, I>(engine: &AnalysisEngine, instruments: I) -> Vec<SymbolAnalysis>
where
    T: OHLCV + Sync + 'a,
    I: IntoParallelIterator<Item = (&'a str, &'a [T])>,
{
    instruments
        .into_par_iter()
        .map(|(symbol, bars)| {
            let outcome = engine.analyze(bars);
            if let Err(ref e) = outcome {
                warn!(symbol, error = %e, "analysis failed");
            }
            SymbolAnalysis {
                symbol: symbol.to_string(),
                outcome,
            }
        })
        .collect()
}

// ============================================================
// TESTS
// ============================================================
