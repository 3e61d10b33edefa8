//! Boundary with the upstream market-data provider
//!
//! The engine never fetches anything itself. Callers implement [`BarSource`]
//! for their provider; [`analyze_symbols`] then fetches and analyses a list of
//! symbols on the rayon pool, isolating failures per symbol.

use rayon::prelude::*;
use tracing::{debug, warn};

use crate::{AnalysisEngine, Bar, Result, SignalError, SymbolAnalysis};

/// Calendar days of history requested per symbol
pub const LOOKBACK_DAYS: u32 = 90;

/// Failure reported by a [`BarSource`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct SourceError(pub String);

impl SourceError {
  pub fn new(message: impl Into<String>) -> Self {
    Self(message.into())
  }
}

/// Provider of daily bars, oldest first.
///
/// Retries and timeouts belong to the implementation.
pub trait BarSource: Send + Sync {
  fn historical_bars(&self, symbol: &str, days: u32) -> std::result::Result<Vec<Bar>, SourceError>;
}

impl<F> BarSource for F
where
  F: Fn(&str, u32) -> std::result::Result<Vec<Bar>, SourceError> + Send + Sync,
{
  fn historical_bars(&self, symbol: &str, days: u32) -> std::result::Result<Vec<Bar>, SourceError> {
    self(symbol, days)
  }
}

/// Fetch [`LOOKBACK_DAYS`] of history for `symbol` and analyse it.
pub fn analyze_symbol<S: BarSource + ?Sized>(
  engine: &AnalysisEngine,
  source: &S,
  symbol: &str,
) -> Result<crate::signal::SignalResult> {
  let bars = source
    .historical_bars(symbol, LOOKBACK_DAYS)
    .map_err(|e| SignalError::Source {
      symbol: symbol.to_string(),
      message: e.to_string(),
    })?;
  debug!(symbol, bars = bars.len(), "fetched history");
  engine.analyze(&bars)
}

/// Fetch and analyse every symbol in parallel. Results keep input order.
pub fn analyze_symbols<S, Sym>(engine: &AnalysisEngine, source: &S, symbols: &[Sym]) -> Vec<SymbolAnalysis>
where
  S: BarSource + ?Sized,
  Sym: AsRef<str> + Sync,
{
  symbols
    .par_iter()
    .map(|symbol| {
      let symbol = symbol.as_ref();
      let outcome = analyze_symbol(engine, source, symbol);
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
