//! Local extrema finder
//!
//! A peak is strictly greater than both neighbours, a trough strictly less.
//! Plateaus and the first/last element are never extrema.

/// A local peak or trough location
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Extremum {
  pub index: usize,
  pub value: f64,
}

fn find_by(values: &[f64], beyond: impl Fn(f64, f64) -> bool) -> Vec<Extremum> {
  values
    .windows(3)
    .enumerate()
    .filter(|(_, w)| beyond(w[1], w[0]) && beyond(w[1], w[2]))
    .map(|(i, w)| Extremum {
      index: i + 1,
      value: w[1],
    })
    .collect()
}

/// Strict local maxima in ascending index order.
pub fn find_peaks(values: &[f64]) -> Vec<Extremum> {
  find_by(values, |v, neighbour| v > neighbour)
}

/// Strict local minima in ascending index order.
pub fn find_troughs(values: &[f64]) -> Vec<Extremum> {
  find_by(values, |v, neighbour| v < neighbour)
}
