//! Benchmarks for full signal analysis.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use chartsignal::prelude::*;

/// Simple test bar structure
#[derive(Debug, Clone, Copy)]
struct TestBar {
  o: f64,
  h: f64,
  l: f64,
  c: f64,
}

impl OHLCV for TestBar {
  fn open(&self) -> f64 {
    self.o
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
}

/// Generate realistic random bars
fn generate_bars(n: usize) -> Vec<TestBar> {
  let mut bars = Vec::with_capacity(n);
  let mut price = 100.0;

  for i in 0..n {
    let change = ((i * 7 + 13) % 100) as f64 / 50.0 - 1.0; // Deterministic "random"
    let volatility = 2.0 + ((i * 3) % 10) as f64 / 5.0;

    let o = price;
    let c = price + change;
    let h = o.max(c) + volatility * 0.5;
    let l = o.min(c) - volatility * 0.5;

    bars.push(TestBar { o, h, l, c });
    price = c;
  }

  bars
}

fn bench_single_analysis(c: &mut Criterion) {
  let bars = generate_bars(90);
  let engine = AnalysisEngine::default();

  c.bench_function("analyze_90_bars", |b| {
    b.iter(|| {
      let _ = black_box(engine.analyze(black_box(&bars)));
    })
  });
}

fn bench_indicators(c: &mut Criterion) {
  let bars = generate_bars(90);

  c.bench_function("indicators_90_bars", |b| {
    b.iter(|| {
      let series = PriceSeries::new(black_box(&bars)).unwrap();
      let _ = black_box(Indicators::compute(&series));
    })
  });
}

fn bench_patterns(c: &mut Criterion) {
  let bars = generate_bars(90);

  c.bench_function("patterns_90_bars", |b| {
    b.iter(|| {
      let _ = black_box(detect_patterns(black_box(&bars)));
    })
  });
}

fn bench_scaling(c: &mut Criterion) {
  let engine = AnalysisEngine::default();

  let mut group = c.benchmark_group("scaling");

  for size in [30, 90, 250, 1000, 5000].iter() {
    let bars = generate_bars(*size);

    group.bench_with_input(BenchmarkId::new("analyze", size), size, |b, _| {
      b.iter(|| {
        let _ = black_box(engine.analyze(black_box(&bars)));
      })
    });
  }

  group.finish();
}

fn bench_parallel_analysis(c: &mut Criterion) {
  let bars1 = generate_bars(90);
  let bars2 = generate_bars(90);
  let bars3 = generate_bars(90);
  let bars4 = generate_bars(90);

  let engine = AnalysisEngine::default();

  let instruments: Vec<(&str, &[TestBar])> =
    vec![("SYM1", &bars1), ("SYM2", &bars2), ("SYM3", &bars3), ("SYM4", &bars4)];

  c.bench_function("parallel_analysis_4_symbols", |b| {
    b.iter(|| {
      let _ = black_box(analyze_parallel(black_box(&engine), black_box(instruments.clone())));
    })
  });
}

criterion_group!(
  benches,
  bench_single_analysis,
  bench_indicators,
  bench_patterns,
  bench_scaling,
  bench_parallel_analysis,
);

criterion_main!(benches);
