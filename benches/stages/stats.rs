//! Benchmarks for the end-of-run polyphony sweep and histogram.

use std::hint::black_box;

use amcat::engine::stats::{Polyphony, DEFAULT_HISTOGRAM_BUCKETS};
use amcat::Interval;
use criterion::{BenchmarkId, Criterion};

pub fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages/stats");

    for &count in &[100usize, 1_000, 10_000] {
        // Four staggered voices of quarter notes
        let intervals: Vec<Interval> = (0..count)
            .map(|i| {
                let voice = (i % 4) as u8;
                let start = (i / 4) as f64 * 0.5 + voice as f64 * 0.125;
                Interval::new(start, start + 0.5, voice)
            })
            .collect();
        let duration = intervals.iter().map(|iv| iv.end).fold(0.0, f64::max);

        group.bench_with_input(BenchmarkId::new("polyphony", count), &intervals, |b, iv| {
            b.iter(|| {
                Polyphony::analyze(black_box(iv), duration, DEFAULT_HISTOGRAM_BUCKETS).peak
            })
        });
    }

    group.finish();
}
