//! Benchmarks for splitting streams into passthrough and payload.

use std::hint::black_box;

use amcat::stream::{segments, suspicious_escapes};
use criterion::{BenchmarkId, Criterion, Throughput};

use crate::{synthetic_stream, BLOCK_COUNTS};

pub fn bench_segment(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages/segment");

    for &blocks in BLOCK_COUNTS {
        let data = synthetic_stream(blocks);
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::new("segments", blocks), &data, |b, data| {
            b.iter(|| segments(black_box(data)).count())
        });

        // Strict-mode scan over the same bytes
        group.bench_with_input(BenchmarkId::new("inspect", blocks), &data, |b, data| {
            b.iter(|| suspicious_escapes(black_box(data), 0).len())
        });
    }

    // Plain text with no escapes at all
    let plain = vec![b'x'; 64 * 1024];
    group.throughput(Throughput::Bytes(plain.len() as u64));
    group.bench_function("plain_64k", |b| {
        b.iter(|| segments(black_box(&plain)).count())
    });

    group.finish();
}
