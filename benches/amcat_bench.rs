//! Benchmarks for stream processing and the playback synth.
//!
//! Run with: cargo bench
//!
//! Benchmark groups:
//!   - stages/*     Segmentation, block parsing and polyphony statistics
//!   - scenarios/*  Whole streams through the scheduler, synth rendering

use criterion::{criterion_group, criterion_main};

mod scenarios;
mod stages;

/// Number of music blocks in generated streams.
pub const BLOCK_COUNTS: &[usize] = &[1, 16, 256];

/// ANSI-art-like stream: colored text lines with a music block after each.
pub fn synthetic_stream(blocks: usize) -> Vec<u8> {
    let mut data = Vec::new();
    for i in 0..blocks {
        data.extend_from_slice(b"\x1b[1;33m\xdb\xdb\xb2\xb1\xb0 line of art \x1b[0m\r\n");
        data.extend_from_slice(format!("\x1b[MF T{} L8 O4 CDEF V1 O3 C4 G4 ", 100 + i % 80).as_bytes());
        data.extend_from_slice(b"V2 L16 >C#D-EF+G<AB R8\x1b[0m");
    }
    data
}

criterion_group!(
    benches,
    stages::bench_segment,
    stages::bench_parse,
    stages::bench_stats,
    scenarios::bench_stream,
    scenarios::bench_synth,
);
criterion_main!(benches);
