//! Benchmarks for tokenizing and applying one notation block.

use std::hint::black_box;

use amcat::notation::{Lexer, NotationParser};
use criterion::{BenchmarkId, Criterion};

pub fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages/parse");

    for &notes in &[8usize, 64, 512] {
        let payload: Vec<u8> = b"T140 L8 O4 "
            .iter()
            .copied()
            .chain(b"C#D-E.F+G16A4B>C<".iter().copied().cycle().take(notes * 2))
            .collect();

        group.bench_with_input(BenchmarkId::new("lex", notes), &payload, |b, payload| {
            b.iter(|| Lexer::new(black_box(payload)).count())
        });

        let mut parser = NotationParser::new();
        group.bench_with_input(BenchmarkId::new("parse", notes), &payload, |b, payload| {
            b.iter(|| parser.parse_block(black_box(payload)).events.len())
        });
    }

    group.finish();
}
