//! Rendering cost of the playback synth at typical callback sizes.
//!
//! Reference deadlines at 48kHz:
//!   - 256 samples = 5.33ms
//!   - 512 samples = 10.67ms

use std::collections::VecDeque;
use std::hint::black_box;

use amcat::synth::{Patch, PolySynth, SynthMessage};
use criterion::{BenchmarkId, Criterion};

pub fn bench_synth(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/synth");

    for &size in &[256usize, 512] {
        for &voices in &[1u8, 16] {
            let mut queue = VecDeque::new();
            for channel in 0..voices {
                queue.push_back(SynthMessage::NoteOn {
                    channel,
                    note: 48 + channel,
                    velocity: 100,
                });
            }
            let mut synth = PolySynth::new(48_000.0, 32, Patch::LEAD, queue);
            let mut buffer = vec![0.0f32; size];

            let id = BenchmarkId::new(format!("{voices}_voices"), size);
            group.bench_with_input(id, &size, |b, _| {
                b.iter(|| synth.render_block(black_box(&mut buffer)))
            });
        }
    }

    group.finish();
}
