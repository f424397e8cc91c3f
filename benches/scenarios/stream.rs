//! Full streams through the scheduler with no audio attached.

use std::hint::black_box;

use amcat::engine::EventLog;
use amcat::{Scheduler, SchedulerConfig};
use criterion::{BenchmarkId, Criterion, Throughput};

use crate::{synthetic_stream, BLOCK_COUNTS};

pub fn bench_stream(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/stream");

    for &blocks in BLOCK_COUNTS {
        let data = synthetic_stream(blocks);
        group.throughput(Throughput::Bytes(data.len() as u64));

        group.bench_with_input(BenchmarkId::new("passthrough", blocks), &data, |b, data| {
            b.iter(|| {
                let mut out = Vec::<u8>::with_capacity(data.len());
                let mut scheduler = Scheduler::new(SchedulerConfig::default());
                scheduler
                    .process_stream(black_box(data), &mut out, &mut std::io::sink())
                    .unwrap();
                out.len()
            })
        });

        // Recording sink plus summary, as with --summary
        group.bench_with_input(BenchmarkId::new("summary", blocks), &data, |b, data| {
            b.iter(|| {
                let mut log = EventLog::new();
                let mut scheduler = Scheduler::new(SchedulerConfig::default()).with_sink(&mut log);
                scheduler
                    .process_stream(black_box(data), &mut std::io::sink(), &mut std::io::sink())
                    .unwrap();
                scheduler.summary().polyphony.peak
            })
        });
    }

    group.finish();
}
