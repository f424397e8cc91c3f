//! Benchmarks for the pieces the scheduler is built from.

mod parse;
mod segment;
mod stats;

pub use parse::bench_parse;
pub use segment::bench_segment;
pub use stats::bench_stats;
