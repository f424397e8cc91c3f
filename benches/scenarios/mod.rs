//! Whole-pipeline benchmarks.

mod stream;
mod synth;

pub use stream::bench_stream;
pub use synth::bench_synth;
