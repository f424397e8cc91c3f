//! Timeline engine: block placement, sink dispatch and run statistics.

pub mod report;
pub mod scheduler;
pub mod sink;
pub mod stats;

pub use report::{block_line, write_summary};
pub use scheduler::{Scheduler, SchedulerConfig};
pub use sink::{BlockBatch, EventLog, EventSink};
pub use stats::{Polyphony, Summary, TempoStats};
