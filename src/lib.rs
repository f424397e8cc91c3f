pub mod engine; // Timeline scheduling, sinks and statistics
pub mod error;
pub mod io; // Playback and MIDI export
pub mod notation; // Music notation tokens and voice state
pub mod sequencing; // Durations, pitches and events
pub mod stream; // Passthrough / payload segmentation
pub mod synth; // Voice management and polyphony

pub use engine::{EventSink, Scheduler, SchedulerConfig, Summary};
pub use error::{AmcatError, Result};
pub use sequencing::{BlockReport, Event, EventKind, Interval};
pub use stream::{segments, Segment};
