//! Timing and pitch arithmetic plus the event types every layer shares.

pub mod duration;
pub mod event;
pub mod pitch;

pub use duration::NoteLength;
pub use event::{BlockReport, Event, EventKind, Interval, VOICE_COUNT};
pub use pitch::{Accidental, PitchClass};
