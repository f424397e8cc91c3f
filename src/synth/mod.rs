// Sound engine behind live playback: a pool of oscillator+envelope voices
// driven by control messages from the scheduling thread.

pub mod envelope;
pub mod message;
pub mod oscillator;
pub mod patch;
pub mod poly;
pub mod voice;

pub use message::{MessageReceiver, SynthMessage};
pub use oscillator::Waveform;
pub use patch::Patch;
pub use poly::PolySynth;

/// Largest block rendered in one pass
pub const MAX_BLOCK_SIZE: usize = 2048;
pub(crate) const MIN_TIME: f32 = 1.0 / 48_000.0;
