// Collaborators on the far side of the scheduler: live audio and file export.

pub mod converter;
pub mod midi;
#[cfg(feature = "rtrb")]
pub mod playback;

pub use midi::MidiExporter;
#[cfg(feature = "rtrb")]
pub use playback::Player;
