use thiserror::Error;

/// Failures from the collaborators around the core.
///
/// Parsing and segmentation have no error path of their own; everything
/// here comes from I/O, the audio device or the MIDI writer.
#[derive(Debug, Error)]
pub enum AmcatError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("audio device unavailable: {0}")]
    AudioDevice(String),

    #[error("audio stream error: {0}")]
    AudioStream(String),

    #[error("unknown patch '{0}' (expected one of: {1})")]
    UnknownPatch(String, String),

    #[error("failed to write MIDI file: {0}")]
    MidiWrite(String),
}

pub type Result<T> = std::result::Result<T, AmcatError>;
