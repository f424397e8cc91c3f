use crate::sequencing::{Event, EventKind};
use crate::synth::message::SynthMessage;

/// Scheduled note event to a synth control message on the voice's channel.
pub fn event_to_synth(event: &Event) -> SynthMessage {
    match event.kind {
        EventKind::NoteOn => SynthMessage::NoteOn {
            channel: event.voice,
            note: event.pitch.min(127),
            velocity: event.velocity,
        },
        EventKind::NoteOff => SynthMessage::NoteOff {
            channel: event.voice,
            note: event.pitch.min(127),
        },
    }
}
