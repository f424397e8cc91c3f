use super::message::{MessageReceiver, SynthMessage};
use super::patch::Patch;
use super::voice::{Voice, VoiceState};
use super::MAX_BLOCK_SIZE;

/// Default number of simultaneously sounding notes
pub const DEFAULT_POLYPHONY: usize = 32;

/// Mixes a fixed pool of voices, driven by messages from `rx`.
pub struct PolySynth<R: MessageReceiver> {
    voices: Vec<Voice>,
    rx: R,
    patch: Patch,
    temp_buffer: Vec<f32>,
    frame_counter: u64,
}

impl<R: MessageReceiver> PolySynth<R> {
    pub fn new(sample_rate: f32, max_voices: usize, patch: Patch, rx: R) -> Self {
        let voices = (0..max_voices.max(1))
            .map(|_| Voice::new(&patch, sample_rate))
            .collect();

        Self {
            voices,
            rx,
            patch,
            temp_buffer: vec![0.0; MAX_BLOCK_SIZE],
            frame_counter: 0,
        }
    }

    pub fn patch(&self) -> &Patch {
        &self.patch
    }

    /// Drain pending messages, then render `out` (any length).
    pub fn render_block(&mut self, out: &mut [f32]) {
        while let Some(msg) = self.rx.pop() {
            self.handle(msg);
        }

        out.fill(0.0);
        for chunk in out.chunks_mut(MAX_BLOCK_SIZE) {
            let mix = &mut self.temp_buffer[..chunk.len()];
            mix.fill(0.0);
            for voice in self.voices.iter_mut().filter(|v| v.is_active()) {
                voice.render_add(mix);
            }
            for (o, m) in chunk.iter_mut().zip(mix.iter()) {
                *o = (m * self.patch.gain).clamp(-1.0, 1.0);
            }
        }

        self.frame_counter += out.len() as u64;
    }

    pub fn handle(&mut self, msg: SynthMessage) {
        match msg {
            SynthMessage::NoteOn {
                channel,
                note,
                velocity,
            } => {
                let age = self.frame_counter;
                let voice = self.allocate_voice();
                voice.start(channel, note, velocity, age);
            }
            SynthMessage::NoteOff { channel, note } => {
                if let Some(voice) = self.voices.iter_mut().find(|v| v.holds(channel, note)) {
                    voice.release();
                }
            }
            SynthMessage::AllNotesOff => {
                for voice in &mut self.voices {
                    voice.release();
                }
            }
        }
    }

    pub fn active_voices(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    /// Free voice, else the oldest releasing one, else the oldest held one.
    fn allocate_voice(&mut self) -> &mut Voice {
        let idx = self
            .voices
            .iter()
            .position(|v| v.is_free())
            .or_else(|| self.oldest(VoiceState::Releasing))
            .or_else(|| self.oldest(VoiceState::Active))
            .unwrap_or(0);
        &mut self.voices[idx]
    }

    fn oldest(&self, state: VoiceState) -> Option<usize> {
        self.voices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.state() == state)
            .min_by_key(|(_, v)| v.age())
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    fn synth(max_voices: usize) -> PolySynth<VecDeque<SynthMessage>> {
        PolySynth::new(1_000.0, max_voices, Patch::ORGAN, VecDeque::new())
    }

    fn on(channel: u8, note: u8) -> SynthMessage {
        SynthMessage::NoteOn {
            channel,
            note,
            velocity: 100,
        }
    }

    #[test]
    fn same_pitch_on_two_channels_releases_independently() {
        let mut synth = synth(4);
        synth.handle(on(0, 60));
        synth.handle(on(1, 60));
        assert_eq!(synth.active_voices(), 2);

        synth.handle(SynthMessage::NoteOff { channel: 1, note: 60 });
        let held = synth.voices.iter().filter(|v| v.holds(0, 60)).count();
        assert_eq!(held, 1);
        assert!(synth.voices.iter().all(|v| !v.holds(1, 60)));
    }

    #[test]
    fn oldest_voice_is_stolen_when_full() {
        let mut synth = synth(2);
        let mut buf = [0.0; 16];

        synth.handle(on(0, 60));
        synth.render_block(&mut buf);
        synth.handle(on(1, 64));
        synth.render_block(&mut buf);
        synth.handle(on(2, 67));

        assert_eq!(synth.active_voices(), 2);
        assert!(synth.voices.iter().any(|v| v.holds(2, 67)));
        assert!(synth.voices.iter().all(|v| !v.holds(0, 60)));
    }

    #[test]
    fn renders_queued_messages_and_stays_in_range() {
        let mut synth = synth(4);
        synth.rx.push_back(on(0, 60));
        synth.rx.push_back(on(0, 64));

        let mut buf = vec![0.0; MAX_BLOCK_SIZE + 100];
        synth.render_block(&mut buf);
        assert!(buf.iter().any(|s| *s != 0.0));
        assert!(buf.iter().all(|s| (-1.0..=1.0).contains(s)));
        assert!(synth.rx.is_empty());
    }
}
