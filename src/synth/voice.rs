use super::envelope::Envelope;
use super::oscillator::Oscillator;
use super::patch::Patch;
use crate::sequencing::pitch::note_to_freq;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Gate held
    Releasing, // Gate released, envelope still sounding
}

/// One sounding note: oscillator through an envelope.
#[derive(Debug, Clone)]
pub struct Voice {
    channel: u8,
    note: u8,
    gain: f32,
    frequency: f32,
    state: VoiceState,
    age: u64,
    sample_rate: f32,
    osc: Oscillator,
    env: Envelope,
}

impl Voice {
    pub fn new(patch: &Patch, sample_rate: f32) -> Self {
        Self {
            channel: 0,
            note: 0,
            gain: 0.0,
            frequency: 0.0,
            state: VoiceState::Free,
            age: 0,
            sample_rate,
            osc: Oscillator::new(patch.waveform),
            env: Envelope::adsr(patch.attack, patch.decay, patch.sustain, patch.release),
        }
    }

    pub fn start(&mut self, channel: u8, note: u8, velocity: u8, age: u64) {
        self.channel = channel;
        self.note = note;
        self.gain = velocity.min(127) as f32 / 127.0;
        self.frequency = note_to_freq(note);
        self.state = VoiceState::Active;
        self.age = age;
        self.osc.reset();
        self.env.gate_on();
    }

    pub fn release(&mut self) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
            self.env.gate_off(self.sample_rate);
        }
    }

    /// Add this voice's output into `out`.
    pub fn render_add(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            let level = self.env.next_sample(self.sample_rate);
            *sample += self.osc.next_sample(self.frequency, self.sample_rate) * level * self.gain;
        }

        if self.state == VoiceState::Releasing && !self.env.is_active() {
            self.free();
        }
    }

    pub fn free(&mut self) {
        self.state = VoiceState::Free;
        self.env.reset();
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, VoiceState::Active | VoiceState::Releasing)
    }

    /// Gate still held for this channel and note
    pub fn holds(&self, channel: u8, note: u8) -> bool {
        self.state == VoiceState::Active && self.channel == channel && self.note == note
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn note(&self) -> u8 {
        self.note
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }
}
