use crate::sequencing::{
    duration::DEFAULT_TEMPO,
    pitch::{DEFAULT_OCTAVE, MAX_OCTAVE, MIN_OCTAVE},
    VOICE_COUNT,
};

/// Length denominator every voice starts a block with (an eighth).
pub const DEFAULT_LENGTH: u32 = 8;

/// Per-voice defaults and local clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VoiceState {
    /// Quarter notes per minute, 1..=1000
    pub tempo: u32,
    /// 0..=9
    pub octave: u8,
    /// Length denominator used when a note or rest gives none
    pub default_length: u32,
    /// Block-local seconds, never decreases
    pub clock: f64,
}

impl Default for VoiceState {
    fn default() -> Self {
        Self {
            tempo: DEFAULT_TEMPO,
            octave: DEFAULT_OCTAVE,
            default_length: DEFAULT_LENGTH,
            clock: 0.0,
        }
    }
}

impl VoiceState {
    pub fn octave_up(&mut self) {
        self.octave = (self.octave + 1).min(MAX_OCTAVE);
    }

    pub fn octave_down(&mut self) {
        self.octave = self.octave.saturating_sub(1).max(MIN_OCTAVE);
    }

    /// Move the clock forward, returning where it started.
    pub fn advance(&mut self, seconds: f64) -> f64 {
        let start = self.clock;
        self.clock += seconds;
        start
    }
}

/// All sixteen voices plus the "current voice" cursor.
///
/// A bank lives for exactly one notation block; nothing carries over.
#[derive(Debug, Clone)]
pub struct VoiceBank {
    voices: [VoiceState; VOICE_COUNT],
    current: u8,
}

impl Default for VoiceBank {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceBank {
    pub fn new() -> Self {
        Self {
            voices: [VoiceState::default(); VOICE_COUNT],
            current: 0,
        }
    }

    /// Back to block-entry defaults.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Point the cursor at `voice`; out-of-range indices leave it unchanged.
    pub fn select(&mut self, voice: u32) -> bool {
        if (voice as usize) < VOICE_COUNT {
            self.current = voice as u8;
            true
        } else {
            false
        }
    }

    pub fn current_index(&self) -> u8 {
        self.current
    }

    pub fn current(&self) -> &VoiceState {
        &self.voices[self.current as usize]
    }

    pub fn current_mut(&mut self) -> &mut VoiceState {
        &mut self.voices[self.current as usize]
    }

    pub fn voice(&self, index: usize) -> Option<&VoiceState> {
        self.voices.get(index)
    }

    /// Latest clock across all voices; untouched voices sit at zero.
    pub fn end_time(&self) -> f64 {
        self.voices.iter().map(|v| v.clock).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let bank = VoiceBank::new();
        for i in 0..VOICE_COUNT {
            let v = bank.voice(i).unwrap();
            assert_eq!(v.tempo, 120);
            assert_eq!(v.octave, 4);
            assert_eq!(v.default_length, 8);
            assert_eq!(v.clock, 0.0);
        }
        assert_eq!(bank.current_index(), 0);
    }

    #[test]
    fn test_select_ignores_out_of_range() {
        let mut bank = VoiceBank::new();
        assert!(bank.select(15));
        assert_eq!(bank.current_index(), 15);
        assert!(!bank.select(16));
        assert_eq!(bank.current_index(), 15);
    }

    #[test]
    fn test_octave_shift_clamps() {
        let mut v = VoiceState {
            octave: 9,
            ..Default::default()
        };
        v.octave_up();
        assert_eq!(v.octave, 9);

        v.octave = 0;
        v.octave_down();
        assert_eq!(v.octave, 0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut bank = VoiceBank::new();
        bank.select(3);
        bank.current_mut().tempo = 300;
        bank.current_mut().advance(2.0);
        assert_eq!(bank.end_time(), 2.0);

        bank.reset();
        assert_eq!(bank.current_index(), 0);
        assert_eq!(bank.voice(3).unwrap().tempo, 120);
        assert_eq!(bank.end_time(), 0.0);
    }
}
