/*
Pitch Numbers
=============

Notes are numbered the MIDI way, with middle C (C in octave 4) = 60.

The formula: note_number = semitone + accidental + 12 * (octave + 1)
Where semitone: C=0, D=2, E=4, F=5, G=7, A=9, B=11
and accidental: sharp = +1, flat = -1, natural = 0

With octaves clamped to 0..=9 the lowest reachable number is C-flat in
octave 0 (11) and the highest is B-sharp in octave 9 (132). Numbers above
127 are kept here and clamped by whatever speaks real MIDI.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest octave a voice can reach.
pub const MIN_OCTAVE: u8 = 0;
/// Highest octave a voice can reach.
pub const MAX_OCTAVE: u8 = 9;
/// Octave every voice starts a block with.
pub const DEFAULT_OCTAVE: u8 = 4;

/// The seven natural note letters
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PitchClass {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl PitchClass {
    /// Map a note letter (either case) to its pitch class.
    pub fn from_letter(letter: u8) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            b'c' => Some(PitchClass::C),
            b'd' => Some(PitchClass::D),
            b'e' => Some(PitchClass::E),
            b'f' => Some(PitchClass::F),
            b'g' => Some(PitchClass::G),
            b'a' => Some(PitchClass::A),
            b'b' => Some(PitchClass::B),
            _ => None,
        }
    }

    /// Semitones above C
    pub fn semitone(&self) -> i32 {
        match self {
            PitchClass::C => 0,
            PitchClass::D => 2,
            PitchClass::E => 4,
            PitchClass::F => 5,
            PitchClass::G => 7,
            PitchClass::A => 9,
            PitchClass::B => 11,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Accidental {
    #[default]
    Natural,
    Sharp,
    Flat,
}

impl Accidental {
    /// `#` and `+` raise, `-` lowers.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'#' | b'+' => Some(Accidental::Sharp),
            b'-' => Some(Accidental::Flat),
            _ => None,
        }
    }

    pub fn offset(&self) -> i32 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }
}

/// Note number for a pitch class in an octave.
pub fn pitch(class: PitchClass, accidental: Accidental, octave: u8) -> u8 {
    let octave = octave.clamp(MIN_OCTAVE, MAX_OCTAVE) as i32;
    let number = class.semitone() + accidental.offset() + (octave + 1) * 12;
    // 11..=132 after the octave clamp, always representable
    number as u8
}

/// Clamp an octave into the playable range.
pub fn clamp_octave(octave: u32) -> u8 {
    octave.min(MAX_OCTAVE as u32) as u8
}

/// Convert a note number to frequency in Hz (A4 = 69 = 440 Hz).
#[inline]
pub fn note_to_freq(note: u8) -> f32 {
    440.0 * 2.0_f32.powf((note as f32 - 69.0) / 12.0)
}
