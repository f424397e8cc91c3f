/*
Note Lengths
============

A note length is written the way the notation writes it: as the denominator
of a fraction of a whole note (4 = quarter, 8 = eighth, 1 = whole), with an
optional dot that stretches it by half again.

The Math: Length to Seconds
---------------------------

Tempo is counted in quarter notes per minute, so one quarter lasts 60 / bpm
seconds. A length denominator L covers 4 / L quarters:

    seconds = (4 / L) * (60 / bpm)
    dotted  = seconds * 1.5

Example: L4 at 120 bpm
  - 4 / 4 = 1 quarter
  - 60 / 120 = 0.5 s per quarter
  - 0.5 s

A denominator of zero is never stored; callers substitute their own default
before building a `NoteLength`, and `seconds` guards the division anyway.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Lowest accepted tempo in beats per minute.
pub const MIN_TEMPO: u32 = 1;
/// Highest accepted tempo in beats per minute.
pub const MAX_TEMPO: u32 = 1000;
/// Tempo every voice starts a block with.
pub const DEFAULT_TEMPO: u32 = 120;

/// Length of a note or rest as a fraction of a whole note.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteLength {
    /// 4 = quarter, 8 = eighth, etc.
    pub denominator: u32,
    /// Stretch by 3/2
    pub dotted: bool,
}

impl NoteLength {
    pub const WHOLE: NoteLength = NoteLength::new(1);
    pub const HALF: NoteLength = NoteLength::new(2);
    pub const QUARTER: NoteLength = NoteLength::new(4);
    pub const EIGHTH: NoteLength = NoteLength::new(8);
    pub const SIXTEENTH: NoteLength = NoteLength::new(16);

    pub const fn new(denominator: u32) -> Self {
        NoteLength {
            denominator,
            dotted: false,
        }
    }

    /// Apply a dot: multiply duration by 3/2
    pub const fn dotted(self) -> Self {
        NoteLength {
            denominator: self.denominator,
            dotted: true,
        }
    }

    /// Apply a dot only when `dotted` is set.
    pub const fn with_dot(self, dotted: bool) -> Self {
        if dotted {
            self.dotted()
        } else {
            self
        }
    }

    /// Duration in seconds at `tempo` quarter notes per minute.
    ///
    /// Strictly positive for any tempo in [1, 1000] and denominator >= 1.
    pub fn seconds(&self, tempo: u32) -> f64 {
        let quarters = 4.0 / self.denominator.max(1) as f64;
        let base = quarters * seconds_per_quarter(tempo);
        if self.dotted {
            base * 1.5
        } else {
            base
        }
    }
}

/// Length of one quarter note in seconds.
pub fn seconds_per_quarter(tempo: u32) -> f64 {
    60.0 / tempo.max(MIN_TEMPO) as f64
}

/// Clamp a parsed tempo into the accepted range.
pub fn clamp_tempo(tempo: u32) -> u32 {
    tempo.clamp(MIN_TEMPO, MAX_TEMPO)
}
