//! Built-in instruments, selected by name on the command line.

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::Serialize;

use super::oscillator::Waveform;
use crate::error::AmcatError;

/// A named oscillator plus envelope shape.
#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Patch {
    pub name: &'static str,
    pub waveform: Waveform,
    pub attack: f32,
    pub decay: f32,
    pub sustain: f32,
    pub release: f32,
    /// Per-voice output scale; keeps 16 stacked voices out of clipping
    pub gain: f32,
}

impl Patch {
    pub const PIANO: Patch = Patch {
        name: "piano",
        waveform: Waveform::Triangle,
        attack: 0.005,
        decay: 0.3,
        sustain: 0.4,
        release: 0.15,
        gain: 0.2,
    };

    pub const ORGAN: Patch = Patch {
        name: "organ",
        waveform: Waveform::Sine,
        attack: 0.01,
        decay: 0.05,
        sustain: 0.9,
        release: 0.05,
        gain: 0.2,
    };

    pub const LEAD: Patch = Patch {
        name: "lead",
        waveform: Waveform::Saw,
        attack: 0.01,
        decay: 0.1,
        sustain: 0.6,
        release: 0.2,
        gain: 0.12,
    };

    pub const CHIP: Patch = Patch {
        name: "chip",
        waveform: Waveform::Square,
        attack: 0.001,
        decay: 0.05,
        sustain: 0.7,
        release: 0.02,
        gain: 0.1,
    };

    pub const PAD: Patch = Patch {
        name: "pad",
        waveform: Waveform::Triangle,
        attack: 0.3,
        decay: 0.5,
        sustain: 0.8,
        release: 1.0,
        gain: 0.15,
    };

    pub const ALL: [Patch; 5] = [Self::PIANO, Self::ORGAN, Self::LEAD, Self::CHIP, Self::PAD];

    /// Comma-separated list of built-in names
    pub fn names() -> String {
        Self::ALL.iter().map(|p| p.name).collect::<Vec<_>>().join(", ")
    }
}

impl Default for Patch {
    fn default() -> Self {
        Self::PIANO
    }
}

impl FromStr for Patch {
    type Err = AmcatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(wanted))
            .copied()
            .ok_or_else(|| AmcatError::UnknownPatch(wanted.to_string(), Self::names()))
    }
}

impl fmt::Display for Patch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!("Lead".parse::<Patch>().unwrap(), Patch::LEAD);
        assert_eq!(" pad ".parse::<Patch>().unwrap().name, "pad");
    }

    #[test]
    fn unknown_patch_lists_choices() {
        let err = "kazoo".parse::<Patch>().unwrap_err();
        let text = err.to_string();
        assert!(text.contains("kazoo"));
        assert!(text.contains("piano, organ, lead, chip, pad"));
    }
}
