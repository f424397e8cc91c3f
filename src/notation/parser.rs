//! Token application: drives a `VoiceBank` through one payload and collects
//! the block's events and report.

use super::lexer::{Lexer, Token};
use super::voice::VoiceBank;
use crate::sequencing::{
    duration::clamp_tempo,
    pitch::{clamp_octave, pitch},
    BlockReport, Event, Interval, NoteLength,
};

/// Result of parsing one notation block (block-local times)
#[derive(Debug, Clone, Default)]
pub struct ParsedBlock {
    pub events: Vec<Event>,
    pub report: BlockReport,
}

/// Stateful parser; every `parse_block` call starts from a fresh bank.
#[derive(Debug, Default)]
pub struct NotationParser {
    bank: VoiceBank,
    events: Vec<Event>,
    report: BlockReport,
}

impl NotationParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse one payload. Never fails; unrecognized bytes are skipped.
    pub fn parse_block(&mut self, payload: &[u8]) -> ParsedBlock {
        self.bank.reset();
        self.events.clear();
        self.report = BlockReport::default();

        for token in Lexer::new(payload) {
            self.apply(token);
        }

        let mut report = std::mem::take(&mut self.report);
        report.events = self.events.len();
        report.end_time = self.bank.end_time();

        ParsedBlock {
            events: std::mem::take(&mut self.events),
            report,
        }
    }

    /// Voice state as left by the last parsed block.
    pub fn voices(&self) -> &VoiceBank {
        &self.bank
    }

    fn apply(&mut self, token: Token) {
        match token {
            Token::Voice(v) => {
                if self.bank.select(v) {
                    self.report.voices_used.insert(self.bank.current_index());
                }
            }
            Token::Tempo(bpm) => {
                let bpm = clamp_tempo(bpm);
                self.bank.current_mut().tempo = bpm;
                self.report.tempos_seen.push(bpm);
            }
            Token::Octave(o) => self.bank.current_mut().octave = clamp_octave(o),
            Token::Length(l) => {
                // L0 means quarter notes, unlike a zero override on a note
                self.bank.current_mut().default_length = if l == 0 { 4 } else { l };
            }
            Token::OctaveDown => self.bank.current_mut().octave_down(),
            Token::OctaveUp => self.bank.current_mut().octave_up(),
            Token::Rest { length, dotted } => {
                let seconds = self.length_of(length, dotted);
                self.bank.current_mut().advance(seconds);
                self.report.voices_used.insert(self.bank.current_index());
            }
            Token::Note {
                class,
                accidental,
                length,
                dotted,
            } => {
                let seconds = self.length_of(length, dotted);
                let voice = self.bank.current_index();
                let state = self.bank.current_mut();
                let number = pitch(class, accidental, state.octave);
                let start = state.advance(seconds);
                let end = state.clock;

                self.events.push(Event::note_on(start, voice, number));
                self.events.push(Event::note_off(end, voice, number));
                self.report.intervals.push(Interval::new(start, end, voice));
                self.report.voices_used.insert(voice);
                self.report.notes += 1;
            }
        }
    }

    /// Seconds for an optional override, read against the current voice now.
    fn length_of(&self, length: Option<u32>, dotted: bool) -> f64 {
        let voice = self.bank.current();
        let denominator = match length {
            Some(l) if l > 0 => l,
            _ => voice.default_length,
        };
        NoteLength::new(denominator.max(1))
            .with_dot(dotted)
            .seconds(voice.tempo)
    }
}

/// Parse one payload with a throwaway parser.
pub fn parse_block(payload: &[u8]) -> ParsedBlock {
    NotationParser::new().parse_block(payload)
}
