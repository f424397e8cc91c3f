/*
Notation Lexer
==============

Music payloads are short runs of single-letter commands with optional
numeric arguments:

  V<n>    select voice n (one or two digits, 0..15)
  T<n>    tempo in quarter notes per minute
  O<n>    octave
  L<n>    default note length (denominator)
  < >     octave down / up
  R[n][.] rest, optional length and dot (r works too)
  C[#+-][n][.]
          note A..G (either case), optional accidental, length, dot

Anything else is noise and is stepped over one byte at a time. There is no
error path: a `T` with no digits is not a token, so the `T` is skipped and
scanning resumes on the next byte.

Numbers saturate instead of overflowing; every consumer clamps anyway.
*/

use crate::sequencing::{Accidental, PitchClass};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Raw voice number; may be out of range (16..=99)
    Voice(u32),
    Tempo(u32),
    Octave(u32),
    Length(u32),
    OctaveDown,
    OctaveUp,
    Rest {
        length: Option<u32>,
        dotted: bool,
    },
    Note {
        class: PitchClass,
        accidental: Accidental,
        length: Option<u32>,
        dotted: bool,
    },
}

/// Iterator over the tokens of one payload
pub struct Lexer<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    /// Read up to `max_digits` decimal digits at the cursor.
    fn read_number(&mut self, max_digits: usize) -> Option<u32> {
        let start = self.pos;
        let mut value: u32 = 0;
        while self.pos - start < max_digits {
            match self.peek() {
                Some(b @ b'0'..=b'9') => {
                    value = value.saturating_mul(10).saturating_add((b - b'0') as u32);
                    self.pos += 1;
                }
                _ => break,
            }
        }
        (self.pos > start).then_some(value)
    }

    fn read_dot(&mut self) -> bool {
        if self.peek() == Some(b'.') {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn read_accidental(&mut self) -> Accidental {
        match self.peek().and_then(Accidental::from_byte) {
            Some(accidental) => {
                self.pos += 1;
                accidental
            }
            None => Accidental::Natural,
        }
    }

    /// Try to lex a token whose first byte has just been consumed.
    fn token_after(&mut self, lead: u8) -> Option<Token> {
        match lead {
            b'V' => self.read_number(2).map(Token::Voice),
            b'T' => self.read_number(usize::MAX).map(Token::Tempo),
            b'O' => self.read_number(usize::MAX).map(Token::Octave),
            b'L' => self.read_number(usize::MAX).map(Token::Length),
            b'<' => Some(Token::OctaveDown),
            b'>' => Some(Token::OctaveUp),
            b'R' | b'r' => {
                let length = self.read_number(usize::MAX);
                let dotted = self.read_dot();
                Some(Token::Rest { length, dotted })
            }
            _ => {
                let class = PitchClass::from_letter(lead)?;
                let accidental = self.read_accidental();
                let length = self.read_number(usize::MAX);
                let dotted = self.read_dot();
                Some(Token::Note {
                    class,
                    accidental,
                    length,
                    dotted,
                })
            }
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        while let Some(lead) = self.peek() {
            self.pos += 1;
            let resume = self.pos;
            if let Some(token) = self.token_after(lead) {
                return Some(token);
            }
            // Not a token: drop just the lead byte
            self.pos = resume;
        }
        None
    }
}

/// Tokenize a whole payload.
pub fn tokenize(bytes: &[u8]) -> Vec<Token> {
    Lexer::new(bytes).collect()
}
