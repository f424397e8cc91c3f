//! The music notation carried inside ANSI music blocks.
//!
//! - `lexer`: bytes to tokens, skipping anything unrecognized
//! - `voice`: per-voice defaults and clocks for one block
//! - `parser`: tokens applied to voices, producing timed events

pub mod lexer;
pub mod parser;
pub mod voice;

pub use lexer::{Lexer, Token};
pub use parser::{parse_block, NotationParser, ParsedBlock};
pub use voice::{VoiceBank, VoiceState};
