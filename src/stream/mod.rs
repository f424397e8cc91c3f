//! Raw byte stream handling: splitting music blocks out of terminal output.

pub mod inspect;
pub mod segmenter;

pub use inspect::{hex_preview, suspicious_escapes, Suspicious};
pub use segmenter::{segments, Segment, Segments};
