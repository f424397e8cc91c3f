//! Strict-mode checks on passthrough bytes.
//!
//! Passthrough is never altered; this only points at escape sequences a
//! terminal is likely to choke on, such as a truncated CSI or a music marker
//! that was mangled badly enough not to be recognized.

use super::segmenter::ESC;

/// Bytes shown in a hex preview
pub const PREVIEW_LEN: usize = 8;

/// An escape sequence that does not look like well-formed CSI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suspicious {
    /// Absolute stream offset of the ESC byte
    pub offset: usize,
    /// Hex dump of the first bytes starting at the ESC
    pub preview: String,
}

/// Space-separated uppercase hex of at most `max_len` bytes.
pub fn hex_preview(bytes: &[u8], max_len: usize) -> String {
    bytes
        .iter()
        .take(max_len)
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Length of a complete CSI sequence at the start of `bytes`, if any.
///
/// `bytes[0]` must be ESC. Shape: ESC `[` parameters (0x30..=0x3F)
/// intermediates (0x20..=0x2F) final (0x40..=0x7E).
fn csi_len(bytes: &[u8]) -> Option<usize> {
    if bytes.get(1) != Some(&b'[') {
        return None;
    }
    let mut i = 2;
    while matches!(bytes.get(i), Some(0x30..=0x3f)) {
        i += 1;
    }
    while matches!(bytes.get(i), Some(0x20..=0x2f)) {
        i += 1;
    }
    match bytes.get(i) {
        Some(0x40..=0x7e) => Some(i + 1),
        _ => None,
    }
}

/// Two-byte escapes (ESC followed by a printable byte other than `[`).
fn is_short_escape(bytes: &[u8]) -> bool {
    matches!(bytes.get(1), Some(&b) if (0x20..=0x7e).contains(&b) && b != b'[')
}

/// Scan one passthrough segment that starts at stream offset `base`.
pub fn suspicious_escapes(bytes: &[u8], base: usize) -> Vec<Suspicious> {
    let mut found = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] != ESC {
            i += 1;
            continue;
        }
        let rest = &bytes[i..];
        if let Some(len) = csi_len(rest) {
            i += len;
        } else if is_short_escape(rest) {
            i += 2;
        } else {
            found.push(Suspicious {
                offset: base + i,
                preview: hex_preview(rest, PREVIEW_LEN),
            });
            i += 1;
        }
    }
    found
}
