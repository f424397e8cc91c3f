/*
Stream Segmentation
===================

An ANSI music stream is ordinary terminal output with music blocks spliced
in. A block opens with an "enter music mode" CSI sequence and runs until the
next escape byte:

    ...plain bytes... ESC [ M F  T120 L4 CDEFG  ESC [0m ...plain bytes...
                      \_______/  \____________/ \_____
                       marker       payload      back to passthrough

Marker shape: ESC `[`, zero or more parameter groups (digits, `;`, `?`
followed by a letter), a literal `M`, an optional `F`, then any whitespace.
The marker bytes themselves are consumed and never re-emitted.

Scanning is two independent linear searches over the same borrowed buffer:

  1. find the next marker at or after the cursor
  2. from the marker's end, find the next ESC byte (or end of buffer)

Everything between the cursor and a marker is passthrough. The cursor then
moves to that ESC byte, not past it, so a closing sequence such as `ESC[0m`
is handed back to the terminal verbatim.

No bytes are copied; every segment borrows from the input.
*/

use once_cell::sync::Lazy;
use regex::bytes::Regex;

/// Escape introducer
pub const ESC: u8 = 0x1b;

static MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)\x1b\[(?:[0-9;?]*[A-Za-z])*MF?\s*").expect("marker pattern is valid")
});

/// One stretch of the input stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Bytes to forward untouched
    Passthrough { offset: usize, bytes: &'a [u8] },
    /// Notation bytes following a marker
    Payload { offset: usize, bytes: &'a [u8] },
}

impl<'a> Segment<'a> {
    pub fn bytes(&self) -> &'a [u8] {
        match self {
            Segment::Passthrough { bytes, .. } | Segment::Payload { bytes, .. } => bytes,
        }
    }

    pub fn offset(&self) -> usize {
        match self {
            Segment::Passthrough { offset, .. } | Segment::Payload { offset, .. } => *offset,
        }
    }

    pub fn is_payload(&self) -> bool {
        matches!(self, Segment::Payload { .. })
    }
}

/// Lazy segment iterator; restart by calling `segments` again.
pub struct Segments<'a> {
    data: &'a [u8],
    cursor: usize,
    /// Payload waiting behind a passthrough segment
    pending: Option<Segment<'a>>,
}

impl<'a> Segments<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            cursor: 0,
            pending: None,
        }
    }

    fn next_escape(&self, from: usize) -> usize {
        self.data[from..]
            .iter()
            .position(|&b| b == ESC)
            .map_or(self.data.len(), |i| from + i)
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Segment<'a>> {
        if let Some(segment) = self.pending.take() {
            return Some(segment);
        }
        if self.cursor >= self.data.len() {
            return None;
        }

        let Some(marker) = MARKER.find_at(self.data, self.cursor) else {
            let rest = Segment::Passthrough {
                offset: self.cursor,
                bytes: &self.data[self.cursor..],
            };
            self.cursor = self.data.len();
            return Some(rest);
        };

        let payload_start = marker.end();
        let payload_end = self.next_escape(payload_start);
        let payload = Segment::Payload {
            offset: payload_start,
            bytes: &self.data[payload_start..payload_end],
        };

        let before = self.cursor;
        self.cursor = payload_end;

        if marker.start() > before {
            self.pending = Some(payload);
            Some(Segment::Passthrough {
                offset: before,
                bytes: &self.data[before..marker.start()],
            })
        } else {
            Some(payload)
        }
    }
}

/// Split `data` into passthrough and payload segments, in stream order.
pub fn segments(data: &[u8]) -> Segments<'_> {
    Segments::new(data)
}
