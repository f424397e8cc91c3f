use std::cmp::Ordering;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of independent voices in a notation block.
pub const VOICE_COUNT: usize = 16;
/// Velocity given to every note-on.
pub const NOTE_ON_VELOCITY: u8 = 100;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    NoteOn,
    NoteOff,
}

/// A timed note-on or note-off on one voice
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Event {
    /// Seconds; block-local until the scheduler translates it
    pub time: f64,
    pub kind: EventKind,
    /// Voice index 0..16
    pub voice: u8,
    /// MIDI-style note number
    pub pitch: u8,
    /// 100 for note-on, 0 for note-off
    pub velocity: u8,
}

impl Event {
    pub fn note_on(time: f64, voice: u8, pitch: u8) -> Self {
        Self {
            time,
            kind: EventKind::NoteOn,
            voice,
            pitch,
            velocity: NOTE_ON_VELOCITY,
        }
    }

    pub fn note_off(time: f64, voice: u8, pitch: u8) -> Self {
        Self {
            time,
            kind: EventKind::NoteOff,
            voice,
            pitch,
            velocity: 0,
        }
    }

    /// Same event shifted by `offset` seconds.
    pub fn translated(&self, offset: f64) -> Self {
        Self {
            time: self.time + offset,
            ..*self
        }
    }

    pub fn is_note_on(&self) -> bool {
        self.kind == EventKind::NoteOn
    }
}

/// Delivery order for anything that sounds or serializes notes.
///
/// Ascending time; at equal time note-offs come first so a repeated pitch is
/// released before it is struck again.
pub fn playback_order(a: &Event, b: &Event) -> Ordering {
    a.time
        .total_cmp(&b.time)
        .then_with(|| rank(a.kind).cmp(&rank(b.kind)))
}

fn rank(kind: EventKind) -> u8 {
    match kind {
        EventKind::NoteOff => 0,
        EventKind::NoteOn => 1,
    }
}

/// Sort a batch into `playback_order`. Stable, so simultaneous events keep
/// their parse order within each kind.
pub fn sort_for_playback(events: &mut [Event]) {
    events.sort_by(playback_order);
}

/// Span of one parsed note, used for polyphony analysis
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub start: f64,
    pub end: f64,
    pub voice: u8,
}

impl Interval {
    pub fn new(start: f64, end: f64, voice: u8) -> Self {
        Self { start, end, voice }
    }

    pub fn translated(&self, offset: f64) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
            voice: self.voice,
        }
    }

    /// Half-open cover test: `start <= t < end`
    pub fn covers(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}

/// What one notation block did
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BlockReport {
    pub index: usize,
    pub events: usize,
    pub notes: usize,
    /// Global start; zero until the scheduler places the block
    pub start_time: f64,
    /// Global end; block-local until the scheduler places the block
    pub end_time: f64,
    pub voices_used: BTreeSet<u8>,
    /// Every explicit tempo applied, in order
    pub tempos_seen: Vec<u32>,
    /// Block-local note spans
    pub intervals: Vec<Interval>,
}

impl BlockReport {
    pub fn duration(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Move the report onto the global timeline.
    pub fn place(&mut self, index: usize, offset: f64) {
        self.index = index;
        self.start_time = offset;
        self.end_time += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_off_sorts_before_note_on_at_same_time() {
        let mut events = vec![
            Event::note_on(1.0, 0, 60),
            Event::note_off(1.0, 0, 60),
            Event::note_on(0.0, 0, 60),
        ];
        sort_for_playback(&mut events);

        assert_eq!(events[0].time, 0.0);
        assert_eq!(events[1].kind, EventKind::NoteOff);
        assert_eq!(events[2].kind, EventKind::NoteOn);
        assert_eq!(events[2].time, 1.0);
    }

    #[test]
    fn test_velocities() {
        assert_eq!(Event::note_on(0.0, 3, 60).velocity, 100);
        assert_eq!(Event::note_off(0.0, 3, 60).velocity, 0);
    }

    #[test]
    fn test_translation_keeps_everything_but_time() {
        let e = Event::note_on(0.25, 5, 72).translated(2.0);
        assert_eq!(e.time, 2.25);
        assert_eq!(e.voice, 5);
        assert_eq!(e.pitch, 72);

        let iv = Interval::new(0.0, 0.5, 1).translated(1.5);
        assert_eq!((iv.start, iv.end, iv.voice), (1.5, 2.0, 1));
    }

    #[test]
    fn test_interval_cover_is_half_open() {
        let iv = Interval::new(1.0, 2.0, 0);
        assert!(iv.covers(1.0));
        assert!(iv.covers(1.999));
        assert!(!iv.covers(2.0));
        assert!(!iv.covers(0.5));
    }

    #[test]
    fn test_place_report() {
        let mut report = BlockReport {
            end_time: 2.5,
            ..Default::default()
        };
        report.place(3, 4.0);
        assert_eq!(report.index, 3);
        assert_eq!(report.start_time, 4.0);
        assert_eq!(report.end_time, 6.5);
        assert_eq!(report.duration(), 2.5);
    }
}
