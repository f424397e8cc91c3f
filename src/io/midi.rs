/*
Standard MIDI File export
=========================

One track per notation voice (16 tracks, format 1), 480 ticks per beat.
The file carries a single tempo, taken from the first block's first tempo
token (120 bpm when there is none), written at tick 0 on every track.

Seconds map to ticks at that tempo:

    ticks = round(seconds * 480 * bpm / 60)

Events arrive block by block with absolute times; each track remembers the
tick of its last event and stores deltas. Nothing touches the disk until
`finish`.
*/

use std::path::{Path, PathBuf};

use log::info;
use midly::{Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind};

use crate::engine::sink::{BlockBatch, EventSink};
use crate::error::{AmcatError, Result};
use crate::sequencing::{
    duration::DEFAULT_TEMPO,
    event::{sort_for_playback, VOICE_COUNT},
    EventKind,
};

pub const TICKS_PER_BEAT: u16 = 480;

/// Seconds to ticks at `bpm`, never negative.
pub fn seconds_to_ticks(seconds: f64, bpm: u32) -> u32 {
    let ticks = (seconds * TICKS_PER_BEAT as f64 * bpm as f64 / 60.0).round();
    ticks.max(0.0) as u32
}

/// Microseconds per quarter note
pub fn tempo_micros(bpm: u32) -> u32 {
    60_000_000 / bpm.max(1)
}

#[derive(Debug, Default)]
struct TrackBuffer {
    events: Vec<TrackEvent<'static>>,
    last_tick: u32,
}

pub struct MidiExporter {
    path: PathBuf,
    bpm: u32,
    tracks: Vec<TrackBuffer>,
}

impl MidiExporter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            bpm: DEFAULT_TEMPO,
            tracks: (0..VOICE_COUNT).map(|_| TrackBuffer::default()).collect(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Assemble the file as it would be written now.
    pub fn to_smf(&self) -> Smf<'static> {
        let tempo = TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::Tempo(tempo_micros(self.bpm).into())),
        };
        let end = TrackEvent {
            delta: 0.into(),
            kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
        };

        let tracks = self
            .tracks
            .iter()
            .map(|track| {
                let mut events = Vec::with_capacity(track.events.len() + 2);
                events.push(tempo);
                events.extend(track.events.iter().copied());
                events.push(end);
                events
            })
            .collect();

        Smf {
            header: Header::new(Format::Parallel, Timing::Metrical(TICKS_PER_BEAT.into())),
            tracks,
        }
    }
}

impl EventSink for MidiExporter {
    fn name(&self) -> &str {
        "midi"
    }

    fn tempo_hint(&mut self, bpm: u32) {
        self.bpm = bpm.max(1);
    }

    fn accept_block(&mut self, batch: &BlockBatch<'_>) -> Result<()> {
        let mut events = batch.events.to_vec();
        sort_for_playback(&mut events);

        for event in &events {
            let voice = event.voice as usize % VOICE_COUNT;
            let track = &mut self.tracks[voice];
            let tick = seconds_to_ticks(event.time, self.bpm);
            let delta = tick.saturating_sub(track.last_tick);
            track.last_tick = track.last_tick.max(tick);

            let key = event.pitch.min(127).into();
            let message = match event.kind {
                EventKind::NoteOn => MidiMessage::NoteOn {
                    key,
                    vel: event.velocity.clamp(1, 127).into(),
                },
                EventKind::NoteOff => MidiMessage::NoteOff { key, vel: 0.into() },
            };
            track.events.push(TrackEvent {
                delta: delta.into(),
                kind: TrackEventKind::Midi {
                    channel: (voice as u8).into(),
                    message,
                },
            });
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.to_smf()
            .save(&self.path)
            .map_err(|e| AmcatError::MidiWrite(format!("{}: {}", self.path.display(), e)))?;
        info!("[midi] wrote {}", self.path.display());
        Ok(())
    }
}
