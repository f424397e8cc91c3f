/*
Live playback
=============

    scheduler thread                         audio callback
    ────────────────                         ──────────────
    accept_block
      sort (time, off before on)
      sleep until origin + t      rtrb       PolySynth::render_block
      push SynthMessage ───────────────────▶ drain, mix, copy to channels

Pacing happens on the calling thread against the wall-clock origin the
scheduler took at the start of the run. A block is only paced once it has
been fully parsed, so a long block can start late; later events are still
due at origin + t and catch up.

Events within GROUP_EPSILON of the first event in a group go out together,
so chords are not smeared by sleep jitter.
*/

use std::thread;
use std::time::{Duration, Instant};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{error, info, warn};
use rtrb::{Producer, PushError, RingBuffer};

use super::converter::event_to_synth;
use crate::engine::sink::{BlockBatch, EventSink};
use crate::error::{AmcatError, Result};
use crate::sequencing::event::{sort_for_playback, Event};
use crate::synth::poly::DEFAULT_POLYPHONY;
use crate::synth::{Patch, PolySynth, SynthMessage, MAX_BLOCK_SIZE};

/// Events closer than this to a group's first event are sent with it
pub const GROUP_EPSILON: f64 = 1e-4;

const QUEUE_CAPACITY: usize = 1024;
const PUSH_RETRIES: u32 = 200;

/// Slices of `events` (already sorted) that share a due time.
pub fn chord_groups(events: &[Event]) -> Vec<&[Event]> {
    let mut groups = Vec::new();
    let mut start = 0;
    while start < events.len() {
        let head = events[start].time;
        let len = events[start..]
            .iter()
            .take_while(|e| e.time - head <= GROUP_EPSILON)
            .count();
        groups.push(&events[start..start + len]);
        start += len;
    }
    groups
}

pub struct Player {
    tx: Producer<SynthMessage>,
    _stream: cpal::Stream,
    patch: Patch,
    /// Wall-clock instant of the last event sent
    last_due: Option<Instant>,
    dropped: usize,
}

impl Player {
    /// Open the default output device and start rendering silence.
    pub fn open(patch: Patch) -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| AmcatError::AudioDevice("no default output device".into()))?;
        let config = device
            .default_output_config()
            .map_err(|e| AmcatError::AudioDevice(e.to_string()))?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;
        info!(
            "audio: {} Hz, {} channels, patch {}",
            sample_rate, channels, patch
        );

        let (tx, rx) = RingBuffer::<SynthMessage>::new(QUEUE_CAPACITY);
        let mut synth = PolySynth::new(sample_rate, DEFAULT_POLYPHONY, patch, rx);
        let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

        let stream = device
            .build_output_stream(
                &config.into(),
                move |data: &mut [f32], _| {
                    let total_frames = data.len() / channels.max(1);
                    let mut frames_written = 0;

                    while frames_written < total_frames {
                        let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                        let block = &mut render_buf[..frames];
                        synth.render_block(block);

                        // Mono to every channel
                        let out_off = frames_written * channels;
                        for (i, &s) in block.iter().enumerate() {
                            for ch in 0..channels {
                                data[out_off + i * channels + ch] = s;
                            }
                        }
                        frames_written += frames;
                    }
                },
                |err| error!("audio stream error: {}", err),
                None,
            )
            .map_err(|e| AmcatError::AudioStream(e.to_string()))?;

        stream
            .play()
            .map_err(|e| AmcatError::AudioStream(e.to_string()))?;

        Ok(Self {
            tx,
            _stream: stream,
            patch,
            last_due: None,
            dropped: 0,
        })
    }

    pub fn patch(&self) -> &Patch {
        &self.patch
    }

    /// Play a short C major chord on voices 0 to 2.
    pub fn self_test(&mut self) -> Result<()> {
        let chord = [(0, 60), (1, 64), (2, 67)];
        for (channel, note) in chord {
            self.send(SynthMessage::NoteOn {
                channel,
                note,
                velocity: 95,
            });
        }
        thread::sleep(Duration::from_millis(250));
        for (channel, note) in chord {
            self.send(SynthMessage::NoteOff { channel, note });
        }
        self.wait_for_tail();
        Ok(())
    }

    /// Push with a bounded wait for the audio thread to drain the queue.
    fn send(&mut self, msg: SynthMessage) {
        let mut msg = msg;
        for _ in 0..PUSH_RETRIES {
            match self.tx.push(msg) {
                Ok(()) => return,
                Err(PushError::Full(back)) => {
                    msg = back;
                    thread::sleep(Duration::from_millis(1));
                }
            }
        }
        self.dropped += 1;
        warn!("audio queue full, dropped {:?}", msg);
    }

    fn wait_for_tail(&self) {
        thread::sleep(Duration::from_secs_f32(self.patch.release.max(0.0)) + Duration::from_millis(50));
    }
}

impl EventSink for Player {
    fn name(&self) -> &str {
        "playback"
    }

    fn accept_block(&mut self, batch: &BlockBatch<'_>) -> Result<()> {
        let mut events = batch.events.to_vec();
        sort_for_playback(&mut events);

        for group in chord_groups(&events) {
            let due = batch.origin + Duration::from_secs_f64(group[0].time.max(0.0));
            let now = Instant::now();
            if due > now {
                thread::sleep(due - now);
            }
            for event in group {
                self.send(event_to_synth(event));
            }
            self.last_due = Some(due);
        }
        Ok(())
    }

    /// Let the last notes ring out, then silence everything.
    fn finish(&mut self) -> Result<()> {
        if let Some(due) = self.last_due {
            let now = Instant::now();
            if due > now {
                thread::sleep(due - now);
            }
        }
        self.send(SynthMessage::AllNotesOff);
        self.wait_for_tail();
        if self.dropped > 0 {
            warn!("{} playback messages dropped", self.dropped);
        }
        Ok(())
    }
}
