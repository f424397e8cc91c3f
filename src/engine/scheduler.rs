/*
Timeline Scheduler
==================

Drives the segmenter over a whole stream and lays notation blocks end to
end on one global timeline.

    stream:  text ── block 0 ── text ── block 1 ── block 2 ── text
                        │                  │          │
    global:  0 ─────── [0, e0) ────────── [e0, e1) ── [e1, e2)

Blocks run strictly one after another: block i+1 starts exactly where
block i ended. Inside a block every voice starts at block-local zero, so
voices within one block run concurrently.

For each payload:

  1. parse with fresh voice state
  2. place the report at the current offset
  3. shift events and intervals onto the global timeline
  4. advance the offset to the block's end
  5. hand the shifted events to every sink

Passthrough bytes are written as soon as they are found, in stream order,
never batched. Sinks only see a block after it has been parsed completely.
*/

use std::io::Write;
use std::time::Instant;

use log::{debug, warn};

use super::report::{block_line, write_summary};
use super::sink::{BlockBatch, EventSink};
use super::stats::{Summary, DEFAULT_HISTOGRAM_BUCKETS};
use crate::error::{AmcatError, Result};
use crate::notation::NotationParser;
use crate::sequencing::{duration::DEFAULT_TEMPO, BlockReport, Event, Interval};
use crate::stream::{inspect::suspicious_escapes, segments, Segment};

/// Scheduler options
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Write one diagnostic line per block
    pub verbose: bool,
    /// Write the end-of-run summary
    pub summary: bool,
    /// Warn about malformed escape sequences in passthrough
    pub strict: bool,
    /// Buckets in the polyphony profile
    pub histogram_buckets: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            summary: false,
            strict: false,
            histogram_buckets: DEFAULT_HISTOGRAM_BUCKETS,
        }
    }
}

pub struct Scheduler<'a> {
    config: SchedulerConfig,
    parser: NotationParser,
    sinks: Vec<Box<dyn EventSink + 'a>>,
    /// End of the last placed block
    global_offset: f64,
    reports: Vec<BlockReport>,
    intervals: Vec<Interval>,
    tempos: Vec<u32>,
    origin: Instant,
}

impl<'a> Scheduler<'a> {
    pub fn new(config: SchedulerConfig) -> Self {
        Self {
            config,
            parser: NotationParser::new(),
            sinks: Vec::new(),
            global_offset: 0.0,
            reports: Vec::new(),
            intervals: Vec::new(),
            tempos: Vec::new(),
            origin: Instant::now(),
        }
    }

    /// Register a downstream consumer; sinks are fed in registration order.
    pub fn add_sink<S: EventSink + 'a>(&mut self, sink: S) {
        self.sinks.push(Box::new(sink));
    }

    pub fn with_sink<S: EventSink + 'a>(mut self, sink: S) -> Self {
        self.add_sink(sink);
        self
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Process a whole stream: passthrough to `out`, diagnostics to `diag`.
    ///
    /// Wall-clock origin for playback is taken when this is called.
    pub fn process_stream<W: Write, D: Write>(
        &mut self,
        data: &[u8],
        out: &mut W,
        diag: &mut D,
    ) -> Result<()> {
        self.origin = Instant::now();
        let verbose = self.config.verbose;
        let strict = self.config.strict;

        for segment in segments(data) {
            match segment {
                Segment::Passthrough { offset, bytes } => {
                    if strict {
                        for s in suspicious_escapes(bytes, offset) {
                            warn!("suspicious escape at byte {}: {}", s.offset, s.preview);
                        }
                    }
                    out.write_all(bytes)?;
                    out.flush()?;
                }
                Segment::Payload { bytes, .. } => {
                    let report = self.process_block(bytes);
                    if verbose {
                        writeln!(diag, "{}", block_line(report))?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Parse one payload, place it on the timeline and dispatch it.
    pub fn process_block(&mut self, payload: &[u8]) -> &BlockReport {
        let index = self.reports.len();
        let parsed = self.parser.parse_block(payload);
        let offset = self.global_offset;

        let mut report = parsed.report;
        report.place(index, offset);

        let events: Vec<Event> = parsed.events.iter().map(|e| e.translated(offset)).collect();
        self.intervals
            .extend(report.intervals.iter().map(|iv| iv.translated(offset)));
        self.tempos.extend_from_slice(&report.tempos_seen);
        self.global_offset = report.end_time;

        debug!(
            "block {} placed at {:.3}s..{:.3}s with {} events",
            index,
            report.start_time,
            report.end_time,
            events.len()
        );

        if index == 0 {
            let bpm = report.tempos_seen.first().copied().unwrap_or(DEFAULT_TEMPO);
            for sink in &mut self.sinks {
                sink.tempo_hint(bpm);
            }
        }

        let batch = BlockBatch {
            index,
            offset,
            origin: self.origin,
            events: &events,
            report: &report,
        };
        for sink in &mut self.sinks {
            if let Err(err) = sink.accept_block(&batch) {
                warn!("{} rejected block {}: {}", sink.name(), index, err);
            }
        }

        self.reports.push(report);
        &self.reports[index]
    }

    /// Close every sink; returns the first failure after trying them all.
    pub fn finish(&mut self) -> Result<()> {
        let mut first: Option<AmcatError> = None;
        for sink in &mut self.sinks {
            if let Err(err) = sink.finish() {
                warn!("{} failed to finish: {}", sink.name(), err);
                first.get_or_insert(err);
            }
        }
        match first {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Totals over everything processed so far.
    pub fn summary(&self) -> Summary {
        Summary::compute(
            &self.reports,
            &self.intervals,
            &self.tempos,
            self.global_offset,
            self.config.histogram_buckets,
        )
    }

    /// Write the summary to `diag` if enabled.
    pub fn summarize<D: Write>(&self, diag: &mut D) -> Result<()> {
        if self.config.summary {
            write_summary(diag, &self.summary())?;
        }
        Ok(())
    }

    pub fn global_offset(&self) -> f64 {
        self.global_offset
    }

    pub fn reports(&self) -> &[BlockReport] {
        &self.reports
    }

    /// Every note span so far, global times
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Every explicit tempo so far, in order
    pub fn tempos(&self) -> &[u32] {
        &self.tempos
    }
}
