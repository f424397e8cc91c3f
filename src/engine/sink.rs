use std::time::Instant;

use crate::error::Result;
use crate::sequencing::{BlockReport, Event};

/// One finished notation block, already on the global timeline
#[derive(Debug, Clone, Copy)]
pub struct BlockBatch<'a> {
    pub index: usize,
    /// Global time at which the block starts
    pub offset: f64,
    /// Wall-clock instant that global time zero maps to
    pub origin: Instant,
    /// The block's events in parse order, global times
    pub events: &'a [Event],
    pub report: &'a BlockReport,
}

/// Downstream consumer of parsed blocks (synthesis, export, tests).
///
/// A sink only ever sees complete blocks, in block order.
pub trait EventSink {
    /// Short label for log lines
    fn name(&self) -> &str;

    /// Tempo of the first block, given once before its batch.
    ///
    /// Default implementation ignores it.
    fn tempo_hint(&mut self, _bpm: u32) {}

    fn accept_block(&mut self, batch: &BlockBatch<'_>) -> Result<()>;

    /// End of stream. Default implementation does nothing.
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Allow borrowed sinks so callers can inspect them after the run
impl<S: EventSink + ?Sized> EventSink for &mut S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn tempo_hint(&mut self, bpm: u32) {
        (**self).tempo_hint(bpm)
    }

    fn accept_block(&mut self, batch: &BlockBatch<'_>) -> Result<()> {
        (**self).accept_block(batch)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Sink that keeps every batch in memory
#[derive(Debug, Default)]
pub struct EventLog {
    pub tempo_hints: Vec<u32>,
    /// (block index, offset, events)
    pub batches: Vec<(usize, f64, Vec<Event>)>,
    pub finished: bool,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event received so far, in arrival order.
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.batches.iter().flat_map(|(_, _, events)| events.iter())
    }
}

impl EventSink for EventLog {
    fn name(&self) -> &str {
        "log"
    }

    fn tempo_hint(&mut self, bpm: u32) {
        self.tempo_hints.push(bpm);
    }

    fn accept_block(&mut self, batch: &BlockBatch<'_>) -> Result<()> {
        self.batches
            .push((batch.index, batch.offset, batch.events.to_vec()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}
