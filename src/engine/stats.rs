/*
Polyphony Statistics
====================

Computed once over every note interval of the run, on the global timeline.

Sweep line
----------

Each interval contributes (start, +1) and (end, -1). Points are sorted by
time, and at equal times starts come before ends:

    note A  [0.0 ────── 1.0)
    note B         [1.0 ────── 2.0)
                    ^ A's end and B's start coincide; B is counted first,
                      so the active count briefly reads 2

This is the opposite tie-break from playback, which releases before it
strikes. Here the higher reading is wanted.

Walking the points keeps an active counter. Its maximum is peak polyphony;
its integral over time divided by the total duration is the average.

Histogram
---------

[0, duration) is cut into equal buckets, and each bucket counts the
intervals covering its midpoint (start <= mid < end).
*/

use std::cmp::Ordering;
use std::collections::BTreeSet;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::sequencing::{duration::DEFAULT_TEMPO, BlockReport, Interval};

/// Buckets in the polyphony-over-time profile
pub const DEFAULT_HISTOGRAM_BUCKETS: usize = 40;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyphony {
    pub peak: usize,
    pub average: f64,
    /// Notes sounding at each bucket midpoint; empty when there is nothing to show
    pub histogram: Vec<usize>,
}

impl Polyphony {
    pub fn analyze(intervals: &[Interval], duration: f64, buckets: usize) -> Self {
        let mut points: Vec<(f64, i32)> = Vec::with_capacity(intervals.len() * 2);
        for iv in intervals {
            points.push((iv.start, 1));
            points.push((iv.end, -1));
        }
        points.sort_by(sweep_order);

        let mut active: i64 = 0;
        let mut peak: i64 = 0;
        let mut area = 0.0;
        let mut last_t = points.first().map_or(0.0, |p| p.0);
        for &(t, delta) in &points {
            let dt = (t - last_t).max(0.0);
            area += active as f64 * dt;
            active += delta as i64;
            peak = peak.max(active);
            last_t = t;
        }

        let average = if duration > 0.0 { area / duration } else { 0.0 };

        Self {
            peak: peak as usize,
            average,
            histogram: histogram(intervals, duration, buckets),
        }
    }
}

fn histogram(intervals: &[Interval], duration: f64, buckets: usize) -> Vec<usize> {
    if duration <= 0.0 || intervals.is_empty() || buckets == 0 {
        return Vec::new();
    }
    let width = duration / buckets as f64;
    (0..buckets)
        .map(|i| {
            let mid = (i as f64 + 0.5) * width;
            intervals.iter().filter(|iv| iv.covers(mid)).count()
        })
        .collect()
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoStats {
    pub min: u32,
    pub max: u32,
    pub average: f64,
}

impl TempoStats {
    /// Falls back to the default tempo when no tempo was ever set.
    pub fn from_tempos(tempos: &[u32]) -> Self {
        if tempos.is_empty() {
            return Self {
                min: DEFAULT_TEMPO,
                max: DEFAULT_TEMPO,
                average: DEFAULT_TEMPO as f64,
            };
        }
        let min = tempos.iter().copied().min().unwrap_or(DEFAULT_TEMPO);
        let max = tempos.iter().copied().max().unwrap_or(DEFAULT_TEMPO);
        let sum: f64 = tempos.iter().map(|&t| t as f64).sum();
        Self {
            min,
            max,
            average: sum / tempos.len() as f64,
        }
    }
}

/// End-of-run totals
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub blocks: usize,
    pub notes: usize,
    pub events: usize,
    pub duration: f64,
    /// Union of per-block voices; a block that touched none counts as voice 0
    pub voices: BTreeSet<u8>,
    pub polyphony: Polyphony,
    pub tempo: TempoStats,
}

impl Summary {
    pub fn compute(
        reports: &[BlockReport],
        intervals: &[Interval],
        tempos: &[u32],
        duration: f64,
        buckets: usize,
    ) -> Self {
        let mut voices = BTreeSet::new();
        for report in reports {
            if report.voices_used.is_empty() {
                voices.insert(0);
            } else {
                voices.extend(report.voices_used.iter().copied());
            }
        }

        Self {
            blocks: reports.len(),
            notes: reports.iter().map(|r| r.notes).sum(),
            events: reports.iter().map(|r| r.events).sum(),
            duration,
            voices,
            polyphony: Polyphony::analyze(intervals, duration, buckets),
            tempo: TempoStats::from_tempos(tempos),
        }
    }
}

/// Time ascending; starts (+1) before ends (-1) at equal time.
fn sweep_order(a: &(f64, i32), b: &(f64, i32)) -> Ordering {
    a.0.total_cmp(&b.0).then_with(|| b.1.cmp(&a.1))
}
