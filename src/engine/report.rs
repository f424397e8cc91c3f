//! Human-readable diagnostics: one line per block and the end-of-run summary.
//!
//! Both go to a diagnostic writer (stderr in the binary), never into the
//! passthrough output.

use std::io::{self, Write};

use super::stats::Summary;
use crate::sequencing::BlockReport;

/// Rows in the ASCII polyphony profile
pub const HISTOGRAM_ROWS: usize = 20;

/// `[block 0] notes=5 events=10 duration=2.500s voices=[0] tempos=[120]`
pub fn block_line(report: &BlockReport) -> String {
    let voices = if report.voices_used.is_empty() {
        "[0]".to_string()
    } else {
        format!("{:?}", report.voices_used.iter().collect::<Vec<_>>())
    };
    let tempos = if report.tempos_seen.is_empty() {
        "(default)".to_string()
    } else {
        format!("{:?}", report.tempos_seen)
    };
    format!(
        "[block {}] notes={} events={} duration={:.3}s voices={} tempos={}",
        report.index,
        report.notes,
        report.events,
        report.duration(),
        voices,
        tempos
    )
}

/// Vertical bar chart of `histogram`, tallest bar scaled to `rows`.
///
/// Returns no lines when every bucket is empty.
pub fn histogram_rows(histogram: &[usize], rows: usize) -> Vec<String> {
    let max = histogram.iter().copied().max().unwrap_or(0);
    if max == 0 || rows == 0 {
        return Vec::new();
    }
    let scale = rows as f64 / max as f64;

    let mut lines: Vec<String> = (1..=rows)
        .rev()
        .map(|level| {
            histogram
                .iter()
                .map(|&h| if h as f64 * scale >= level as f64 { '#' } else { ' ' })
                .collect()
        })
        .collect();

    lines.push("-".repeat(histogram.len()));
    // Decade marks under every tenth column
    lines.push(
        (0..histogram.len())
            .map(|i| {
                if i % 10 == 0 {
                    char::from(b'0' + ((i / 10) % 10) as u8)
                } else {
                    ' '
                }
            })
            .collect(),
    );
    lines
}

/// Write the end-of-run summary block.
pub fn write_summary<W: Write>(out: &mut W, summary: &Summary) -> io::Result<()> {
    let voices = summary
        .voices
        .iter()
        .map(|v| format!("V{v}"))
        .collect::<Vec<_>>()
        .join(", ");

    writeln!(out)?;
    writeln!(out, "--- ANSI Music Summary ---")?;
    writeln!(out, "Blocks:     {}", summary.blocks)?;
    writeln!(out, "Notes:      {}", summary.notes)?;
    writeln!(out, "Events:     {}", summary.events)?;
    writeln!(out, "Duration:   {:.3} s", summary.duration)?;
    writeln!(
        out,
        "Voices:     {} declared ({})",
        summary.voices.len(),
        voices
    )?;
    writeln!(
        out,
        "Polyphony:  {:.3} avg | {} max",
        summary.polyphony.average, summary.polyphony.peak
    )?;
    writeln!(
        out,
        "Tempo:      {}\u{2013}{} bpm (avg {:.2})",
        summary.tempo.min, summary.tempo.max, summary.tempo.average
    )?;

    let rows = histogram_rows(&summary.polyphony.histogram, HISTOGRAM_ROWS);
    if !rows.is_empty() {
        writeln!(out, "Polyphony over time:")?;
        for row in rows {
            writeln!(out, "{row}")?;
        }
    }
    Ok(())
}
