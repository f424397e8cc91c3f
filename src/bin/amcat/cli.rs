use std::path::PathBuf;

use clap::Parser;

/// Cat a file to the terminal, playing any ANSI music it contains.
#[derive(Parser, Debug, Default)]
#[command(name = "amcat", version, about, long_about = None)]
pub struct Args {
    /// Input file; standard input when omitted
    pub file: Option<PathBuf>,

    /// Built-in instrument for playback (piano, organ, lead, chip, pad)
    #[arg(short, long, default_value = "piano")]
    pub patch: String,

    /// Do not open an audio device
    #[arg(long)]
    pub no_audio: bool,

    /// Also write the music to a Standard MIDI File
    #[arg(short, long, value_name = "PATH")]
    pub midi: Option<PathBuf>,

    /// One diagnostic line per music block on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Print totals and a polyphony profile on stderr at the end
    #[arg(short, long)]
    pub summary: bool,

    /// Warn about malformed escape sequences in the passthrough text
    #[arg(long)]
    pub strict: bool,

    /// Play a short test chord and exit
    #[arg(long)]
    pub test: bool,
}
