//! amcat - pass ANSI art through to the terminal and play its music
//!
//! Run with: cargo run -- song.ans

mod cli;

use std::fs;
use std::io::{self, IsTerminal, Read, Write};

use clap::{error::ErrorKind, CommandFactory, Parser};
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use log::{error, info};

use amcat::{
    io::MidiExporter,
    synth::Patch,
    Scheduler, SchedulerConfig,
};
#[cfg(feature = "rtrb")]
use amcat::io::Player;

use cli::Args;

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();

    let level = if args.verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if args.test {
        return self_test(&args);
    }

    let data = read_input(&args)?;

    let config = SchedulerConfig {
        verbose: args.verbose,
        summary: args.summary,
        strict: args.strict,
        ..Default::default()
    };
    let mut scheduler = Scheduler::new(config);

    if !args.no_audio {
        match open_player(&args.patch) {
            Ok(player) => scheduler.add_sink(player),
            Err(err) => error!("playback disabled: {err:#}"),
        }
    }
    if let Some(path) = &args.midi {
        scheduler.add_sink(MidiExporter::new(path));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let stderr = io::stderr();
    let mut diag = stderr.lock();

    scheduler
        .process_stream(&data, &mut out, &mut diag)
        .wrap_err("failed while streaming input")?;
    out.flush()?;

    let finished = scheduler.finish();
    scheduler.summarize(&mut diag)?;
    finished.wrap_err("failed to finish output")?;
    Ok(())
}

fn read_input(args: &Args) -> EyreResult<Vec<u8>> {
    match &args.file {
        Some(path) => {
            fs::read(path).wrap_err_with(|| format!("failed to read {}", path.display()))
        }
        None => {
            let stdin = io::stdin();
            if stdin.is_terminal() {
                Args::command()
                    .error(
                        ErrorKind::MissingRequiredArgument,
                        "no input file given and standard input is a terminal",
                    )
                    .exit();
            }
            let mut data = Vec::new();
            stdin
                .lock()
                .read_to_end(&mut data)
                .wrap_err("failed to read standard input")?;
            Ok(data)
        }
    }
}

#[cfg(feature = "rtrb")]
fn open_player(patch: &str) -> EyreResult<Player> {
    let patch: Patch = patch.parse()?;
    let player = Player::open(patch)?;
    info!("playback on default output device with patch {}", player.patch());
    Ok(player)
}

#[cfg(not(feature = "rtrb"))]
fn open_player(patch: &str) -> EyreResult<NoPlayer> {
    let _: Patch = patch.parse()?;
    Err(eyre!("built without the rtrb feature"))
}

/// Stand-in sink type when playback is compiled out
#[cfg(not(feature = "rtrb"))]
struct NoPlayer;

#[cfg(not(feature = "rtrb"))]
impl amcat::EventSink for NoPlayer {
    fn name(&self) -> &str {
        "none"
    }

    fn accept_block(&mut self, _batch: &amcat::engine::BlockBatch<'_>) -> amcat::Result<()> {
        Ok(())
    }
}

fn self_test(args: &Args) -> EyreResult<()> {
    if args.no_audio {
        return Err(eyre!("--test needs audio; drop --no-audio"));
    }
    #[cfg(feature = "rtrb")]
    {
        let mut player = open_player(&args.patch).wrap_err("audio self-test failed")?;
        player.self_test()?;
        println!("audio self-test done");
        Ok(())
    }
    #[cfg(not(feature = "rtrb"))]
    {
        open_player(&args.patch).map(|_| ())
    }
}
