use std::path::PathBuf;

use clap::Parser;
use emu8_core::constants::{DEFAULT_SPEED, FRAME_RATE};
use emu8_core::Config;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

mod run;

/// Run a Chip-8 ROM without a window, printing the final frame.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// The path to the ROM to execute.
    rom: PathBuf,

    /// Instructions executed per frame.
    #[arg(short, long, default_value_t = DEFAULT_SPEED)]
    speed: usize,

    /// Frames per second.
    #[arg(long, default_value_t = FRAME_RATE, value_parser = clap::value_parser!(u32).range(1..))]
    fps: u32,

    /// Stop after this many frames. Runs until the program fails otherwise.
    #[arg(short, long)]
    frames: Option<u64>,

    /// Keys typed, in order, each time the program waits for one.
    /// Uses the 1234/QWER/ASDF/ZXCV layout.
    #[arg(short, long, default_value = "")]
    keys: String,

    /// Seed for the random number generator, for reproducible runs.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .compact()
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_env_filter(filter)
        .init();

    let args = Args::parse();
    run::run(run::Options {
        rom: args.rom,
        config: Config {
            speed: args.speed,
            ..Config::default()
        },
        fps: args.fps,
        frames: args.frames,
        keys: args.keys,
        seed: args.seed,
    })
}
