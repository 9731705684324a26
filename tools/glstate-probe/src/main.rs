//! GL state probe - measure how much device traffic the state cache saves
//!
//! # Commands
//!
//! - `glstate-probe run` - replay a canned frame sequence and report calls per frame
//! - `glstate-probe init` - write a default cache config to edit
//!
//! # Usage
//!
//! ```bash
//! # Desktop defaults, 8 frames
//! glstate-probe run
//!
//! # GLES-style device from a config file, with every device call logged
//! glstate-probe run --config gles.toml --frames 3 --trace
//! ```

mod frames;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glstate_core::{CacheConfig, DeviceCaps, RecordingDevice, StateCache, TracedDevice};

/// GL state probe - replay frames through the state cache
#[derive(Parser)]
#[command(name = "glstate-probe")]
#[command(about = "Replay frames through the GL state cache and count device calls")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay the canned frame sequence
    Run(RunArgs),

    /// Write a default config file
    Init(InitArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Cache config (TOML); desktop defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to replay
    #[arg(short, long, default_value_t = 8)]
    frames: u32,

    /// Log every device call (same as RUST_LOG=glstate::device=trace)
    #[arg(long)]
    trace: bool,

    /// Force the device to the default state before the first frame
    #[arg(long)]
    sync: bool,
}

#[derive(Args)]
struct InitArgs {
    /// Output path
    #[arg(default_value = "glstate.toml")]
    output: PathBuf,

    /// Write GLES capabilities instead of desktop
    #[arg(long)]
    gles: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let trace = matches!(&cli.command, Commands::Run(args) if args.trace);
    let default_filter = if trace {
        "info,glstate::device=trace"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Run(args) => run(args),
        Commands::Init(args) => init(args),
    }
}

fn run(args: RunArgs) -> Result<()> {
    let config = match &args.config {
        Some(path) => CacheConfig::load(path)
            .with_context(|| format!("loading cache config {}", path.display()))?,
        None => CacheConfig::default(),
    };
    tracing::info!(
        allow_shadow = config.device.allow_shadow,
        logic_op = config.device.logic_op,
        max_clip_distances = config.device.max_clip_distances,
        "device capabilities"
    );

    let device = TracedDevice::new(RecordingDevice::new());
    let mut cache = if args.sync {
        StateCache::with_sync(device, config)
    } else {
        StateCache::new(device, config)
    };

    let mut scene = frames::Scene::new();
    println!("{:>5}  {:>7}  {:>7}  {:>6}", "frame", "issued", "skipped", "saved");
    for frame in 0..args.frames {
        cache.reset_stats();
        cache.device_mut().inner_mut().clear();

        scene.render(&mut cache, frame)?;

        let stats = cache.stats();
        println!(
            "{:>5}  {:>7}  {:>7}  {:>5.1}%",
            frame,
            stats.calls_issued,
            stats.calls_skipped,
            stats.skip_ratio() * 100.0
        );
    }

    Ok(())
}

fn init(args: InitArgs) -> Result<()> {
    let caps = if args.gles {
        DeviceCaps::gles()
    } else {
        DeviceCaps::desktop()
    };
    CacheConfig::with_caps(caps)
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    println!("Wrote {}", args.output.display());
    Ok(())
}
