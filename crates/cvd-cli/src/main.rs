//! cvd - dichromacy simulation on raw pixel buffers
//!
//! Reads interleaved 8-bit RGB/RGBA, writes the simulated pixels, and exposes
//! the constants and stages behind the transform for inspection.

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cvd")]
#[command(author, version, about = "Color-vision deficiency simulator")]
#[command(long_about = "
Re-renders sRGB images as seen with protanopia, deuteranopia or tritanopia.

Examples:
  cvd simulate -W 640 -H 480 -m protanopia < in.rgb > out.rgb
  cvd simulate -W 640 -H 480 -c 4 -i in.rgba -m tritanopia > out.rgba
  cvd pixel 255,0,0                      # All modes for one color
  cvd pixel 255,0,0 -m deuteranopia --stages
  cvd matrices --json
  cvd demo -m all
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a raw pixel buffer from a file or stdin, write it to stdout
    #[command(visible_alias = "s")]
    Simulate(SimulateArgs),

    /// Show how a single color is simulated
    #[command(visible_alias = "p")]
    Pixel(PixelArgs),

    /// Print the derived color-space matrices
    Matrices(MatricesArgs),

    /// Run a viewer session over synthetic color bars
    Demo(DemoArgs),
}

#[derive(Args)]
struct SimulateArgs {
    /// Image width in pixels
    #[arg(short = 'W', long)]
    width: u32,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: u32,

    /// Channels per pixel: 3 (RGB) or 4 (RGBA)
    #[arg(short, long, default_value = "3")]
    channels: usize,

    /// original, protanopia, deuteranopia or tritanopia
    #[arg(short, long, default_value = "original")]
    mode: String,

    /// Raw input file (default: stdin)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[derive(Args)]
struct PixelArgs {
    /// sRGB color as R,G,B (0-255 each)
    #[arg(value_parser = commands::pixel::parse_rgb)]
    color: [u8; 3],

    /// Selector name, or "all"
    #[arg(short, long, default_value = "all")]
    mode: String,

    /// Print the value after every pipeline stage
    #[arg(long)]
    stages: bool,
}

#[derive(Args)]
struct MatricesArgs {
    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct DemoArgs {
    /// Capture region width
    #[arg(short = 'W', long, default_value = "640")]
    width: u32,

    /// Capture region height
    #[arg(short = 'H', long, default_value = "360")]
    height: u32,

    /// Selector name, or "all"
    #[arg(short, long, default_value = "all")]
    mode: String,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // stdout carries pixel data; logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Pixel(args) => commands::pixel::run(args),
        Commands::Matrices(args) => commands::matrices::run(args),
        Commands::Demo(args) => commands::demo::run(args),
    }
}
