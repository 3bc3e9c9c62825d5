// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use framecam::backends::camera::types::DevicePosition;
use framecam::flash::FlashMode;
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "framecam")]
#[command(about = "Camera capture tool that composites a decorative frame onto photos")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List available cameras
    List,

    /// Take a photo with the decorative frame composited on
    Photo {
        /// Camera to use (front or back); defaults to the configured one
        #[arg(short, long, value_parser = parse_position)]
        camera: Option<DevicePosition>,

        /// Skip the frame overlay
        #[arg(long)]
        no_overlay: bool,

        /// Flash mode (off, auto, on)
        #[arg(short, long, default_value = "auto", value_parser = parse_flash)]
        flash: FlashMode,

        /// Output directory (default: ~/Pictures/framecam)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Open the saved photo in the system viewer
        #[arg(long)]
        open: bool,
    },

    /// Run the capture session and report frame statistics
    Preview {
        /// Camera to use (front or back)
        #[arg(short, long, value_parser = parse_position)]
        camera: Option<DevicePosition>,

        /// Preview duration in seconds
        #[arg(short, long, default_value = "5")]
        seconds: u64,
    },

    /// Show the most recently saved photo
    Latest {
        /// Open it in the system viewer
        #[arg(long)]
        open: bool,
    },
}

fn parse_position(s: &str) -> Result<DevicePosition, String> {
    match s.to_lowercase().as_str() {
        "back" | "rear" | "main" => Ok(DevicePosition::Back),
        "front" | "selfie" => Ok(DevicePosition::Front),
        other => Err(format!("Unknown camera position: {}", other)),
    }
}

fn parse_flash(s: &str) -> Result<FlashMode, String> {
    s.parse()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=framecam=debug, RUST_LOG=info
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_level(true)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => cli::list_cameras(),
        Commands::Photo {
            camera,
            no_overlay,
            flash,
            output,
            open,
        } => cli::take_photo(camera, no_overlay, flash, output, open),
        Commands::Preview { camera, seconds } => cli::run_preview(camera, seconds),
        Commands::Latest { open } => cli::show_latest(open),
    }
}
