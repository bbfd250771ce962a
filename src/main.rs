// SPDX-License-Identifier: GPL-3.0-only

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cli;

#[derive(Parser)]
#[command(name = "photo-booth")]
#[command(about = "Compose photos into a photo strip")]
#[command(version = env!("GIT_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose image files into a strip
    Strip {
        /// Images to import, in strip order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Layout: stacked, side-by-side or grid
        #[arg(short, long)]
        layout: Option<String>,

        /// Background: white, black, primary, accent or #rrggbb
        #[arg(short, long)]
        background: Option<String>,

        /// Filter applied to every photo (see `photo-booth filters`)
        #[arg(short, long)]
        filter: Option<String>,

        /// Output file or directory (default: ~/Pictures/PhotoBooth)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Caption title for stacked strips
        #[arg(long)]
        caption: Option<String>,

        /// Also prepare a share link for the strip
        #[arg(long)]
        share: bool,
    },

    /// List available filters
    Filters,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    // Set RUST_LOG environment variable to control log level
    // Examples: RUST_LOG=debug, RUST_LOG=photo_booth=debug, RUST_LOG=info
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
        Commands::Strip {
            files,
            layout,
            background,
            filter,
            output,
            config,
            caption,
            share,
        } => cli::make_strip(cli::StripArgs {
            files,
            layout,
            background,
            filter,
            output,
            config,
            caption,
            share,
        }),
        Commands::Filters => cli::list_filters(),
    }
}
