//! QuiClip CLI
//!
//! Server-side video clipping and merging on top of ffmpeg: browse a
//! sandboxed media root, trim time ranges out of source files, and
//! concatenate the parts (or whole videos) into a single output.
//!
//! # Usage
//!
//! ```bash
//! quiclip --media-root /srv/media list
//! quiclip --media-root /srv/media probe footage/a.mp4
//! quiclip --media-root /srv/media clip -s footage/a.mp4:0:5 -s footage/a.mp4:10:12
//! quiclip --media-root /srv/media merge footage/a.mp4 footage/b.mp4
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use quiclip::cli::{commands, Cli, Commands};
use quiclip::config::AppConfig;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let cli = Cli::parse();
    let config = AppConfig::load(cli.media_root.as_deref(), cli.config.as_deref())?;

    // Execute the requested command
    match cli.command {
        Commands::List(args) => commands::list(&config, args)?,
        Commands::Probe(args) => commands::probe(&config, args)?,
        Commands::Clip(args) => commands::clip(&config, args)?,
        Commands::Merge(args) => commands::merge(&config, args)?,
    }

    info!("QuiClip completed successfully");
    Ok(())
}
