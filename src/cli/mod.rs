//! Command-line interface

pub mod args;
pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use args::{ClipArgs, ListArgs, MergeArgs, ProbeArgs};

/// QuiClip command-line interface
#[derive(Parser, Debug)]
#[command(
    name = "quiclip",
    version,
    about = "Server-side video clipping and merging on top of ffmpeg"
)]
pub struct Cli {
    /// Media root directory; all browsing and output is confined inside it
    #[arg(long, env = "QUICLIP_MEDIA_ROOT", global = true)]
    pub media_root: Option<PathBuf>,

    /// TOML config file with a `media_root` key
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List video files one directory level under the media root
    List(ListArgs),
    /// Print a video file's duration in seconds
    Probe(ProbeArgs),
    /// Trim segments and merge the parts into one output file
    Clip(ClipArgs),
    /// Merge whole videos, in order, into one output file
    Merge(MergeArgs),
}
