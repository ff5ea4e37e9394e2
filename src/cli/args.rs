//! Command-line argument definitions

use clap::Args;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directory relative to the media root (defaults to the root itself)
    #[arg(default_value = "")]
    pub dir: String,

    /// Output entries as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the probe command
#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Video file, root-relative or absolute, inside the media root
    pub file: String,
}

/// Arguments for the clip command
#[derive(Args, Debug)]
pub struct ClipArgs {
    /// Segment spec `PATH:START:END` (seconds), repeatable; applied in order
    #[arg(short = 's', long = "segment", required = true)]
    pub segments: Vec<String>,

    /// Output directory, clamped inside the media root
    /// (default: the first input's directory)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Print the segment rows as JSON before running
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the merge command
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Video files, in merge order
    #[arg(required = true)]
    pub files: Vec<String>,

    /// Output directory, clamped inside the media root
    /// (default: the first input's directory)
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Print the video rows as JSON before running
    #[arg(long)]
    pub json: bool,
}
