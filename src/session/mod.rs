//! Interactive session boundary
//!
//! One `Session` per operator: it owns the active segment and video lists,
//! threads every mutation through the pure list operations, and recomputes
//! the display rows after each change. Run operations never leak a raw
//! error across this boundary; they return a `RunOutcome` value carrying a
//! user-facing message for both the success and the failure path.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{QuiClipError, QuiClipResult};
use crate::pipeline;
use crate::ports::MediaTool;
use crate::sandbox::{self, FileItem};
use crate::segments::{self, ClipSegment, SegmentRow, VideoRef, VideoRow};

/// Ephemeral metadata derived by probing a source file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VideoMeta {
    pub duration_seconds: f64,
}

/// Result of a run operation at the session boundary: always a value with a
/// user-facing message, never an unhandled fault
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    Done { output: PathBuf, message: String },
    Failed { message: String },
}

/// Interactive editing session over one media root
pub struct Session<'a> {
    config: &'a AppConfig,
    tool: &'a dyn MediaTool,
    segments: Vec<ClipSegment>,
    videos: Vec<VideoRef>,
}

impl<'a> Session<'a> {
    /// Start a session with empty lists
    pub fn new(config: &'a AppConfig, tool: &'a dyn MediaTool) -> Self {
        Self {
            config,
            tool,
            segments: Vec::new(),
            videos: Vec::new(),
        }
    }

    fn root(&self) -> &Path {
        &self.config.media_root
    }

    /// Validate a user-selected file candidate against the sandbox
    pub fn select_file(&self, candidate: &str) -> Option<PathBuf> {
        sandbox::resolve_file(self.root(), candidate)
    }

    /// List one level of video files under the media root
    pub fn list_dir(&self, relative_dir: &str) -> Vec<FileItem> {
        sandbox::list_video_files(self.root(), relative_dir)
    }

    /// Probe a selected file for its duration
    pub fn load_video(&self, candidate: &str) -> QuiClipResult<VideoMeta> {
        let path = self.select_file(candidate).ok_or_else(|| {
            QuiClipError::validation(format!("Not a valid video file selection: {}", candidate))
        })?;
        let duration_seconds = self.tool.probe_duration(&path)?;
        Ok(VideoMeta { duration_seconds })
    }

    /// Default output directory for a selection, clamped inside the root
    pub fn default_output_dir(&self, candidate: Option<&str>) -> PathBuf {
        let parent = candidate
            .and_then(|c| self.select_file(c))
            .and_then(|p| p.parent().map(Path::to_path_buf));
        match parent {
            Some(dir) => sandbox::clamp_dir(self.root(), &dir),
            None => sandbox::safe_dir(self.root(), candidate),
        }
    }

    /// Current segment rows (recomputed fresh)
    pub fn segment_rows(&self) -> Vec<SegmentRow> {
        segments::segment_rows(&self.segments, self.root())
    }

    /// Current video rows (renumbered fresh)
    pub fn video_rows(&self) -> Vec<VideoRow> {
        segments::video_rows(&self.videos)
    }

    /// Append a trim segment. An unresolvable path or a degenerate range
    /// leaves the list unchanged.
    pub fn add_segment(&mut self, candidate: &str, start_sec: f64, end_sec: f64) -> Vec<SegmentRow> {
        match self.select_file(candidate) {
            Some(path) => {
                self.segments = segments::append_segment(&self.segments, path, start_sec, end_sec);
            }
            None => warn!("Rejected segment candidate: {}", candidate),
        }
        self.segment_rows()
    }

    /// Move the segment at the 1-based `index` by `delta` (-1 up, +1 down)
    pub fn move_segment(&mut self, index: usize, delta: isize) -> Vec<SegmentRow> {
        self.segments = segments::move_entry(&self.segments, index, delta);
        self.segment_rows()
    }

    /// Delete the segment at the 1-based `index`
    pub fn delete_segment(&mut self, index: usize) -> Vec<SegmentRow> {
        self.segments = segments::delete_entry(&self.segments, index);
        self.segment_rows()
    }

    /// Drop all segments
    pub fn clear_segments(&mut self) -> Vec<SegmentRow> {
        self.segments = segments::clear();
        self.segment_rows()
    }

    /// Append a whole video to the merge list (idempotent per path)
    pub fn add_video(&mut self, candidate: &str) -> Vec<VideoRow> {
        match self.select_file(candidate) {
            Some(path) => {
                let label = path
                    .strip_prefix(self.root())
                    .map(|rel| rel.to_string_lossy().into_owned())
                    .unwrap_or_else(|_| path.to_string_lossy().into_owned());
                self.videos = segments::append_video(&self.videos, label, path);
            }
            None => warn!("Rejected video candidate: {}", candidate),
        }
        self.video_rows()
    }

    /// Move the video at the 1-based `index` by `delta`
    pub fn move_video(&mut self, index: usize, delta: isize) -> Vec<VideoRow> {
        self.videos = segments::move_entry(&self.videos, index, delta);
        self.video_rows()
    }

    /// Delete the video at the 1-based `index`
    pub fn delete_video(&mut self, index: usize) -> Vec<VideoRow> {
        self.videos = segments::delete_entry(&self.videos, index);
        self.video_rows()
    }

    /// Drop all videos
    pub fn clear_videos(&mut self) -> Vec<VideoRow> {
        self.videos = segments::clear();
        self.video_rows()
    }

    /// Trim every listed segment and merge the parts into one output file
    pub fn run_clip_merge(&self, output_dir: Option<&str>) -> RunOutcome {
        let out_dir = sandbox::safe_dir(self.root(), output_dir);
        info!("Running clip-and-merge into {}", out_dir.display());
        self.outcome(pipeline::clip_and_merge(self.tool, &self.segments, &out_dir))
    }

    /// Merge the listed videos, in order, into one output file
    pub fn run_merge(&self, output_dir: Option<&str>) -> RunOutcome {
        let out_dir = sandbox::safe_dir(self.root(), output_dir);
        info!("Running merge into {}", out_dir.display());
        let paths: Vec<PathBuf> = self.videos.iter().map(|v| v.path.clone()).collect();
        self.outcome(pipeline::merge_videos(self.tool, &paths, &out_dir))
    }

    fn outcome(&self, result: QuiClipResult<PathBuf>) -> RunOutcome {
        match result {
            Ok(output) => {
                let label = output
                    .strip_prefix(self.root())
                    .map(|rel| rel.to_string_lossy().into_owned())
                    .unwrap_or_else(|_| output.to_string_lossy().into_owned());
                RunOutcome::Done {
                    output,
                    message: format!("Done: {}", label),
                }
            }
            Err(e) => {
                warn!("Run failed: {}", e);
                RunOutcome::Failed {
                    message: user_message(&e),
                }
            }
        }
    }
}

/// Map an error to the message shown at the interactive boundary
pub fn user_message(error: &QuiClipError) -> String {
    match error {
        QuiClipError::Validation { message } => format!("Error: {}", message),
        QuiClipError::ToolUnavailable { tool } => {
            format!("Error: {} is not installed or not on PATH", tool)
        }
        QuiClipError::Probe { message } => format!("Error: could not read video info: {}", message),
        QuiClipError::MediaTool { context, stderr } => format!("Error: {}: {}", context, stderr),
        // Residual faults get a generic message rather than a raw error dump
        QuiClipError::Io(e) => format!("Unexpected error: {}", e),
    }
}
