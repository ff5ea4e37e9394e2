//! Ports - interface to the external media-processing collaborator
//!
//! The pipeline only ever talks to ffmpeg/ffprobe through this trait, so
//! orchestration logic can be tested against a fake without the real
//! binaries installed. All calls are blocking: the caller suspends until the
//! subprocess exits, and no cancellation or retry happens below this seam.

use std::path::{Path, PathBuf};

use crate::error::QuiClipResult;

/// Narrow contract over the external media tool
pub trait MediaTool: Send + Sync {
    /// Query a source file's duration in seconds. Pure query, no side effects.
    fn probe_duration(&self, path: &Path) -> QuiClipResult<f64>;

    /// Trim `[start_sec, end_sec)` out of `input` into a standalone clip at
    /// `output`. Must reject `end_sec <= start_sec` without spawning anything.
    fn trim(
        &self,
        input: &Path,
        start_sec: f64,
        end_sec: f64,
        output: &Path,
    ) -> QuiClipResult<()>;

    /// Stream-copy concatenate `inputs`, in order, into `output`. Inputs must
    /// already share codec parameters; this stage does not verify that.
    fn concat(&self, inputs: &[PathBuf], output: &Path) -> QuiClipResult<()>;
}
