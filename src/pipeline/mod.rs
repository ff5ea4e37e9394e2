//! Trim/concat pipeline orchestrator
//!
//! Sequences the two-phase media pipeline: per-segment re-encode trims into a
//! scoped temporary workspace, then an ordered stream-copy concatenation into
//! a timestamped output file. The workspace is a `tempfile` RAII guard, so it
//! is removed on every exit path, including a trim failure partway through.
//! Stage errors are not caught here; they propagate after cleanup.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use tracing::info;

use crate::error::{QuiClipError, QuiClipResult};
use crate::ports::MediaTool;
use crate::segments::ClipSegment;

/// Timestamped output filename, e.g. `quiclip-clip-20260823-101500.mp4`
fn output_filename(operation: &str) -> String {
    let ts = Local::now().format("%Y%m%d-%H%M%S");
    format!("quiclip-{}-{}.mp4", operation, ts)
}

/// Trim every segment, in list order, then concatenate the parts.
///
/// Returns the path of the merged output file inside `output_dir` (created
/// if absent). Fails with a validation error on an empty segment list before
/// touching the filesystem.
pub fn clip_and_merge(
    tool: &dyn MediaTool,
    segments: &[ClipSegment],
    output_dir: &Path,
) -> QuiClipResult<PathBuf> {
    if segments.is_empty() {
        return Err(QuiClipError::validation("Segment list is empty"));
    }

    fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(output_filename("clip"));

    let workspace = tempfile::Builder::new().prefix("quiclip_").tempdir()?;
    info!(
        "Clipping {} segment(s) in workspace {}",
        segments.len(),
        workspace.path().display()
    );

    let mut part_paths = Vec::with_capacity(segments.len());
    for (idx, segment) in segments.iter().enumerate() {
        // Sequential numbering keeps the manifest in list order.
        let part_path = workspace.path().join(format!("part_{:03}.mp4", idx + 1));
        tool.trim(
            &segment.input_path,
            segment.start_sec,
            segment.end_sec,
            &part_path,
        )?;
        part_paths.push(part_path);
    }

    tool.concat(&part_paths, &output_path)?;

    // Surface removal problems on the success path; the Drop guard already
    // covers every error path above.
    workspace.close()?;

    info!("Clip and merge complete: {}", output_path.display());
    Ok(output_path)
}

/// Concatenate whole videos, in order, into a timestamped output file.
///
/// The inputs are joined by stream copy, so they must already share codec
/// parameters. Fails with a validation error on an empty list.
pub fn merge_videos(
    tool: &dyn MediaTool,
    paths: &[PathBuf],
    output_dir: &Path,
) -> QuiClipResult<PathBuf> {
    if paths.is_empty() {
        return Err(QuiClipError::validation("Video list is empty"));
    }

    fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join(output_filename("merge"));

    info!("Merging {} video(s)", paths.len());
    tool.concat(paths, &output_path)?;

    info!("Merge complete: {}", output_path.display());
    Ok(output_path)
}
