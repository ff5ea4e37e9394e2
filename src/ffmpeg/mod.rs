//! ffmpeg/ffprobe adapter
//!
//! Implements the `MediaTool` port by shelling out to the ffmpeg and ffprobe
//! binaries on PATH. Only the three capabilities this project needs are
//! wrapped: duration probing, range trimming, and stream-copy concatenation.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{QuiClipError, QuiClipResult};
use crate::ports::MediaTool;

/// ffprobe JSON output: `{"format": {"duration": "12.345"}}`
#[derive(Debug, Deserialize)]
struct ProbeOutput {
    format: Option<ProbeFormat>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
}

/// Media tool backed by the ffmpeg/ffprobe binaries
#[derive(Debug, Default)]
pub struct FfmpegTool;

impl FfmpegTool {
    /// Create a new ffmpeg-backed media tool
    pub fn new() -> Self {
        Self
    }

    /// Check that both ffmpeg and ffprobe respond to `-version`
    pub fn ensure_available(&self) -> QuiClipResult<()> {
        for tool in ["ffmpeg", "ffprobe"] {
            let output = run_tool(tool, Command::new(tool).arg("-version"))?;
            if !output.status.success() {
                return Err(QuiClipError::ToolUnavailable {
                    tool: tool.to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Run a prepared command, mapping a missing binary to `ToolUnavailable`
fn run_tool(tool: &str, command: &mut Command) -> QuiClipResult<Output> {
    debug!("Running {:?}", command);
    match command.output() {
        Ok(output) => Ok(output),
        Err(e) if e.kind() == ErrorKind::NotFound => Err(QuiClipError::ToolUnavailable {
            tool: tool.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Turn a non-zero exit into `MediaTool`, carrying stderr verbatim
fn check_status(context: &str, output: Output) -> QuiClipResult<()> {
    if output.status.success() {
        return Ok(());
    }
    Err(QuiClipError::MediaTool {
        context: context.to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

/// Parse an ffprobe JSON document into a finite duration in seconds
fn parse_probe_duration(stdout: &str) -> QuiClipResult<f64> {
    let parsed: ProbeOutput = serde_json::from_str(stdout).map_err(|e| QuiClipError::Probe {
        message: format!("Unparsable ffprobe output: {}", e),
    })?;
    let duration = parsed
        .format
        .and_then(|f| f.duration)
        .ok_or_else(|| QuiClipError::Probe {
            message: "ffprobe output has no format.duration field".to_string(),
        })?;
    let seconds: f64 = duration.parse().map_err(|_| QuiClipError::Probe {
        message: format!("Invalid duration value: {}", duration),
    })?;
    if !seconds.is_finite() {
        return Err(QuiClipError::Probe {
            message: format!("Non-finite duration value: {}", duration),
        });
    }
    Ok(seconds)
}

/// Escape a path for an ffmpeg concat manifest entry.
///
/// Entries are written as `file '<path>'`; a single quote in the path would
/// terminate the quoting, so it is escaped.
fn escape_manifest_path(path: &Path) -> String {
    path.to_string_lossy().replace('\'', "\\'")
}

/// Ensure the directory that will hold `output` exists
fn create_output_dir(output: &Path) -> QuiClipResult<()> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

impl MediaTool for FfmpegTool {
    fn probe_duration(&self, path: &Path) -> QuiClipResult<f64> {
        let output = run_tool(
            "ffprobe",
            Command::new("ffprobe")
                .args(["-v", "error", "-show_entries", "format=duration", "-of", "json"])
                .arg(path),
        )?;
        if !output.status.success() {
            return Err(QuiClipError::Probe {
                message: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        parse_probe_duration(&String::from_utf8_lossy(&output.stdout))
    }

    /// Re-encode trim.
    ///
    /// Stream-copy trims snap to the preceding keyframe and drift by up to a
    /// GOP; re-encoding buys sub-second start/duration accuracy. `-ss` before
    /// `-i` keeps the seek on the decode side (fast, approximate), `-t` gives
    /// the cut as a duration rather than an absolute end point, and
    /// `-avoid_negative_ts make_zero` re-bases timestamps at zero so the
    /// parts concatenate cleanly.
    fn trim(
        &self,
        input: &Path,
        start_sec: f64,
        end_sec: f64,
        output: &Path,
    ) -> QuiClipResult<()> {
        if end_sec <= start_sec {
            return Err(QuiClipError::validation(
                "End time must be greater than start time",
            ));
        }
        let duration_sec = end_sec - start_sec;
        create_output_dir(output)?;

        info!(
            "Trimming {} [{:.3}s, {:.3}s) -> {}",
            input.display(),
            start_sec,
            end_sec,
            output.display()
        );
        let result = run_tool(
            "ffmpeg",
            Command::new("ffmpeg")
                .arg("-y")
                .args(["-ss", &format!("{:.3}", start_sec)])
                .arg("-i")
                .arg(input)
                .args(["-t", &format!("{:.3}", duration_sec)])
                .args(["-c:v", "libx264", "-preset", "veryfast", "-crf", "18"])
                .args(["-c:a", "aac", "-b:a", "192k"])
                .args(["-avoid_negative_ts", "make_zero"])
                .args(["-movflags", "+faststart"])
                .arg(output),
        )?;
        check_status("Trim failed", result)
    }

    /// Stream-copy concatenation via the concat demuxer.
    ///
    /// The demuxer needs a manifest file listing the inputs; it is written
    /// next to the output and removed best-effort whether ffmpeg succeeds or
    /// not.
    fn concat(&self, inputs: &[PathBuf], output: &Path) -> QuiClipResult<()> {
        if inputs.is_empty() {
            return Err(QuiClipError::validation("No input files to concatenate"));
        }
        create_output_dir(output)?;

        let mut manifest_path = output.as_os_str().to_owned();
        manifest_path.push(".txt");
        let manifest_path = PathBuf::from(manifest_path);

        let mut manifest = String::new();
        for input in inputs {
            manifest.push_str(&format!("file '{}'\n", escape_manifest_path(input)));
        }
        fs::write(&manifest_path, manifest)?;

        info!("Concatenating {} file(s) -> {}", inputs.len(), output.display());
        let result = run_tool(
            "ffmpeg",
            Command::new("ffmpeg")
                .arg("-y")
                .args(["-f", "concat", "-safe", "0"])
                .arg("-i")
                .arg(&manifest_path)
                .args(["-c", "copy"])
                .args(["-movflags", "+faststart"])
                .arg(output),
        );

        // The manifest is a side artifact; the subprocess outcome is the
        // primary result, so a removal failure is swallowed.
        let _ = fs::remove_file(&manifest_path);

        check_status("Concatenation failed", result?)
    }
}
