//! Command implementations

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

use crate::cli::args::{ClipArgs, ListArgs, MergeArgs, ProbeArgs};
use crate::config::AppConfig;
use crate::ffmpeg::FfmpegTool;
use crate::session::{RunOutcome, Session};

/// Execute the list command
pub fn list(config: &AppConfig, args: ListArgs) -> Result<()> {
    let tool = FfmpegTool::new();
    let session = Session::new(config, &tool);
    let items = session.list_dir(&args.dir);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&items).context("Failed to serialize listing")?
        );
    } else {
        for item in &items {
            println!("{}", item.label);
        }
    }
    Ok(())
}

/// Execute the probe command
pub fn probe(config: &AppConfig, args: ProbeArgs) -> Result<()> {
    let tool = FfmpegTool::new();
    let session = Session::new(config, &tool);
    let meta = session
        .load_video(&args.file)
        .with_context(|| format!("Failed to probe '{}'", args.file))?;
    println!("{:.3}", meta.duration_seconds);
    Ok(())
}

/// Execute the clip command
pub fn clip(config: &AppConfig, args: ClipArgs) -> Result<()> {
    let tool = FfmpegTool::new();
    let mut session = Session::new(config, &tool);

    let mut first_input: Option<String> = None;
    for spec in &args.segments {
        let (path, start_sec, end_sec) = parse_segment_spec(spec)?;
        let resolved = session
            .select_file(&path)
            .ok_or_else(|| anyhow!("Not a video file inside the media root: {}", path))?;
        // The list model silently drops invalid ranges; a CLI argument is a
        // deliberate request, so reject it loudly instead.
        if start_sec < 0.0 {
            bail!("Invalid range in '{}': start must not be negative", spec);
        }
        if end_sec <= start_sec {
            bail!("Invalid range in '{}': end must be greater than start", spec);
        }
        let resolved = resolved.to_string_lossy().into_owned();
        first_input.get_or_insert_with(|| resolved.clone());
        session.add_segment(&resolved, start_sec, end_sec);
    }

    let rows = session.segment_rows();
    info!("Clipping {} segment(s)", rows.len());
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).context("Failed to serialize segment rows")?
        );
    }

    let output_dir = args.output_dir.or_else(|| {
        first_input
            .as_deref()
            .map(|f| session.default_output_dir(Some(f)).to_string_lossy().into_owned())
    });
    tool.ensure_available()?;
    run(session.run_clip_merge(output_dir.as_deref()))
}

/// Execute the merge command
pub fn merge(config: &AppConfig, args: MergeArgs) -> Result<()> {
    let tool = FfmpegTool::new();
    let mut session = Session::new(config, &tool);

    let mut first_input: Option<String> = None;
    for file in &args.files {
        let resolved = session
            .select_file(file)
            .ok_or_else(|| anyhow!("Not a video file inside the media root: {}", file))?;
        let resolved = resolved.to_string_lossy().into_owned();
        first_input.get_or_insert_with(|| resolved.clone());
        session.add_video(&resolved);
    }

    let rows = session.video_rows();
    info!("Merging {} video(s)", rows.len());
    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&rows).context("Failed to serialize video rows")?
        );
    }

    let output_dir = args.output_dir.or_else(|| {
        first_input
            .as_deref()
            .map(|f| session.default_output_dir(Some(f)).to_string_lossy().into_owned())
    });
    tool.ensure_available()?;
    run(session.run_merge(output_dir.as_deref()))
}

/// Report a run outcome: the output path on stdout, or the boundary message
fn run(outcome: RunOutcome) -> Result<()> {
    match outcome {
        RunOutcome::Done { output, message } => {
            info!("{}", message);
            println!("{}", output.display());
            Ok(())
        }
        RunOutcome::Failed { message } => bail!(message),
    }
}

/// Parse a `PATH:START:END` segment spec.
///
/// Split from the right so paths containing `:` keep working.
fn parse_segment_spec(spec: &str) -> Result<(String, f64, f64)> {
    let mut parts = spec.rsplitn(3, ':');
    let end = parts.next();
    let start = parts.next();
    let path = parts.next();
    let (path, start, end) = match (path, start, end) {
        (Some(p), Some(s), Some(e)) if !p.is_empty() => (p, s, e),
        _ => bail!("Invalid segment spec '{}', expected PATH:START:END", spec),
    };
    let start_sec: f64 = start
        .parse()
        .with_context(|| format!("Invalid start time in '{}'", spec))?;
    let end_sec: f64 = end
        .parse()
        .with_context(|| format!("Invalid end time in '{}'", spec))?;
    Ok((path.to_string(), start_sec, end_sec))
}
