//! Path sandbox resolver
//!
//! Validates user-supplied file and directory candidates against the
//! configured media root. Every function here is total: invalid or escaping
//! input yields `None`, the root, or an empty listing, never an error. These
//! are boundary checks for an interactive surface, so a bad selection must
//! leave the session flow uninterrupted.
//!
//! Containment is checked on canonicalized paths with component-wise
//! `Path::starts_with`, so a sibling directory that merely shares a string
//! prefix (`/media` vs `/media2`) never passes.

use std::path::{Path, PathBuf};

use serde::Serialize;
use walkdir::WalkDir;

/// Recognized video file extensions (lowercase)
pub const VIDEO_EXTS: [&str; 7] = ["mp4", "mov", "mkv", "m4v", "avi", "ts", "wmv"];

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileItem {
    /// Root-relative path, for display
    pub label: String,
    /// Absolute canonical path
    pub path: PathBuf,
}

/// Check whether a path carries a recognized video extension
pub fn has_video_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| VIDEO_EXTS.contains(&ext.as_str()))
        .unwrap_or(false)
}

/// Canonicalize a candidate, joining relative ones onto the media root
fn canonicalize_candidate(media_root: &Path, candidate: &str) -> Option<PathBuf> {
    let raw = Path::new(candidate);
    let joined;
    let absolute = if raw.is_absolute() {
        raw
    } else {
        joined = media_root.join(raw);
        &joined
    };
    absolute.canonicalize().ok()
}

/// Resolve a user-selected file candidate to an absolute path.
///
/// Returns `Some` only if the candidate names an existing regular file with a
/// recognized video extension that lies strictly inside the media root.
pub fn resolve_file(media_root: &Path, candidate: &str) -> Option<PathBuf> {
    if candidate.is_empty() {
        return None;
    }
    let full = canonicalize_candidate(media_root, candidate)?;
    if !full.starts_with(media_root) || full.as_path() == media_root {
        return None;
    }
    if !full.is_file() {
        return None;
    }
    if !has_video_extension(&full) {
        return None;
    }
    Some(full)
}

/// Clamp a directory candidate to the media root.
///
/// Always returns a directory inside the root: the candidate itself if it is
/// a directory inside the root, the candidate's parent if the candidate is a
/// file whose parent is inside the root, and the root for everything else.
pub fn safe_dir(media_root: &Path, candidate: Option<&str>) -> PathBuf {
    let candidate = match candidate {
        Some(c) if !c.is_empty() => c,
        _ => return media_root.to_path_buf(),
    };
    let full = match canonicalize_candidate(media_root, candidate) {
        Some(p) => p,
        None => return media_root.to_path_buf(),
    };
    if !full.starts_with(media_root) {
        return media_root.to_path_buf();
    }
    if full.is_dir() {
        return full;
    }
    match full.parent() {
        Some(parent) if parent.is_dir() && parent.starts_with(media_root) => {
            parent.to_path_buf()
        }
        _ => media_root.to_path_buf(),
    }
}

/// Clamp an already-resolved directory path to the media root.
///
/// Path-typed counterpart of [`safe_dir`] for callers that hold a canonical
/// `Path` (such as the parent of a resolved file); going through a string
/// would lose non-UTF-8 paths. Anything that is not a directory inside the
/// root falls back to the root itself.
pub fn clamp_dir(media_root: &Path, dir: &Path) -> PathBuf {
    if dir.is_dir() && dir.starts_with(media_root) {
        dir.to_path_buf()
    } else {
        media_root.to_path_buf()
    }
}

/// List video files exactly one directory level under `media_root/relative_dir`.
///
/// Entries are sorted by file name and labeled with their root-relative
/// paths. Traversal escapes and I/O failures yield an empty listing.
pub fn list_video_files(media_root: &Path, relative_dir: &str) -> Vec<FileItem> {
    let base = match canonicalize_candidate(media_root, relative_dir) {
        Some(p) => p,
        None => return Vec::new(),
    };
    if !base.starts_with(media_root) || !base.is_dir() {
        return Vec::new();
    }

    WalkDir::new(&base)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_video_extension(path))
        .map(|path| {
            let label = path
                .strip_prefix(media_root)
                .map(|rel| rel.to_string_lossy().into_owned())
                .unwrap_or_else(|_| path.to_string_lossy().into_owned());
            FileItem { label, path }
        })
        .collect()
}
