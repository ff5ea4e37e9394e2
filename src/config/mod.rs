//! Application configuration
//!
//! QuiClip has a single piece of process-wide configuration: the media root
//! directory that all browsing, probing, and output writing is confined to.
//! Precedence follows CLI > environment > config file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::{QuiClipError, QuiClipResult};

/// Application configuration, read-only for the lifetime of the process
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Sandbox directory for all file browsing and output
    pub media_root: PathBuf,
}

/// On-disk configuration file shape (TOML)
#[derive(Debug, Deserialize)]
struct ConfigFile {
    media_root: PathBuf,
}

impl AppConfig {
    /// Build the configuration from an explicit media root.
    ///
    /// The root must exist and be a directory; it is canonicalized so every
    /// later containment check compares against a stable absolute form.
    pub fn new(media_root: impl AsRef<Path>) -> QuiClipResult<Self> {
        let media_root = media_root.as_ref();
        let canonical = media_root.canonicalize().map_err(|e| {
            QuiClipError::validation(format!(
                "Media root '{}' is not accessible: {}",
                media_root.display(),
                e
            ))
        })?;
        if !canonical.is_dir() {
            return Err(QuiClipError::validation(format!(
                "Media root '{}' is not a directory",
                media_root.display()
            )));
        }
        info!("Using media root: {}", canonical.display());
        Ok(Self {
            media_root: canonical,
        })
    }

    /// Load configuration, preferring the CLI value over a TOML config file.
    ///
    /// The environment fallback (QUICLIP_MEDIA_ROOT) is applied by the CLI
    /// argument definition before this is called.
    pub fn load(cli_root: Option<&Path>, config_file: Option<&Path>) -> QuiClipResult<Self> {
        if let Some(root) = cli_root {
            return Self::new(root);
        }
        if let Some(path) = config_file {
            return Self::from_file(path);
        }
        Err(QuiClipError::validation(
            "No media root configured. Pass --media-root, set QUICLIP_MEDIA_ROOT, \
             or provide --config",
        ))
    }

    /// Load configuration from a TOML file with a `media_root` key
    pub fn from_file(path: &Path) -> QuiClipResult<Self> {
        let raw = fs::read_to_string(path)?;
        let parsed: ConfigFile = toml::from_str(&raw).map_err(|e| {
            QuiClipError::validation(format!(
                "Invalid config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        info!("Loaded configuration from: {}", path.display());
        Self::new(&parsed.media_root)
    }
}
