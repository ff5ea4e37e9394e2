//! QuiClip
//!
//! A server-side video clipping and merging utility. A sandboxed media root
//! is browsed for source files, an ordered list of clip segments (or whole
//! videos) is edited through pure list operations, and ffmpeg is driven as
//! an external collaborator to trim each segment and concatenate the parts.

pub mod cli;
pub mod config;
pub mod error;
pub mod ffmpeg;
pub mod pipeline;
pub mod ports;
pub mod sandbox;
pub mod segments;
pub mod session;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{QuiClipError, QuiClipResult};
pub use ffmpeg::FfmpegTool;
pub use ports::MediaTool;
pub use segments::{ClipSegment, VideoRef};
pub use session::{RunOutcome, Session};
