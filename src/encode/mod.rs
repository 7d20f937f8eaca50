//! Frame output and GIF encoding.
//!
//! - [`sink`]: numbered frame files written off the render thread
//! - [`scratch`]: the directory frames live in until encoded
//! - [`ffmpeg`]: the palette-based GIF encode

mod ffmpeg;
mod scratch;
mod sink;

pub use ffmpeg::{FfmpegEncoder, PALETTE_FILTER};
pub use scratch::{delete_frames, ScratchDir};
pub use sink::{frame_path, DirSink, FRAME_PATTERN, FRAME_PREFIX};

use std::path::Path;

/// Errors from running the encoder.
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("'{program}' was not found on PATH. Install ffmpeg and verify `ffmpeg -version` works")]
    NotFound { program: String },

    #[error("Failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' failed ({status})")]
    Failed { program: String, status: String },
}

/// Turns a directory of numbered frames into one animation file.
pub trait Encoder {
    fn encode(&self, frames_dir: &Path, fps: u32, output: &Path) -> Result<(), EncodeError>;
}
