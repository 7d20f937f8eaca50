//! GIF encoding through ffmpeg.

use std::io::ErrorKind;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use super::sink::FRAME_PATTERN;
use super::{EncodeError, Encoder};

/// Two-pass palette filter: build an optimal 256-color palette, then map
/// every frame onto it.
pub const PALETTE_FILTER: &str = "split[s0][s1];[s0]palettegen[p];[s1][p]paletteuse";

/// Encodes numbered PNG frames into a GIF with ffmpeg.
#[derive(Debug, Clone)]
pub struct FfmpegEncoder {
    program: String,
}

impl FfmpegEncoder {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Full argument list for one encode.
    pub fn args(&self, frames_dir: &Path, fps: u32, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-hide_banner".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-stats".to_string(),
            "-framerate".to_string(),
            fps.to_string(),
            "-i".to_string(),
            frames_dir.join(FRAME_PATTERN).display().to_string(),
            "-vf".to_string(),
            PALETTE_FILTER.to_string(),
            output.display().to_string(),
        ]
    }
}

impl Default for FfmpegEncoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Encoder for FfmpegEncoder {
    fn encode(&self, frames_dir: &Path, fps: u32, output: &Path) -> Result<(), EncodeError> {
        let args = self.args(frames_dir, fps, output);
        info!(program = %self.program, ?args, "Encoding GIF");

        let status = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|source| {
                if source.kind() == ErrorKind::NotFound {
                    EncodeError::NotFound {
                        program: self.program.clone(),
                    }
                } else {
                    EncodeError::Spawn {
                        program: self.program.clone(),
                        source,
                    }
                }
            })?;

        if !status.success() {
            return Err(EncodeError::Failed {
                program: self.program.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}
