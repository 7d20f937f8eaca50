//! Scratch directory for intermediate frames.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::TempDir;
use tracing::debug;

use super::sink::FRAME_PREFIX;

/// Where numbered frames live until the GIF is encoded.
#[derive(Debug)]
pub enum ScratchDir {
    /// Temporary directory, removed with everything in it on drop.
    Temp(TempDir),
    /// User-chosen directory. Only `frame-*.png` files are ever removed.
    Fixed { path: PathBuf, keep_frames: bool },
}

impl ScratchDir {
    pub fn temporary() -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix("termgif-")
            .tempdir()
            .context("Failed to create temporary frame directory")?;
        Ok(Self::Temp(dir))
    }

    /// Use `path`, creating it if needed.
    pub fn fixed(path: &Path, keep_frames: bool) -> Result<Self> {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create frame directory {}", path.display()))?;
        Ok(Self::Fixed {
            path: path.to_path_buf(),
            keep_frames,
        })
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::Temp(dir) => dir.path(),
            Self::Fixed { path, .. } => path,
        }
    }

    /// Remove frames left over from an earlier run.
    pub fn clear(&self) -> Result<usize> {
        delete_frames(self.path())
    }

    /// Remove this run's frames unless asked to keep them.
    pub fn cleanup(self) -> Result<()> {
        match self {
            Self::Temp(dir) => dir
                .close()
                .context("Failed to remove temporary frame directory"),
            Self::Fixed { keep_frames: true, path } => {
                debug!(dir = %path.display(), "Keeping frames");
                Ok(())
            }
            Self::Fixed { path, .. } => delete_frames(&path).map(|_| ()),
        }
    }
}

fn is_frame_file(name: &str) -> bool {
    name.strip_prefix(FRAME_PREFIX)
        .and_then(|rest| rest.strip_suffix(".png"))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}

/// Delete `frame-N.png` files in `dir`. Other files are left alone.
pub fn delete_frames(dir: &Path) -> Result<usize> {
    let mut deleted = 0;
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        if name.to_str().is_some_and(is_frame_file) {
            fs::remove_file(entry.path())
                .with_context(|| format!("Failed to delete {}", entry.path().display()))?;
            deleted += 1;
        }
    }
    if deleted > 0 {
        debug!(deleted, dir = %dir.display(), "Deleted frames");
    }
    Ok(deleted)
}
