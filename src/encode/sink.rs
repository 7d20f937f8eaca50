//! Frame files written on a background thread.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use anyhow::{anyhow, Result};
use tracing::debug;

use crate::animation::FrameSink;

/// File name prefix of numbered frames.
pub const FRAME_PREFIX: &str = "frame-";

/// Pattern ffmpeg uses to read the numbered frames back.
pub const FRAME_PATTERN: &str = "frame-%d.png";

/// Path of frame `index` inside `dir`.
pub fn frame_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!("{}{}.png", FRAME_PREFIX, index))
}

struct WriteRequest {
    index: usize,
    frame: Arc<[u8]>,
}

/// Writer loop: exits when the request channel closes or a write fails.
fn writer_loop(dir: PathBuf, request_rx: Receiver<WriteRequest>) -> std::io::Result<usize> {
    let mut written = 0;
    while let Ok(request) = request_rx.recv() {
        fs::write(frame_path(&dir, request.index), &request.frame)?;
        written += 1;
    }
    Ok(written)
}

/// Writes `frame-N.png` files into a directory without blocking rendering.
///
/// Each frame keeps the index it was generated with, so file order always
/// matches generation order even though writes overlap rendering.
pub struct DirSink {
    dir: PathBuf,
    request_tx: Option<Sender<WriteRequest>>,
    worker: Option<JoinHandle<std::io::Result<usize>>>,
}

impl DirSink {
    /// Start the writer thread for `dir`.
    pub fn spawn(dir: &Path) -> Self {
        let (request_tx, request_rx) = mpsc::channel();
        let worker_dir = dir.to_path_buf();
        let worker = thread::spawn(move || writer_loop(worker_dir, request_rx));
        Self {
            dir: dir.to_path_buf(),
            request_tx: Some(request_tx),
            worker: Some(worker),
        }
    }

    /// Wait for pending writes. Returns the number of files written.
    pub fn finish(mut self) -> Result<usize> {
        self.join()
    }

    fn join(&mut self) -> Result<usize> {
        // Closing the channel ends the writer loop
        self.request_tx.take();
        let Some(worker) = self.worker.take() else {
            return Ok(0);
        };
        let written = worker
            .join()
            .map_err(|_| anyhow!("Frame writer thread panicked"))?
            .map_err(|e| anyhow!("Failed to write frame into {}: {}", self.dir.display(), e))?;
        debug!(written, dir = %self.dir.display(), "Frame writer finished");
        Ok(written)
    }
}

impl FrameSink for DirSink {
    fn write(&mut self, index: usize, frame: Arc<[u8]>) -> Result<()> {
        let sent = self
            .request_tx
            .as_ref()
            .map(|tx| tx.send(WriteRequest { index, frame }).is_ok())
            .unwrap_or(false);
        if sent {
            return Ok(());
        }
        // The writer stopped early; its error explains why
        match self.join() {
            Err(e) => Err(e),
            Ok(_) => Err(anyhow!("Frame writer is no longer running")),
        }
    }
}

impl Drop for DirSink {
    fn drop(&mut self) {
        let _ = self.join();
    }
}
