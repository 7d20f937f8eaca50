//! One complete render: interpreter, parse, animate, encode, clean up.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::animation::{animate, AnimationSettings, FrameRenderer};
use crate::ansi::{tokenize, ColorScheme, Token};
use crate::encode::{DirSink, Encoder, ScratchDir};
use crate::frames::FramePlan;
use crate::interpreter::Interpreter;
use crate::progress::ProgressBar;
use crate::script::Script;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output: PathBuf,
    pub frames: usize,
    pub bytes: u64,
}

impl RunSummary {
    /// File size in human units, e.g. `1.21 MiB`.
    pub fn size(&self) -> String {
        humansize::format_size(self.bytes, humansize::BINARY)
    }
}

/// Collaborators and settings for rendering scripts into GIFs.
pub struct Pipeline<'a> {
    pub interpreter: &'a dyn Interpreter,
    pub encoder: &'a dyn Encoder,
    pub scheme: ColorScheme,
    pub settings: AnimationSettings,
    pub output: PathBuf,
    pub show_progress: bool,
}

impl Pipeline<'_> {
    /// Render `script` into the output GIF.
    ///
    /// Frames go into `scratch`, which is cleaned up only after a
    /// successful encode.
    pub fn run<R>(&self, script: &Script, renderer: &mut R, scratch: ScratchDir) -> Result<RunSummary>
    where
        R: FrameRenderer + ?Sized,
    {
        remove_stale_output(&self.output)?;
        scratch.clear()?;

        let outputs = self.evaluate(script)?;

        let plan = FramePlan::new(&script.commands, self.settings.fps);
        info!(
            commands = script.commands.len(),
            frames = plan.total_frames(),
            seconds = plan.duration_secs(),
            "Rendering frames"
        );

        let progress = if self.show_progress {
            ProgressBar::new(plan.total_frames())
        } else {
            ProgressBar::hidden(plan.total_frames())
        };
        let mut sink = DirSink::spawn(scratch.path());
        let animated = animate(
            &script.commands,
            &outputs,
            &self.settings,
            renderer,
            &mut sink,
            |frame| progress.update(frame),
        );
        progress.finish();
        let frames = animated?;
        let written = sink.finish()?;
        debug!(frames, written, "Frames written");

        self.encoder
            .encode(scratch.path(), self.settings.fps, &self.output)
            .context("GIF encoding failed")?;

        let bytes = fs::metadata(&self.output)
            .with_context(|| format!("Encoder did not create {}", self.output.display()))?
            .len();
        let summary = RunSummary {
            output: self.output.clone(),
            frames,
            bytes,
        };
        info!(output = %summary.output.display(), size = %summary.size(), "GIF written");

        scratch.cleanup()?;
        Ok(summary)
    }

    /// Run every command through the interpreter and tokenize the outputs.
    pub fn evaluate(&self, script: &Script) -> Result<Vec<Vec<Token>>> {
        info!(interpreter = self.interpreter.name(), "Evaluating commands");
        let records = self
            .interpreter
            .evaluate(&script.sources())
            .context("Interpreter failed")?;
        Ok(records
            .iter()
            .map(|record| tokenize(record, &self.scheme))
            .collect())
    }
}

fn remove_stale_output(output: &Path) -> Result<()> {
    if output.exists() {
        debug!(output = %output.display(), "Removing previous output");
        fs::remove_file(output)
            .with_context(|| format!("Failed to remove existing {}", output.display()))?;
    }
    Ok(())
}
