//! Frame counts per command.

use crate::script::DemoCommand;

/// Frames a hold of `delay_secs` lasts at `fps`.
pub fn hold_frames(delay_secs: f64, fps: u32) -> usize {
    (delay_secs * f64::from(fps)).round().max(0.0) as usize
}

/// Frame counts for the three phases of one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandFrames {
    /// One frame per typed character.
    pub typing: usize,
    /// The output appears in a single frame.
    pub reveal: usize,
    /// Repeats of the reveal frame.
    pub hold: usize,
}

impl CommandFrames {
    pub fn for_command(command: &DemoCommand, fps: u32) -> Self {
        Self {
            typing: command.typed_len(),
            reveal: 1,
            hold: hold_frames(command.delay, fps),
        }
    }

    pub fn total(&self) -> usize {
        self.typing + self.reveal + self.hold
    }
}

/// Frame counts for a whole script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FramePlan {
    pub fps: u32,
    pub commands: Vec<CommandFrames>,
}

impl FramePlan {
    pub fn new(commands: &[DemoCommand], fps: u32) -> Self {
        Self {
            fps,
            commands: commands
                .iter()
                .map(|command| CommandFrames::for_command(command, fps))
                .collect(),
        }
    }

    pub fn total_frames(&self) -> usize {
        self.commands.iter().map(CommandFrames::total).sum()
    }

    /// Playback length of the finished animation.
    pub fn duration_secs(&self) -> f64 {
        if self.fps == 0 {
            return 0.0;
        }
        self.total_frames() as f64 / f64::from(self.fps)
    }
}
