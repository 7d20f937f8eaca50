//! Demo scripts.
//!
//! A script is the ordered list of commands typed into the fake terminal:
//!
//! ```toml
//! [[commands]]
//! text = "1 + 2 * 3"
//! delay = 5
//!
//! [[commands]]
//! text = "'Hello'.repeat(3)"
//! delay = 2.5
//! font_size = 26
//! ```

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Seconds the result of a command stays on screen when `delay` is omitted.
pub const DEFAULT_DELAY_SECS: f64 = 3.0;

fn default_delay() -> f64 {
    DEFAULT_DELAY_SECS
}

/// One command of the demo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoCommand {
    /// Source text typed after the prompt and sent to the interpreter.
    pub text: String,
    /// Seconds to hold the frame after the output is revealed.
    #[serde(default = "default_delay")]
    pub delay: f64,
    /// Font size override in pixels while this command is on screen.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f32>,
}

impl DemoCommand {
    pub fn new(text: impl Into<String>, delay: f64) -> Self {
        Self {
            text: text.into(),
            delay,
            font_size: None,
        }
    }

    /// Number of characters typed, one frame each.
    pub fn typed_len(&self) -> usize {
        self.text.chars().count()
    }
}

/// An ordered, non-empty list of demo commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Script {
    pub commands: Vec<DemoCommand>,
}

impl Script {
    /// Load and validate a script file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read script {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid script {}", path.display()))
    }

    /// Parse and validate a script from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let script: Script = toml::from_str(content)?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        if self.commands.is_empty() {
            bail!("Script has no commands");
        }
        for (i, command) in self.commands.iter().enumerate() {
            if command.text.contains(['\n', '\r']) {
                bail!(
                    "Command {} contains a line break; each command is typed on one line",
                    i + 1
                );
            }
            if !command.delay.is_finite() || command.delay < 0.0 {
                bail!("Command {} has an invalid delay: {}", i + 1, command.delay);
            }
            if let Some(size) = command.font_size {
                if !size.is_finite() || size <= 0.0 {
                    bail!("Command {} has an invalid font_size: {}", i + 1, size);
                }
            }
        }
        Ok(())
    }

    /// Command texts in order, as sent to the interpreter.
    pub fn sources(&self) -> Vec<String> {
        self.commands.iter().map(|c| c.text.clone()).collect()
    }
}
