//! User configuration.
//!
//! Stored as TOML at `$TERMGIF_CONFIG` or `<config dir>/termgif/config.toml`.
//! Every field has a default, so an empty or missing file is valid.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::ansi::{Color, ColorScheme, DEFAULT_END_OF_RECORD};

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "TERMGIF_CONFIG";

/// Environment variable overriding the interpreter command line.
pub const INTERPRETER_ENV: &str = "TERMGIF_INTERPRETER";

/// Accepted frame rates, shared with the `--fps` flag.
pub const MIN_FPS: u32 = 1;
pub const MAX_FPS: u32 = 100;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub interpreter: InterpreterConfig,
    pub render: RenderConfig,
    pub output: OutputConfig,
}

/// The external program that evaluates the demo commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Program to run. Required before rendering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    /// Extra arguments passed to the program.
    pub args: Vec<String>,
    /// Marker the program prints between command outputs.
    pub end_of_record: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            program: None,
            args: Vec::new(),
            end_of_record: DEFAULT_END_OF_RECORD.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub fps: u32,
    /// Built-in color scheme name (vga, ubuntu, dracula, one-half-dark).
    pub scheme: String,
    pub prompt: String,
    /// Monospace TTF/OTF font. Discovered from well-known paths when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
    pub line_height: f32,
    /// Terminal content area in pixels.
    pub width: u32,
    pub height: u32,
    /// Image drawn behind the window, scaled to the canvas.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_image: Option<PathBuf>,
    /// Solid color behind the window when no image is set.
    pub backdrop: Color,
    pub window_color: Color,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fps: 18,
            scheme: "dracula".to_string(),
            prompt: "> ".to_string(),
            font_path: None,
            font_size: 22.0,
            line_height: 24.0,
            width: 1300,
            height: 800,
            background_image: None,
            backdrop: Color::hex(0x1d1e26),
            window_color: Color::hex(0x282D35),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
    /// Keep frames here instead of a temporary directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frames_dir: Option<PathBuf>,
    /// Leave frames in `frames_dir` after encoding.
    pub keep_frames: bool,
    pub ffmpeg: String,
    /// Open the GIF once it is written.
    pub open: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("demo.gif"),
            frames_dir: None,
            keep_frames: false,
            ffmpeg: "ffmpeg".to_string(),
            open: false,
        }
    }
}

impl Config {
    /// Location of the config file.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().ok_or_else(|| anyhow!("Could not determine config directory"))?;
        Ok(dir.join("termgif").join("config.toml"))
    }

    /// Load the config file (defaults when missing) and apply environment
    /// overrides.
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from a specific file. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse and validate a config from TOML text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values that parse but cannot be rendered.
    pub fn validate(&self) -> Result<()> {
        let render = &self.render;
        if !(MIN_FPS..=MAX_FPS).contains(&render.fps) {
            bail!(
                "render.fps must be between {} and {}, got {}",
                MIN_FPS,
                MAX_FPS,
                render.fps
            );
        }
        if !render.font_size.is_finite() || render.font_size <= 0.0 {
            bail!("render.font_size must be positive, got {}", render.font_size);
        }
        if !render.line_height.is_finite() || render.line_height <= 0.0 {
            bail!(
                "render.line_height must be positive, got {}",
                render.line_height
            );
        }
        if render.width == 0 || render.height == 0 {
            bail!(
                "render.width and render.height must be positive, got {}x{}",
                render.width,
                render.height
            );
        }
        Ok(())
    }

    /// Write the config to its default location, creating directories.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)
            .with_context(|| format!("Failed to write config {}", path.display()))
    }

    /// `TERMGIF_INTERPRETER` replaces the interpreter command line.
    ///
    /// The value is split on whitespace: program first, then arguments.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(value) = env::var(INTERPRETER_ENV) {
            self.interpreter.override_command(&value);
        }
    }

    /// The configured color scheme.
    pub fn scheme(&self) -> Result<ColorScheme> {
        ColorScheme::by_name(&self.render.scheme)
            .copied()
            .ok_or_else(|| {
                anyhow!(
                    "Unknown color scheme '{}'. Run `termgif schemes` to list them",
                    self.render.scheme
                )
            })
    }
}

impl InterpreterConfig {
    /// Replace program and arguments from a whitespace-separated command line.
    pub fn override_command(&mut self, command_line: &str) {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        if let Some(program) = parts.next() {
            self.program = Some(program);
            self.args = parts.collect();
        }
    }

    /// The program to run, or an error explaining how to configure it.
    pub fn require_program(&self) -> Result<&str> {
        self.program
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(
                    "No interpreter configured. Set [interpreter].program in the config file or {}",
                    INTERPRETER_ENV
                )
            })
    }
}
