//! Command line definition.
//!
//! Lives in the library so the man page generator can reuse it.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::config::{MAX_FPS, MIN_FPS};

#[cfg(not(feature = "release"))]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("TERMGIF_BUILD_DATE"),
    ")"
);

#[cfg(feature = "release")]
const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("TERMGIF_BUILD_DATE"),
    ")"
);

/// Render scripted terminal-typing demos into looping GIFs.
#[derive(Debug, Parser)]
#[command(
    name = "termgif",
    version,
    long_version = LONG_VERSION,
    about,
    arg_required_else_help = true
)]
pub struct Cli {
    /// More log output (-v info, -vv debug). TERMGIF_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a script through the interpreter and render it as a GIF
    Render(RenderArgs),

    /// Show how many frames each command produces
    Plan(PlanArgs),

    /// List the built-in color schemes
    Schemes,

    /// Inspect or create the config file
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Print shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Demo script (TOML with [[commands]] entries)
    pub script: PathBuf,

    /// Output GIF path [default from config: demo.gif]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Frames per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(i64::from(MIN_FPS)..=i64::from(MAX_FPS)))]
    pub fps: Option<u32>,

    /// Color scheme name (see `termgif schemes`)
    #[arg(long)]
    pub scheme: Option<String>,

    /// Monospace TTF/OTF font file
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Write frames here instead of a temporary directory
    #[arg(long)]
    pub frames_dir: Option<PathBuf>,

    /// Keep the frame images after encoding (needs --frames-dir)
    #[arg(long, requires = "frames_dir")]
    pub keep_frames: bool,

    /// Open the GIF when done
    #[arg(long)]
    pub open: bool,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Demo script
    pub script: PathBuf,

    /// Frames per second
    #[arg(long, value_parser = clap::value_parser!(u32).range(i64::from(MIN_FPS)..=i64::from(MAX_FPS)))]
    pub fps: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a default config file if none exists
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
