//! termgif renders scripted terminal-typing demos into looping GIFs.
//!
//! A script's commands are piped through an external interpreter, the
//! ANSI-colored output of each command is parsed into tokens, and a fake
//! terminal window is animated frame by frame: typing, output reveal, hold.
//! The frames are then stitched into a GIF with ffmpeg.
//!
//! # Module Structure
//!
//! - [`ansi`] - color schemes and the output parser
//! - [`frames`] - visible token state, frame plan and cursor walk
//! - [`animation`] - the frame generation loop
//! - [`render`] - raster window chrome and text
//! - [`interpreter`] - the subprocess bridge
//! - [`encode`] - frame files, scratch directory and ffmpeg
//! - [`pipeline`] - one complete run

pub mod animation;
pub mod ansi;
pub mod cli;
pub mod config;
pub mod encode;
pub mod frames;
pub mod interpreter;
pub mod opener;
pub mod pipeline;
pub mod progress;
pub mod render;
pub mod script;

pub use ansi::{Color, ColorScheme, Token};
pub use config::Config;
pub use pipeline::{Pipeline, RunSummary};
pub use script::{DemoCommand, Script};
