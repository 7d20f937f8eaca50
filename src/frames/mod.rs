//! Terminal frame state.
//!
//! - [`state`]: the append-only list of visible tokens
//! - [`cursor`]: the cursor walk that places text runs
//! - [`plan`]: how many frames each command produces

pub mod cursor;
pub mod plan;
pub mod state;

pub use cursor::{walk, CursorLayout, Point, TextMeasure, TextRun};
pub use plan::{hold_frames, CommandFrames, FramePlan};
pub use state::FrameState;
