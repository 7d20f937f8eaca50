//! Frame progress bar for the render command.
//!
//! Draws `  37.50% [=======             ] ( 45 / 120)` on stderr, redrawn in
//! place with a line clear.

use std::io::{self, Write};

/// Width of the bar body between the brackets.
pub const BAR_WIDTH: usize = 80;

const CLEAR_LINE: &str = "\x1b[2K\r";

/// Columns taken by everything except the bar body.
fn decoration_width(total: usize) -> usize {
    let digits = total.to_string().len();
    // "100.00%" + " [" + "] " + "(" digits " / " digits ")"
    7 + 2 + 2 + 2 * digits + 5
}

/// Bar body width for a terminal `columns` wide: [`BAR_WIDTH`], narrowed so
/// the whole line still fits.
pub fn bar_width_for(columns: usize, total: usize) -> usize {
    BAR_WIDTH.min(columns.saturating_sub(decoration_width(total)))
}

/// Format one progress line with a bar body `bar_width` wide.
pub fn format_progress(frame: usize, total: usize, bar_width: usize) -> String {
    let fraction = if total == 0 {
        1.0
    } else {
        (frame as f64 / total as f64).clamp(0.0, 1.0)
    };
    let digits = total.to_string().len();
    let filled = (bar_width as f64 * fraction).floor() as usize;

    format!(
        "{:>6.2}% [{}{}] ({:>digits$} / {})",
        fraction * 100.0,
        "=".repeat(filled),
        " ".repeat(bar_width - filled),
        frame.min(total),
        total
    )
}

/// In-place progress line. Silent when stderr is not a terminal.
pub struct ProgressBar {
    total: usize,
    bar_width: usize,
    enabled: bool,
}

impl ProgressBar {
    pub fn new(total: usize) -> Self {
        let enabled = atty::is(atty::Stream::Stderr);
        let bar_width = terminal_size::terminal_size()
            .map(|(w, _)| bar_width_for(w.0 as usize, total))
            .unwrap_or(BAR_WIDTH);
        Self {
            total,
            bar_width,
            enabled,
        }
    }

    /// A bar that never draws.
    pub fn hidden(total: usize) -> Self {
        Self {
            total,
            bar_width: BAR_WIDTH,
            enabled: false,
        }
    }

    pub fn update(&self, frame: usize) {
        if !self.enabled {
            return;
        }
        let line = format_progress(frame, self.total, self.bar_width);
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "{}{}", CLEAR_LINE, line);
        let _ = stderr.flush();
    }

    /// Clear the line so later output starts clean.
    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "{}", CLEAR_LINE);
        let _ = stderr.flush();
    }
}
