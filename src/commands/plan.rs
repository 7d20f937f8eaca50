//! Plan subcommand handler

use anyhow::Result;
use unicode_width::UnicodeWidthChar;

use termgif::cli::PlanArgs;
use termgif::frames::FramePlan;
use termgif::{Config, Script};

/// Widest command preview shown in the table.
const PREVIEW_COLUMNS: usize = 40;

/// `text` cut to `max` display columns.
fn preview(text: &str, max: usize) -> String {
    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max {
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}

/// Table of per-command frame counts with a total line.
pub fn format_plan(script: &Script, plan: &FramePlan) -> String {
    let mut out = format!(
        "{:>2}  {:>6}  {:>6}  {:>4}  {:>6}  {}\n",
        "#", "typing", "reveal", "hold", "frames", "command"
    );
    for (i, (command, frames)) in script.commands.iter().zip(&plan.commands).enumerate() {
        out.push_str(&format!(
            "{:>2}  {:>6}  {:>6}  {:>4}  {:>6}  {}\n",
            i + 1,
            frames.typing,
            frames.reveal,
            frames.hold,
            frames.total(),
            preview(&command.text, PREVIEW_COLUMNS)
        ));
    }
    out.push_str(&format!(
        "total: {} frames, {:.2}s at {} fps",
        plan.total_frames(),
        plan.duration_secs(),
        plan.fps
    ));
    out
}

/// Print the frame plan of a script without rendering it.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: PlanArgs) -> Result<()> {
    let script = Script::load(&args.script)?;
    let fps = match args.fps {
        Some(fps) => fps,
        None => Config::load()?.render.fps,
    };
    let plan = FramePlan::new(&script.commands, fps);
    println!("{}", format_plan(&script, &plan));
    Ok(())
}
