//! Schemes subcommand handler

use anyhow::Result;

use termgif::ansi::scheme::{BUILTIN_SCHEMES, RESET};
use termgif::{Color, ColorScheme, Config};

/// Truecolor background swatch.
fn swatch(color: Color) -> String {
    format!("\x1b[48;2;{};{};{}m  \x1b[0m", color.r, color.g, color.b)
}

/// One line per scheme: name, background, reset color and a marker for the
/// configured one. Swatches of every recognized color when `color` is set.
pub fn format_schemes(schemes: &[&ColorScheme], current: &str, color: bool) -> String {
    schemes
        .iter()
        .map(|scheme| {
            let marker = if scheme.name == current { "*" } else { " " };
            let mut line = format!(
                "{} {:<14} background {}  text {}",
                marker,
                scheme.name,
                scheme.background(),
                scheme.reset()
            );
            if color {
                line.push_str("  ");
                for key in scheme.recognized_keys().filter(|k| *k != RESET) {
                    if let Some(c) = scheme.color_for(key) {
                        line.push_str(&swatch(c));
                    }
                }
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// List the built-in color schemes.
#[cfg(not(tarpaulin_include))]
pub fn handle() -> Result<()> {
    let config = Config::load()?;
    let current = ColorScheme::by_name(&config.render.scheme)
        .map(|scheme| scheme.name)
        .unwrap_or_default();
    let color = atty::is(atty::Stream::Stdout);
    println!("{}", format_schemes(BUILTIN_SCHEMES, current, color));
    Ok(())
}
