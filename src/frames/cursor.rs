//! Cursor bookkeeping over a token list.

use crate::ansi::{Color, Token};

/// Measures the rendered width of a text run in pixels.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A text token placed at its top-left corner with its drawing color.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun<'a> {
    pub text: &'a str,
    pub at: Point,
    pub color: Color,
}

/// Result of walking a token list from an origin.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorLayout<'a> {
    pub runs: Vec<TextRun<'a>>,
    /// Cursor position after the last token.
    pub end: Point,
    /// Number of lines touched, counting the first.
    pub lines: usize,
}

/// Walk `tokens` from `origin`.
///
/// Text advances x by its width, Newline returns x to the origin and moves
/// down one `line_height`, ColorChange only affects the color of later runs.
/// The walk has no state outside its arguments, so every frame can redo it.
pub fn walk<'a>(
    tokens: &'a [Token],
    origin: Point,
    line_height: f32,
    font_size: f32,
    initial_color: Color,
    measure: &dyn TextMeasure,
) -> CursorLayout<'a> {
    let mut cursor = origin;
    let mut color = initial_color;
    let mut lines = 1;
    let mut runs = Vec::new();

    for token in tokens {
        match token {
            Token::Text(value) => {
                runs.push(TextRun {
                    text: value,
                    at: cursor,
                    color,
                });
                cursor.x += measure.text_width(value, font_size);
            }
            Token::ColorChange(next) => color = *next,
            Token::Newline => {
                cursor.x = origin.x;
                cursor.y += line_height;
                lines += 1;
            }
        }
    }

    CursorLayout {
        runs,
        end: cursor,
        lines,
    }
}
