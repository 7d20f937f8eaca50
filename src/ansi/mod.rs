//! ANSI output parsing.
//!
//! Turns the combined interpreter output into per-command token sequences.
//! Only the fixed 16-color palette plus reset is understood; every other
//! escape sequence stays in the text and is drawn literally.

pub mod scheme;

use std::sync::OnceLock;

use regex::Regex;

pub use scheme::{Color, ColorScheme};

/// Default marker the interpreter prints between command outputs.
pub const DEFAULT_END_OF_RECORD: &str = "#[END-OF-OUTPUT]#";

/// One drawable unit of terminal output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal run drawn at the cursor. Never empty.
    Text(String),
    /// Switch the drawing color for following text.
    ColorChange(Color),
    /// Return to the line start and move down one line.
    Newline,
}

/// Errors from splitting interpreter output into records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Interpreter produced {actual} output record(s) for {expected} command(s)")]
    RecordCount { expected: usize, actual: usize },
}

fn delimiter_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\x1b\[[0-9]{1,2}m|\n").expect("valid delimiter regex"))
}

/// Split the combined output into exactly `expected` records.
///
/// Interpreters that terminate every record (rather than separate them)
/// leave one empty trailing segment, which is dropped.
pub fn split_records<'a>(
    output: &'a str,
    marker: &str,
    expected: usize,
) -> Result<Vec<&'a str>, ParseError> {
    let mut records: Vec<&str> = output.split(marker).collect();

    if records.len() == expected + 1 && records.last().is_some_and(|r| r.trim().is_empty()) {
        records.pop();
    }

    if records.len() != expected {
        return Err(ParseError::RecordCount {
            expected,
            actual: records.len(),
        });
    }
    Ok(records)
}

/// Split `segment` on color sequences and line feeds, keeping the delimiters.
fn split_keep_delimiters(segment: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut last = 0;
    for found in delimiter_pattern().find_iter(segment) {
        fragments.push(&segment[last..found.start()]);
        fragments.push(found.as_str());
        last = found.end();
    }
    fragments.push(&segment[last..]);
    fragments
}

/// Tokenize one command's output.
pub fn tokenize(segment: &str, scheme: &ColorScheme) -> Vec<Token> {
    split_keep_delimiters(segment)
        .into_iter()
        .filter_map(|fragment| {
            if let Some(color) = scheme.color_for(fragment) {
                Some(Token::ColorChange(color))
            } else if fragment == "\n" {
                Some(Token::Newline)
            } else if !fragment.is_empty() {
                Some(Token::Text(fragment.to_string()))
            } else {
                None
            }
        })
        .collect()
}

/// Split the combined output into records and tokenize each.
pub fn parse_output(
    output: &str,
    marker: &str,
    expected: usize,
    scheme: &ColorScheme,
) -> Result<Vec<Vec<Token>>, ParseError> {
    Ok(split_records(output, marker, expected)?
        .into_iter()
        .map(|record| tokenize(record, scheme))
        .collect())
}

/// Rebuild the visible text: text runs and line feeds, colors dropped.
pub fn plain_text(tokens: &[Token]) -> String {
    let mut text = String::new();
    for token in tokens {
        match token {
            Token::Text(value) => text.push_str(value),
            Token::Newline => text.push('\n'),
            Token::ColorChange(_) => {}
        }
    }
    text
}
