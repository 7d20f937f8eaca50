//! Color scheme tables.
//!
//! A scheme maps the closed set of recognized SGR sequences (reset, the 8
//! standard foreground colors and their 8 bright variants) to display colors,
//! plus one background color. Anything outside that set is not recognized
//! and is rendered as literal text by the parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const RESET: &str = "\x1b[0m";

pub const BLACK: &str = "\x1b[30m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";
pub const CYAN: &str = "\x1b[36m";
pub const WHITE: &str = "\x1b[37m";

pub const BRIGHT_BLACK: &str = "\x1b[90m";
pub const BRIGHT_RED: &str = "\x1b[91m";
pub const BRIGHT_GREEN: &str = "\x1b[92m";
pub const BRIGHT_YELLOW: &str = "\x1b[93m";
pub const BRIGHT_BLUE: &str = "\x1b[94m";
pub const BRIGHT_MAGENTA: &str = "\x1b[95m";
pub const BRIGHT_CYAN: &str = "\x1b[96m";
pub const BRIGHT_WHITE: &str = "\x1b[97m";

/// Sequences interpreters commonly emit that no scheme maps.
///
/// Background colors (40-47, 100-107) and the bold/underline/reverse
/// attributes. They reach the renderer as literal text.
pub const UNUSED_SEQUENCES: &[&str] = &[
    "\x1b[40m", "\x1b[41m", "\x1b[42m", "\x1b[43m", "\x1b[44m", "\x1b[45m", "\x1b[46m",
    "\x1b[47m", "\x1b[100m", "\x1b[101m", "\x1b[102m", "\x1b[103m", "\x1b[104m", "\x1b[105m",
    "\x1b[106m", "\x1b[107m", "\x1b[1m", "\x1b[4m", "\x1b[7m",
];

/// An opaque RGB display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build a color from a `0xRRGGBB` literal.
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    /// RGBA pixel with the given alpha.
    pub fn with_alpha(self, alpha: u8) -> [u8; 4] {
        [self.r, self.g, self.b, alpha]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when a color string is neither `#rrggbb` nor `rgb(r, g, b)`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color '{0}': expected #rrggbb or rgb(r, g, b)")]
pub struct ColorParseError(pub String);

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let invalid = || ColorParseError(s.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            if hex.len() != 6 || !hex.is_ascii() {
                return Err(invalid());
            }
            let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
            return Ok(Self::hex(value));
        }

        let inner = trimmed
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(invalid)?;
        let channels = inner
            .split(',')
            .map(|part| part.trim().parse::<u8>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| invalid())?;
        match channels.as_slice() {
            [r, g, b] => Ok(Self::rgb(*r, *g, *b)),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// A fixed mapping from recognized escape sequences to colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorScheme {
    pub name: &'static str,
    pub background: Color,
    entries: &'static [(&'static str, Color)],
}

impl ColorScheme {
    /// Color mapped to an exact escape sequence, if recognized.
    pub fn color_for(&self, sequence: &str) -> Option<Color> {
        self.entries
            .iter()
            .find(|(key, _)| *key == sequence)
            .map(|(_, color)| *color)
    }

    /// The reset (default foreground) color.
    pub fn reset(&self) -> Color {
        self.color_for(RESET).unwrap_or(Color::rgb(255, 255, 255))
    }

    pub fn background(&self) -> Color {
        self.background
    }

    /// All recognized escape sequences.
    pub fn recognized_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    /// Look up a built-in scheme by case-insensitive name.
    ///
    /// Separators are ignored, so `one-half-dark` and `onehalfdark` match.
    pub fn by_name(name: &str) -> Option<&'static ColorScheme> {
        let wanted: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        BUILTIN_SCHEMES.iter().copied().find(|scheme| {
            scheme
                .name
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .eq(wanted.chars())
        })
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        DRACULA
    }
}

pub const VGA: ColorScheme = ColorScheme {
    name: "vga",
    background: Color::rgb(0, 0, 0),
    entries: &[
        (RESET, Color::rgb(255, 255, 255)),
        (BLACK, Color::rgb(0, 0, 0)),
        (RED, Color::rgb(128, 0, 0)),
        (GREEN, Color::rgb(0, 128, 0)),
        (YELLOW, Color::rgb(128, 128, 0)),
        (BLUE, Color::rgb(0, 0, 128)),
        (MAGENTA, Color::rgb(128, 0, 128)),
        (CYAN, Color::rgb(0, 128, 128)),
        (WHITE, Color::rgb(192, 192, 192)),
        (BRIGHT_BLACK, Color::rgb(128, 128, 128)),
        (BRIGHT_RED, Color::rgb(255, 0, 0)),
        (BRIGHT_GREEN, Color::rgb(0, 255, 0)),
        (BRIGHT_YELLOW, Color::rgb(255, 255, 0)),
        (BRIGHT_BLUE, Color::rgb(0, 0, 255)),
        (BRIGHT_MAGENTA, Color::rgb(255, 0, 255)),
        (BRIGHT_CYAN, Color::rgb(0, 255, 255)),
        (BRIGHT_WHITE, Color::rgb(255, 255, 255)),
    ],
};

pub const UBUNTU: ColorScheme = ColorScheme {
    name: "ubuntu",
    background: Color::rgb(48, 10, 36),
    entries: &[
        (RESET, Color::hex(0xeeeeec)),
        (BLACK, Color::hex(0x2e3436)),
        (RED, Color::hex(0x3465a4)),
        (GREEN, Color::hex(0x4e9a06)),
        (YELLOW, Color::hex(0x06989a)),
        (BLUE, Color::hex(0xcc0000)),
        (MAGENTA, Color::hex(0x75507b)),
        (CYAN, Color::hex(0xc4a000)),
        (WHITE, Color::hex(0xd3d7cf)),
        (BRIGHT_BLACK, Color::hex(0x555753)),
        (BRIGHT_RED, Color::hex(0x729fcf)),
        (BRIGHT_GREEN, Color::hex(0x8ae234)),
        (BRIGHT_YELLOW, Color::hex(0x34e2e2)),
        (BRIGHT_BLUE, Color::hex(0xef2929)),
        (BRIGHT_MAGENTA, Color::hex(0xad7fa8)),
        (BRIGHT_CYAN, Color::hex(0xfce94f)),
        (BRIGHT_WHITE, Color::hex(0xeeeeec)),
    ],
};

pub const DRACULA: ColorScheme = ColorScheme {
    name: "dracula",
    background: Color::hex(0x282a36),
    entries: &[
        (RESET, Color::hex(0xF8F8F2)),
        (BLACK, Color::hex(0x21222C)),
        (RED, Color::hex(0xFF5555)),
        (GREEN, Color::hex(0x50FA7B)),
        (YELLOW, Color::hex(0xF1FA8C)),
        (BLUE, Color::hex(0xBD93F9)),
        (MAGENTA, Color::hex(0xFF79C6)),
        (CYAN, Color::hex(0x8BE9FD)),
        (WHITE, Color::hex(0xF8F8F2)),
        (BRIGHT_BLACK, Color::hex(0x6272A4)),
        (BRIGHT_RED, Color::hex(0xFF6E6E)),
        (BRIGHT_GREEN, Color::hex(0x69FF94)),
        (BRIGHT_YELLOW, Color::hex(0xFFFFA5)),
        (BRIGHT_BLUE, Color::hex(0xD6ACFF)),
        (BRIGHT_MAGENTA, Color::hex(0xFF92DF)),
        (BRIGHT_CYAN, Color::hex(0xA4FFFF)),
        (BRIGHT_WHITE, Color::hex(0xFFFFFF)),
    ],
};

pub const ONE_HALF_DARK: ColorScheme = ColorScheme {
    name: "one-half-dark",
    background: Color::hex(0x282C34),
    entries: &[
        (RESET, Color::hex(0xDCDFE4)),
        (BLACK, Color::hex(0x282C34)),
        (RED, Color::hex(0xE06C75)),
        (GREEN, Color::hex(0x98C379)),
        (YELLOW, Color::hex(0xE5C07B)),
        (BLUE, Color::hex(0x61AFEF)),
        (MAGENTA, Color::hex(0xC678DD)),
        (CYAN, Color::hex(0x56B6C2)),
        (WHITE, Color::hex(0xDCDFE4)),
        (BRIGHT_BLACK, Color::hex(0x5A6374)),
        (BRIGHT_RED, Color::hex(0xE06C75)),
        (BRIGHT_GREEN, Color::hex(0x98C379)),
        (BRIGHT_YELLOW, Color::hex(0xE5C07B)),
        (BRIGHT_BLUE, Color::hex(0x61AFEF)),
        (BRIGHT_MAGENTA, Color::hex(0xC678DD)),
        (BRIGHT_CYAN, Color::hex(0x56B6C2)),
        (BRIGHT_WHITE, Color::hex(0xDCDFE4)),
    ],
};

/// Built-in schemes in display order.
pub const BUILTIN_SCHEMES: &[&ColorScheme] = &[&VGA, &UBUNTU, &DRACULA, &ONE_HALF_DARK];
