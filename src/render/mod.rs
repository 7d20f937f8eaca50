//! Raster rendering of the fake terminal window.
//!
//! The window chrome (backdrop, shadow, rounded window, traffic-light
//! buttons) is drawn once; every frame copies it and draws the visible
//! tokens on top, then encodes a PNG.

pub mod canvas;
pub mod painter;

use std::io::Cursor;
use std::path::Path;

use anyhow::{Context, Result};
use image::imageops::{self, FilterType};
use image::{ImageFormat, RgbaImage};
use tracing::debug;

use crate::animation::{FrameRenderer, FrameView};
use crate::ansi::{Color, ColorScheme};
use crate::frames::{walk, Point};

use canvas::{drop_shadow, fill, fill_circle, fill_rounded_rect, Rect};
pub use painter::{discover_font, resolve_font, TextPainter};

const MARGIN: u32 = 40;
const BUTTON_RADIUS: f32 = 8.0;
const BUTTON_GAP: f32 = 12.0 + BUTTON_RADIUS * 2.0;
const BUTTONS_INSET: f32 = 20.0 + BUTTON_RADIUS;
const PADDING_Y: u32 = 53;
const PADDING_X: u32 = 13;
const TEXT_INSET: u32 = 10;
const CORNER_RADIUS: f32 = 20.0;
const SHADOW_BLUR: u32 = 6;
const SHADOW_OPACITY: f32 = 0.4;

const CLOSE: Color = Color::hex(0xFF5F58);
const MINIMIZE: Color = Color::hex(0xFFBD2E);
const MAXIMIZE: Color = Color::hex(0x18C132);

/// Geometry of the window for a given terminal content size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLayout {
    pub content_width: u32,
    pub content_height: u32,
}

impl WindowLayout {
    pub fn new(content_width: u32, content_height: u32) -> Self {
        Self {
            content_width,
            content_height,
        }
    }

    pub fn window_width(&self) -> u32 {
        self.content_width + 2 * PADDING_X
    }

    pub fn window_height(&self) -> u32 {
        self.content_height + 2 * PADDING_Y
    }

    /// Full canvas size including the outer margin.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.window_width() + 2 * MARGIN,
            self.window_height() + 2 * MARGIN,
        )
    }

    pub fn window_rect(&self) -> Rect {
        Rect::new(
            MARGIN as f32,
            MARGIN as f32,
            self.window_width() as f32,
            self.window_height() as f32,
        )
    }

    /// Where the first prompt line starts.
    pub fn text_origin(&self) -> Point {
        Point::new(
            (TEXT_INSET + MARGIN + PADDING_X) as f32,
            (TEXT_INSET + MARGIN + PADDING_Y) as f32,
        )
    }

    /// Lowest y coordinate text may reach.
    pub fn text_bottom(&self) -> f32 {
        (MARGIN + PADDING_Y + self.content_height) as f32
    }

    /// Number of whole lines that fit below the origin.
    pub fn visible_lines(&self, line_height: f32) -> usize {
        if line_height <= 0.0 {
            return 0;
        }
        ((self.text_bottom() - self.text_origin().y) / line_height)
            .floor()
            .max(1.0) as usize
    }
}

impl Default for WindowLayout {
    fn default() -> Self {
        Self::new(1300, 800)
    }
}

/// Colors and images for the window chrome.
#[derive(Debug, Clone)]
pub struct Chrome {
    pub window_color: Color,
    pub backdrop: Color,
    pub background_image: Option<RgbaImage>,
}

impl Chrome {
    /// Load the optional background image from disk.
    pub fn load(
        window_color: Color,
        backdrop: Color,
        background_image: Option<&Path>,
    ) -> Result<Self> {
        let background_image = background_image
            .map(|path| {
                image::open(path)
                    .map(|img| img.to_rgba8())
                    .with_context(|| format!("Failed to load background image {}", path.display()))
            })
            .transpose()?;
        Ok(Self {
            window_color,
            backdrop,
            background_image,
        })
    }
}

/// Draw the static part of every frame.
pub fn draw_chrome(layout: &WindowLayout, chrome: &Chrome) -> RgbaImage {
    let (width, height) = layout.canvas_size();
    let mut base = match &chrome.background_image {
        Some(img) => imageops::resize(img, width, height, FilterType::Triangle),
        None => {
            let mut canvas = RgbaImage::new(width, height);
            fill(&mut canvas, chrome.backdrop.with_alpha(255));
            canvas
        }
    };

    let window = layout.window_rect();
    drop_shadow(&mut base, window, CORNER_RADIUS, SHADOW_BLUR, SHADOW_OPACITY);
    fill_rounded_rect(
        &mut base,
        window,
        CORNER_RADIUS,
        chrome.window_color.with_alpha(255),
    );

    let buttons_y = window.y + BUTTONS_INSET;
    for (i, color) in [CLOSE, MINIMIZE, MAXIMIZE].into_iter().enumerate() {
        let x = window.x + BUTTONS_INSET + BUTTON_GAP * i as f32;
        fill_circle(&mut base, x, buttons_y, BUTTON_RADIUS, color.with_alpha(255));
    }
    base
}

/// Renders frames as PNG images with a TrueType font.
#[derive(Debug)]
pub struct TerminalRenderer {
    layout: WindowLayout,
    scheme: ColorScheme,
    painter: TextPainter,
    base: RgbaImage,
}

impl TerminalRenderer {
    pub fn new(
        layout: WindowLayout,
        scheme: ColorScheme,
        chrome: &Chrome,
        painter: TextPainter,
    ) -> Self {
        let base = draw_chrome(&layout, chrome);
        debug!(
            width = base.width(),
            height = base.height(),
            scheme = scheme.name,
            "Prepared window chrome"
        );
        Self {
            layout,
            scheme,
            painter,
            base,
        }
    }

    /// Draw the visible tokens onto a copy of the chrome.
    pub fn draw(&mut self, view: &FrameView<'_>) -> RgbaImage {
        let mut frame = self.base.clone();
        let cursor = walk(
            view.tokens,
            view.origin,
            view.line_height,
            view.font_size,
            self.scheme.reset(),
            &self.painter,
        );

        // Scroll so the last line stays inside the window
        let visible = self.layout.visible_lines(view.line_height);
        let scroll = cursor.lines.saturating_sub(visible) as f32 * view.line_height;
        let top = view.origin.y - 0.5;

        for run in &cursor.runs {
            let y = run.at.y - scroll;
            if y < top {
                continue;
            }
            self.painter.draw(
                &mut frame,
                run.text,
                run.at.x,
                y,
                view.font_size,
                run.color.with_alpha(255),
            );
        }
        frame
    }
}

impl FrameRenderer for TerminalRenderer {
    fn origin(&self) -> Point {
        self.layout.text_origin()
    }

    fn render(&mut self, view: &FrameView<'_>) -> Result<Vec<u8>> {
        let frame = self.draw(view);
        encode_png(&frame)
    }
}

/// Encode a canvas as PNG bytes.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("Failed to encode frame as PNG")?;
    Ok(bytes)
}
