//! Glyph rasterization with fontdue.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use fontdue::{Font, FontSettings};
use image::RgbaImage;
use tracing::debug;

use super::canvas::{blend_mask, GlyphMask};
use crate::frames::TextMeasure;

/// Monospace fonts tried when no font is configured, in order.
const FONT_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/SFNSMono.ttf",
    "/Library/Fonts/SF-Mono-Regular.otf",
    "/System/Library/Fonts/Menlo.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/TTF/DejaVuSansMono.ttf",
    "/usr/share/fonts/dejavu/DejaVuSansMono.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/liberation-mono/LiberationMono-Regular.ttf",
    "C:\\Windows\\Fonts\\consola.ttf",
];

/// First well-known monospace font present on this system.
pub fn discover_font() -> Option<PathBuf> {
    FONT_CANDIDATES
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// Resolve the configured font, falling back to discovery.
pub fn resolve_font(configured: Option<&Path>) -> Result<PathBuf> {
    match configured {
        Some(path) if path.is_file() => Ok(path.to_path_buf()),
        Some(path) => Err(anyhow!("Font file not found: {}", path.display())),
        None => discover_font().ok_or_else(|| {
            anyhow!("No monospace font found. Set render.font_path in the config or pass --font")
        }),
    }
}

#[derive(Debug, Clone)]
struct CachedGlyph {
    xmin: i32,
    ymin: i32,
    mask: GlyphMask,
}

/// Draws text runs with a single font at varying sizes.
pub struct TextPainter {
    font: Font,
    glyphs: HashMap<(char, u32), CachedGlyph>,
}

impl std::fmt::Debug for TextPainter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextPainter")
            .field("cached_glyphs", &self.glyphs.len())
            .finish()
    }
}

impl TextPainter {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read font {}", path.display()))?;
        let font = Font::from_bytes(bytes, FontSettings::default())
            .map_err(|e| anyhow!("Failed to parse font {}: {}", path.display(), e))?;
        debug!(font = %path.display(), "Loaded font");
        Ok(Self {
            font,
            glyphs: HashMap::new(),
        })
    }

    fn ascent(&self, font_size: f32) -> f32 {
        self.font
            .horizontal_line_metrics(font_size)
            .map(|m| m.ascent)
            .unwrap_or(font_size * 0.8)
    }

    fn glyph(&mut self, c: char, font_size: f32) -> &CachedGlyph {
        let font = &self.font;
        self.glyphs
            .entry((c, font_size.to_bits()))
            .or_insert_with(|| {
                let (metrics, coverage) = font.rasterize(c, font_size);
                CachedGlyph {
                    xmin: metrics.xmin,
                    ymin: metrics.ymin,
                    mask: GlyphMask {
                        width: metrics.width,
                        height: metrics.height,
                        coverage,
                    },
                }
            })
    }

    /// Draw `text` with its top-left corner at (x, y).
    pub fn draw(
        &mut self,
        canvas: &mut RgbaImage,
        text: &str,
        x: f32,
        y: f32,
        font_size: f32,
        color: [u8; 4],
    ) {
        let baseline = y + self.ascent(font_size);
        let mut pen_x = x;
        for c in text.chars() {
            let advance = self.font.metrics(c, font_size).advance_width;
            let glyph = self.glyph(c, font_size);
            if glyph.mask.width > 0 && glyph.mask.height > 0 {
                let gx = (pen_x + glyph.xmin as f32).round() as i64;
                let gy = (baseline - glyph.mask.height as f32 - glyph.ymin as f32).round() as i64;
                blend_mask(canvas, gx, gy, &glyph.mask, color);
            }
            pen_x += advance;
        }
    }
}

impl TextMeasure for TextPainter {
    fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars()
            .map(|c| self.font.metrics(c, font_size).advance_width)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_configured_font_is_an_error() {
        let err = resolve_font(Some(Path::new("/nonexistent/font.ttf"))).unwrap_err();
        assert!(err.to_string().contains("Font file not found"));
    }

    #[test]
    fn configured_font_is_used_as_is() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mono.ttf");
        fs::write(&path, b"not really a font").unwrap();
        assert_eq!(resolve_font(Some(&path)).unwrap(), path);
    }

    #[test]
    fn unparsable_font_fails_to_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.ttf");
        fs::write(&path, b"not really a font").unwrap();
        let err = TextPainter::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse font"));
    }

    #[test]
    fn discovered_font_renders_visible_pixels() {
        // Only meaningful on machines with one of the well-known fonts
        let Some(path) = discover_font() else {
            return;
        };
        let mut painter = TextPainter::load(&path).unwrap();
        let mut canvas = RgbaImage::from_pixel(80, 40, image::Rgba([0, 0, 0, 255]));
        painter.draw(&mut canvas, "Hi", 2.0, 2.0, 22.0, [255, 255, 255, 255]);
        assert!(canvas.pixels().any(|p| p.0[0] > 0));
        assert!(painter.text_width("Hi", 22.0) > 0.0);
    }
}
