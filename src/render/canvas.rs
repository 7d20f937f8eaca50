//! Pixel drawing on RGBA canvases.

use image::{Rgba, RgbaImage};

/// Alpha-blend `src` over the pixel at (x, y). Out-of-bounds is ignored.
pub fn blend_pixel(canvas: &mut RgbaImage, x: i64, y: i64, src: [u8; 4]) {
    if x < 0 || y < 0 || x >= i64::from(canvas.width()) || y >= i64::from(canvas.height()) {
        return;
    }
    let alpha = u16::from(src[3]);
    if alpha == 0 {
        return;
    }

    let dst = canvas.get_pixel_mut(x as u32, y as u32);
    let inv_alpha = 255 - alpha;
    let mix = |s: u8, d: u8| ((u16::from(s) * alpha + u16::from(d) * inv_alpha) / 255) as u8;
    let out_alpha = alpha + (u16::from(dst.0[3]) * inv_alpha) / 255;
    *dst = Rgba([
        mix(src[0], dst.0[0]),
        mix(src[1], dst.0[1]),
        mix(src[2], dst.0[2]),
        out_alpha.min(255) as u8,
    ]);
}

/// Scale the alpha channel of `color` by a coverage in 0..=1.
fn with_coverage(color: [u8; 4], coverage: f32) -> [u8; 4] {
    let alpha = (f32::from(color[3]) * coverage.clamp(0.0, 1.0)).round() as u8;
    [color[0], color[1], color[2], alpha]
}

/// Fill the whole canvas with an opaque color.
pub fn fill(canvas: &mut RgbaImage, color: [u8; 4]) {
    for pixel in canvas.pixels_mut() {
        *pixel = Rgba(color);
    }
}

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Grow on every side by `by` pixels.
    pub fn inflate(&self, by: f32) -> Self {
        Self::new(self.x - by, self.y - by, self.w + 2.0 * by, self.h + 2.0 * by)
    }
}

/// Fill a rectangle with rounded corners, antialiasing the corner arcs.
pub fn fill_rounded_rect(canvas: &mut RgbaImage, rect: Rect, radius: f32, color: [u8; 4]) {
    let radius = radius.min(rect.w / 2.0).min(rect.h / 2.0).max(0.0);
    let x0 = rect.x.floor() as i64;
    let y0 = rect.y.floor() as i64;
    let x1 = (rect.x + rect.w).ceil() as i64;
    let y1 = (rect.y + rect.h).ceil() as i64;

    for py in y0..y1 {
        for px in x0..x1 {
            let cx = px as f32 + 0.5;
            let cy = py as f32 + 0.5;
            if cx < rect.x || cy < rect.y || cx > rect.x + rect.w || cy > rect.y + rect.h {
                continue;
            }

            // Distance outside the inner rectangle the corners are drawn around
            let dx = (rect.x + radius - cx).max(cx - (rect.x + rect.w - radius)).max(0.0);
            let dy = (rect.y + radius - cy).max(cy - (rect.y + rect.h - radius)).max(0.0);
            let coverage = if dx > 0.0 && dy > 0.0 {
                radius + 0.5 - (dx * dx + dy * dy).sqrt()
            } else {
                1.0
            };
            if coverage > 0.0 {
                blend_pixel(canvas, px, py, with_coverage(color, coverage));
            }
        }
    }
}

/// Fill an antialiased circle.
pub fn fill_circle(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: [u8; 4]) {
    let x0 = (cx - radius - 1.0).floor() as i64;
    let y0 = (cy - radius - 1.0).floor() as i64;
    let x1 = (cx + radius + 1.0).ceil() as i64;
    let y1 = (cy + radius + 1.0).ceil() as i64;

    for py in y0..y1 {
        for px in x0..x1 {
            let dx = px as f32 + 0.5 - cx;
            let dy = py as f32 + 0.5 - cy;
            let coverage = radius + 0.5 - (dx * dx + dy * dy).sqrt();
            if coverage > 0.0 {
                blend_pixel(canvas, px, py, with_coverage(color, coverage));
            }
        }
    }
}

/// Approximate a blurred drop shadow with stacked translucent rounded rects.
pub fn drop_shadow(canvas: &mut RgbaImage, rect: Rect, radius: f32, blur: u32, opacity: f32) {
    if blur == 0 {
        return;
    }
    let layer_alpha = (255.0 * opacity / blur as f32).round().clamp(1.0, 255.0) as u8;
    for spread in (1..=blur).rev() {
        let grown = rect.inflate(spread as f32);
        fill_rounded_rect(canvas, grown, radius + spread as f32, [0, 0, 0, layer_alpha]);
    }
}

/// Alpha mask produced by the glyph rasterizer.
#[derive(Debug, Clone)]
pub struct GlyphMask {
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

/// Blend a glyph coverage mask with its top-left corner at (x, y).
pub fn blend_mask(canvas: &mut RgbaImage, x: i64, y: i64, mask: &GlyphMask, color: [u8; 4]) {
    for row in 0..mask.height {
        for col in 0..mask.width {
            let value = mask.coverage[row * mask.width + col];
            if value == 0 {
                continue;
            }
            let alpha = ((u16::from(value) * u16::from(color[3])) / 255) as u8;
            blend_pixel(
                canvas,
                x + col as i64,
                y + row as i64,
                [color[0], color[1], color[2], alpha],
            );
        }
    }
}
