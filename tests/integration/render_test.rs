//! Integration tests for the raster renderer
//!
//! These need a system monospace font and are skipped when none is found.

use termgif::animation::{FrameRenderer, FrameView};
use termgif::ansi::{scheme::DRACULA, tokenize};
use termgif::render::{discover_font, Chrome, TerminalRenderer, TextPainter, WindowLayout};
use termgif::{Color, Token};

fn renderer(layout: WindowLayout) -> Option<TerminalRenderer> {
    let Some(font) = discover_font() else {
        eprintln!("skipping: no system monospace font");
        return None;
    };
    let painter = TextPainter::load(&font).unwrap();
    let chrome = Chrome::load(Color::hex(0x282D35), Color::hex(0x1d1e26), None).unwrap();
    Some(TerminalRenderer::new(layout, DRACULA, &chrome, painter))
}

fn has_color_near(image: &image::RgbaImage, color: Color) -> bool {
    image.pixels().any(|p| {
        p.0[0].abs_diff(color.r) < 8 && p.0[1].abs_diff(color.g) < 8 && p.0[2].abs_diff(color.b) < 8
    })
}

#[test]
fn rendered_frame_is_a_png_of_canvas_size() {
    let layout = WindowLayout::default();
    let Some(mut renderer) = renderer(layout) else {
        return;
    };
    let tokens = vec![Token::Text("> 1 + 1".to_string())];
    let bytes = renderer
        .render(&FrameView {
            tokens: &tokens,
            origin: renderer.origin(),
            font_size: 22.0,
            line_height: 24.0,
        })
        .unwrap();

    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), layout.canvas_size());
}

#[test]
fn colored_output_is_drawn_in_scheme_color() {
    let layout = WindowLayout::new(400, 120);
    let Some(mut renderer) = renderer(layout) else {
        return;
    };
    let mut tokens = vec![Token::Text("> x".to_string()), Token::Newline];
    tokens.extend(tokenize("\x1b[31mERRORERRORERROR\x1b[0m", &DRACULA));

    let frame = renderer.draw(&FrameView {
        tokens: &tokens,
        origin: renderer.origin(),
        font_size: 22.0,
        line_height: 24.0,
    });
    let red = DRACULA.color_for("\x1b[31m").unwrap();
    assert!(has_color_near(&frame, red));
}

#[test]
fn long_output_scrolls_to_the_last_line() {
    let layout = WindowLayout::new(400, 60);
    let Some(mut renderer) = renderer(layout) else {
        return;
    };
    let green = DRACULA.color_for("\x1b[32m").unwrap();

    // Many plain lines, then one green line that only fits after scrolling
    let mut tokens = Vec::new();
    for _ in 0..20 {
        tokens.push(Token::Text("plain".to_string()));
        tokens.push(Token::Newline);
    }
    tokens.push(Token::ColorChange(green));
    tokens.push(Token::Text("GREENGREENGREEN".to_string()));

    let frame = renderer.draw(&FrameView {
        tokens: &tokens,
        origin: renderer.origin(),
        font_size: 22.0,
        line_height: 24.0,
    });
    assert!(has_color_near(&frame, green));
}
