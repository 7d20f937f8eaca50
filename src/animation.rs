//! The frame generation loop.
//!
//! Commands are animated strictly in order. Each command types its text one
//! character per frame, reveals its output in one frame, then holds that
//! frame. Every frame is rendered from the full visible token list.

use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::debug;

use crate::ansi::{Color, Token};
use crate::frames::{CommandFrames, FrameState, Point};
use crate::script::DemoCommand;

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub tokens: &'a [Token],
    pub origin: Point,
    pub font_size: f32,
    pub line_height: f32,
}

/// Turns the visible tokens into encoded image bytes.
pub trait FrameRenderer {
    /// Top-left corner of the first prompt line.
    fn origin(&self) -> Point;

    fn render(&mut self, view: &FrameView<'_>) -> Result<Vec<u8>>;
}

/// Receives encoded frames in generation order.
pub trait FrameSink {
    fn write(&mut self, index: usize, frame: Arc<[u8]>) -> Result<()>;
}

/// Settings the driver threads through to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationSettings {
    pub fps: u32,
    pub prompt: String,
    /// Color the prompt returns to after each output.
    pub reset_color: Color,
    pub font_size: f32,
    pub line_height: f32,
}

impl AnimationSettings {
    /// Font size and line height while `command` is on screen.
    ///
    /// An explicit font size implies a line height two pixels taller.
    pub fn metrics_for(&self, command: &DemoCommand) -> (f32, f32) {
        match command.font_size {
            Some(size) => (size, size + 2.0),
            None => (self.font_size, self.line_height),
        }
    }
}

/// Render every frame of the demo into `sink`.
///
/// `outputs` holds the parsed output of each command. `on_frame` is called
/// with the number of frames written so far. Returns the frame count.
pub fn animate<R, S>(
    commands: &[DemoCommand],
    outputs: &[Vec<Token>],
    settings: &AnimationSettings,
    renderer: &mut R,
    sink: &mut S,
    mut on_frame: impl FnMut(usize),
) -> Result<usize>
where
    R: FrameRenderer + ?Sized,
    S: FrameSink + ?Sized,
{
    if commands.len() != outputs.len() {
        bail!(
            "Got output for {} command(s), expected {}",
            outputs.len(),
            commands.len()
        );
    }

    let origin = renderer.origin();
    let mut state = FrameState::new(settings.prompt.clone(), settings.reset_color);
    let mut index = 0;

    let mut emit = |frame: Arc<[u8]>, index: &mut usize| -> Result<()> {
        sink.write(*index, frame)?;
        *index += 1;
        on_frame(*index);
        Ok(())
    };

    for (i, (command, output)) in commands.iter().zip(outputs).enumerate() {
        let counts = CommandFrames::for_command(command, settings.fps);
        let (font_size, line_height) = settings.metrics_for(command);
        debug!(
            command = i,
            typing = counts.typing,
            hold = counts.hold,
            "Animating command"
        );

        for c in command.text.chars() {
            state.type_char(c);
            let frame = renderer.render(&FrameView {
                tokens: state.tokens(),
                origin,
                font_size,
                line_height,
            })?;
            emit(frame.into(), &mut index)?;
        }

        state.reveal(output);
        let revealed: Arc<[u8]> = renderer
            .render(&FrameView {
                tokens: state.tokens(),
                origin,
                font_size,
                line_height,
            })?
            .into();
        emit(Arc::clone(&revealed), &mut index)?;

        for _ in 0..counts.hold {
            emit(Arc::clone(&revealed), &mut index)?;
        }
    }

    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ansi::{plain_text, scheme::DRACULA};

    /// Renders the plain text of the visible tokens.
    #[derive(Default)]
    struct TextRenderer {
        views: Vec<(usize, f32, f32)>,
    }

    impl FrameRenderer for TextRenderer {
        fn origin(&self) -> Point {
            Point::new(63.0, 103.0)
        }

        fn render(&mut self, view: &FrameView<'_>) -> Result<Vec<u8>> {
            self.views
                .push((view.tokens.len(), view.font_size, view.line_height));
            Ok(plain_text(view.tokens).into_bytes())
        }
    }

    #[derive(Default)]
    struct MemorySink {
        frames: Vec<(usize, String)>,
    }

    impl FrameSink for MemorySink {
        fn write(&mut self, index: usize, frame: Arc<[u8]>) -> Result<()> {
            self.frames
                .push((index, String::from_utf8(frame.to_vec()).unwrap()));
            Ok(())
        }
    }

    fn settings(fps: u32) -> AnimationSettings {
        AnimationSettings {
            fps,
            prompt: "> ".to_string(),
            reset_color: DRACULA.reset(),
            font_size: 22.0,
            line_height: 24.0,
        }
    }

    #[test]
    fn frames_follow_typing_reveal_hold_order() {
        let commands = vec![DemoCommand::new("1+1", 1.0), DemoCommand::new("2+2", 0.0)];
        let outputs = vec![
            vec![Token::Text("2".into())],
            vec![Token::Text("4".into())],
        ];
        let mut renderer = TextRenderer::default();
        let mut sink = MemorySink::default();

        let total = animate(
            &commands,
            &outputs,
            &settings(2),
            &mut renderer,
            &mut sink,
            |_| {},
        )
        .unwrap();

        let frames: Vec<&str> = sink.frames.iter().map(|(_, f)| f.as_str()).collect();
        assert_eq!(
            frames,
            vec![
                "> 1",
                "> 1+",
                "> 1+1",
                "> 1+1\n2> ",
                "> 1+1\n2> ",
                "> 1+1\n2> ",
                "> 1+1\n2> 2",
                "> 1+1\n2> 2+",
                "> 1+1\n2> 2+2",
                "> 1+1\n2> 2+2\n4> ",
            ]
        );
        assert_eq!(total, 10);
        assert_eq!(renderer.views.len(), 8, "hold frames are not re-rendered");
    }

    #[test]
    fn indices_are_contiguous_from_zero() {
        let commands = vec![DemoCommand::new("ab", 2.0), DemoCommand::new("c", 1.0)];
        let outputs = vec![vec![], vec![]];
        let mut sink = MemorySink::default();
        let mut progress = Vec::new();

        let total = animate(
            &commands,
            &outputs,
            &settings(3),
            &mut TextRenderer::default(),
            &mut sink,
            |n| progress.push(n),
        )
        .unwrap();

        assert_eq!(total, (2 + 1 + 6) + (1 + 1 + 3));
        let indices: Vec<usize> = sink.frames.iter().map(|(i, _)| *i).collect();
        assert_eq!(indices, (0..total).collect::<Vec<_>>());
        assert_eq!(progress, (1..=total).collect::<Vec<_>>());
    }

    #[test]
    fn font_size_override_changes_line_height() {
        let mut command = DemoCommand::new("x", 0.0);
        command.font_size = Some(30.0);
        let mut renderer = TextRenderer::default();

        animate(
            &[command],
            &[vec![]],
            &settings(1),
            &mut renderer,
            &mut MemorySink::default(),
            |_| {},
        )
        .unwrap();

        assert!(renderer
            .views
            .iter()
            .all(|&(_, size, height)| size == 30.0 && height == 32.0));
    }

    #[test]
    fn mismatched_outputs_are_rejected() {
        let err = animate(
            &[DemoCommand::new("x", 0.0)],
            &[],
            &settings(1),
            &mut TextRenderer::default(),
            &mut MemorySink::default(),
            |_| {},
        )
        .unwrap_err();
        assert!(err.to_string().contains("expected 1"));
    }
}
