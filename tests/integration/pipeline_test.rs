//! Integration tests for a full run against a real subprocess

use std::fs;
use std::path::Path;

use anyhow::Result;
use tempfile::TempDir;

use termgif::animation::{AnimationSettings, FrameRenderer, FrameView};
use termgif::ansi::{plain_text, scheme::DRACULA};
use termgif::encode::{frame_path, EncodeError, Encoder, ScratchDir};
use termgif::frames::Point;
use termgif::interpreter::{Interpreter, ProcessInterpreter};
use termgif::{DemoCommand, Pipeline, Script};

#[cfg(unix)]
use crate::helpers::fixture;

/// Renders each frame as its plain text.
struct TextRenderer;

impl FrameRenderer for TextRenderer {
    fn origin(&self) -> Point {
        Point::new(0.0, 0.0)
    }

    fn render(&mut self, view: &FrameView<'_>) -> Result<Vec<u8>> {
        Ok(plain_text(view.tokens).into_bytes())
    }
}

/// Copies the last frame to the output instead of encoding a GIF.
struct LastFrameEncoder;

impl Encoder for LastFrameEncoder {
    fn encode(&self, frames_dir: &Path, _fps: u32, output: &Path) -> Result<(), EncodeError> {
        let mut last = None;
        let mut i = 0;
        while frame_path(frames_dir, i).exists() {
            last = Some(frame_path(frames_dir, i));
            i += 1;
        }
        let copy = last
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::NotFound, "no frames"))
            .and_then(|path| fs::copy(path, output));
        copy.map(|_| ()).map_err(|source| EncodeError::Spawn {
            program: "copy".to_string(),
            source,
        })
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

#[cfg(unix)]
fn echo_interpreter() -> ProcessInterpreter {
    ProcessInterpreter::new(
        "sh",
        vec![fixture("echo_interpreter.sh").display().to_string()],
    )
}

#[test]
#[cfg(unix)]
fn process_interpreter_returns_one_record_per_command() {
    let sources = vec!["1+1".to_string(), "".to_string(), "x y".to_string()];
    let records = echo_interpreter().evaluate(&sources).unwrap();
    assert_eq!(
        records,
        vec![
            "\x1b[32m1+1\x1b[0m\n",
            "\x1b[32m\x1b[0m\n",
            "\x1b[32mx y\x1b[0m\n",
        ]
    );
}

#[test]
#[cfg(unix)]
fn full_run_renders_typing_reveal_and_hold() {
    let dir = TempDir::new().unwrap();
    let frames_dir = dir.path().join("frames");
    let output = dir.path().join("demo.gif");

    let interpreter = echo_interpreter();
    let pipeline = Pipeline {
        interpreter: &interpreter,
        encoder: &LastFrameEncoder,
        scheme: DRACULA,
        settings: settings(4),
        output: output.clone(),
        show_progress: false,
    };
    let script = Script {
        commands: vec![DemoCommand::new("1+1", 0.5), DemoCommand::new("2+2", 0.5)],
    };

    let scratch = ScratchDir::fixed(&frames_dir, true).unwrap();
    let summary = pipeline.run(&script, &mut TextRenderer, scratch).unwrap();

    // (3 typed + 1 reveal + 2 hold) per command
    assert_eq!(summary.frames, 12);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "> 1+1\n1+1\n> 2+2\n2+2\n> "
    );

    // Kept frames: typing grows one char, hold repeats the reveal
    let frame = |i| fs::read_to_string(frame_path(&frames_dir, i)).unwrap();
    assert_eq!(frame(0), "> 1");
    assert_eq!(frame(2), "> 1+1");
    assert_eq!(frame(3), "> 1+1\n1+1\n> ");
    assert_eq!(frame(4), frame(3));
    assert_eq!(frame(5), frame(3));
    assert_eq!(frame(6), "> 1+1\n1+1\n> 2");
}

#[test]
#[cfg(unix)]
fn interpreter_exit_code_aborts_run() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("demo.gif");
    let interpreter = ProcessInterpreter::new(
        "sh",
        vec!["-c".to_string(), "echo boom >&2; exit 3".to_string()],
    );
    let pipeline = Pipeline {
        interpreter: &interpreter,
        encoder: &LastFrameEncoder,
        scheme: DRACULA,
        settings: settings(4),
        output: output.clone(),
        show_progress: false,
    };
    let script = Script {
        commands: vec![DemoCommand::new("1", 0.0)],
    };

    let scratch = ScratchDir::temporary().unwrap();
    let err = pipeline.run(&script, &mut TextRenderer, scratch).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("Interpreter failed"), "{message}");
    assert!(message.contains("code 3"), "{message}");
    assert!(message.contains("boom"), "{message}");
    assert!(!output.exists());
}
