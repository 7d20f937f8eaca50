//! Render subcommand handler

use anyhow::Result;
use tracing::info;

use termgif::animation::AnimationSettings;
use termgif::cli::RenderArgs;
use termgif::encode::{FfmpegEncoder, ScratchDir};
use termgif::interpreter::ProcessInterpreter;
use termgif::render::{resolve_font, Chrome, TerminalRenderer, TextPainter, WindowLayout};
use termgif::{opener, Config, Pipeline, Script};

/// Fold command line flags over the loaded config.
pub fn apply_overrides(config: &mut Config, args: &RenderArgs) {
    if let Some(output) = &args.output {
        config.output.path = output.clone();
    }
    if let Some(fps) = args.fps {
        config.render.fps = fps;
    }
    if let Some(scheme) = &args.scheme {
        config.render.scheme = scheme.clone();
    }
    if let Some(font) = &args.font {
        config.render.font_path = Some(font.clone());
    }
    if let Some(dir) = &args.frames_dir {
        config.output.frames_dir = Some(dir.clone());
    }
    config.output.keep_frames |= args.keep_frames;
    config.output.open |= args.open;
}

/// Render a script into a GIF.
#[cfg(not(tarpaulin_include))]
pub fn handle(args: RenderArgs) -> Result<()> {
    let mut config = Config::load()?;
    apply_overrides(&mut config, &args);
    config.validate()?;

    // Everything that can be wrong with the setup fails here, before any
    // subprocess or frame work.
    let script = Script::load(&args.script)?;
    let scheme = config.scheme()?;
    let program = config.interpreter.require_program()?;
    let font = resolve_font(config.render.font_path.as_deref())?;
    info!(font = %font.display(), scheme = scheme.name, "Loading renderer");

    let painter = TextPainter::load(&font)?;
    let chrome = Chrome::load(
        config.render.window_color,
        config.render.backdrop,
        config.render.background_image.as_deref(),
    )?;
    let layout = WindowLayout::new(config.render.width, config.render.height);
    let mut renderer = TerminalRenderer::new(layout, scheme, &chrome, painter);

    let interpreter = ProcessInterpreter::new(program, config.interpreter.args.clone())
        .with_end_of_record(config.interpreter.end_of_record.clone());
    let encoder = FfmpegEncoder::new(config.output.ffmpeg.clone());

    let scratch = match &config.output.frames_dir {
        Some(dir) => ScratchDir::fixed(dir, config.output.keep_frames)?,
        None => ScratchDir::temporary()?,
    };

    let pipeline = Pipeline {
        interpreter: &interpreter,
        encoder: &encoder,
        scheme,
        settings: AnimationSettings {
            fps: config.render.fps,
            prompt: config.render.prompt.clone(),
            reset_color: scheme.reset(),
            font_size: config.render.font_size,
            line_height: config.render.line_height,
        },
        output: config.output.path.clone(),
        show_progress: true,
    };
    let summary = pipeline.run(&script, &mut renderer, scratch)?;

    println!(
        "Wrote {} ({} frames, {})",
        summary.output.display(),
        summary.frames,
        summary.size()
    );

    if config.output.open {
        opener::open(&summary.output)?;
    }
    Ok(())
}
