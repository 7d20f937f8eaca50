//! Integration tests for the termgif command line

use std::fs;

use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{fixture, termgif, write_script};

// ============================================================================
// Help and Version
// ============================================================================

#[test]
fn no_arguments_shows_help() {
    let home = TempDir::new().unwrap();
    termgif(&home)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage: termgif"));
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    termgif(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("plan"))
        .stdout(predicate::str::contains("schemes"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn render_help_shows_flags() {
    let home = TempDir::new().unwrap();
    termgif(&home)
        .args(["render", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<SCRIPT>"))
        .stdout(predicate::str::contains("--frames-dir"))
        .stdout(predicate::str::contains("--keep-frames"));
}

#[test]
fn version_includes_package_version() {
    let home = TempDir::new().unwrap();
    termgif(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ============================================================================
// Plan and Schemes
// ============================================================================

#[test]
fn plan_prints_frame_counts() {
    let home = TempDir::new().unwrap();
    let output = termgif(&home)
        .arg("plan")
        .arg(fixture("demo.toml"))
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);

    insta::assert_snapshot!(stdout.trim_end(), @r#"
     #  typing  reveal  hold  frames  command
     1       9       1    90     100  1 + 2 * 3
     2      13       1    45      59  "a".repeat(3)
     3      19       1     0      20  console.log('done')
    total: 179 frames, 9.94s at 18 fps
    "#);
}

#[test]
fn plan_fps_flag_overrides_config() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.toml"), "[render]\nfps = 30\n").unwrap();
    termgif(&home)
        .arg("plan")
        .arg(fixture("demo.toml"))
        .args(["--fps", "10"])
        .assert()
        .success()
        .stdout(predicate::str::contains("total: 119 frames, 11.90s at 10 fps"));
}

#[test]
fn plan_uses_config_fps() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.toml"), "[render]\nfps = 10\n").unwrap();
    termgif(&home)
        .arg("plan")
        .arg(fixture("demo.toml"))
        .assert()
        .success()
        .stdout(predicate::str::contains("at 10 fps"));
}

#[test]
fn schemes_lists_builtins_and_marks_default() {
    let home = TempDir::new().unwrap();
    termgif(&home)
        .arg("schemes")
        .assert()
        .success()
        .stdout(predicate::str::contains("  vga"))
        .stdout(predicate::str::contains("  ubuntu"))
        .stdout(predicate::str::contains("* dracula"))
        .stdout(predicate::str::contains("  one-half-dark"));
}

// ============================================================================
// Config
// ============================================================================

#[test]
fn config_path_honors_env() {
    let home = TempDir::new().unwrap();
    termgif(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn config_init_writes_defaults_once() {
    let home = TempDir::new().unwrap();
    termgif(&home)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));

    let written = fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(written.contains("[render]"));
    assert!(written.contains("fps = 18"));

    termgif(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    termgif(&home)
        .args(["config", "init", "--force"])
        .assert()
        .success();
}

#[test]
fn config_show_reflects_file() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.toml"),
        "[interpreter]\nprogram = \"node\"\n",
    )
    .unwrap();
    termgif(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("program = \"node\""))
        .stdout(predicate::str::contains("scheme = \"dracula\""));
}

#[test]
fn invalid_config_is_reported() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.toml"), "[render]\nfps = \"fast\"\n").unwrap();
    termgif(&home)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"));
}

#[test]
fn out_of_range_config_values_are_reported() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("config.toml"), "[render]\nfps = 0\n").unwrap();
    termgif(&home)
        .args(["config", "show"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config"))
        .stderr(predicate::str::contains("render.fps must be between 1 and 100"));
}

// ============================================================================
// Render Startup Errors
// ============================================================================

#[test]
fn render_missing_script_fails() {
    let home = TempDir::new().unwrap();
    termgif(&home)
        .args(["render", "/nonexistent/demo.toml"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to read script"));
}

#[test]
fn render_empty_script_fails() {
    let home = TempDir::new().unwrap();
    let script = write_script(&home, "commands = []\n");
    termgif(&home)
        .arg("render")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Script has no commands"));
}

#[test]
fn render_without_interpreter_fails_before_rendering() {
    let home = TempDir::new().unwrap();
    let output = home.path().join("out.gif");
    termgif(&home)
        .arg("render")
        .arg(fixture("demo.toml"))
        .arg("-o")
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("No interpreter configured"));
    assert!(!output.exists());
}

#[test]
fn render_unknown_scheme_fails() {
    let home = TempDir::new().unwrap();
    termgif(&home)
        .env("TERMGIF_INTERPRETER", "cat")
        .arg("render")
        .arg(fixture("demo.toml"))
        .args(["--scheme", "solarized"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown color scheme 'solarized'"));
}

#[test]
fn render_multi_line_command_fails() {
    let home = TempDir::new().unwrap();
    let script = write_script(&home, "[[commands]]\ntext = \"let x = 1\\nx\"\n");
    termgif(&home)
        .env("TERMGIF_INTERPRETER", "cat")
        .arg("render")
        .arg(&script)
        .assert()
        .failure()
        .stderr(predicate::str::contains("contains a line break"));
}

#[test]
fn render_missing_font_fails() {
    let home = TempDir::new().unwrap();
    termgif(&home)
        .env("TERMGIF_INTERPRETER", "cat")
        .arg("render")
        .arg(fixture("demo.toml"))
        .args(["--font", "/nonexistent/mono.ttf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Font file not found"));
}

// ============================================================================
// Completions
// ============================================================================

#[test]
fn completions_for_bash() {
    let home = TempDir::new().unwrap();
    termgif(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("termgif"));
}
