//! Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Directory holding the test fixtures.
pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures")
}

/// Path of a named fixture.
pub fn fixture(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// A termgif command isolated from the user's config and environment.
///
/// The config path points into `home`, which has no config file unless a
/// test writes one.
pub fn termgif(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("termgif").expect("termgif binary");
    cmd.env("TERMGIF_CONFIG", home.path().join("config.toml"))
        .env_remove("TERMGIF_INTERPRETER")
        .env_remove("TERMGIF_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Write a script file into `dir` and return its path.
pub fn write_script(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("script.toml");
    fs::write(&path, content).expect("write script");
    path
}
