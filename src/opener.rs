//! Open the finished GIF with the platform's default viewer.

use std::path::Path;
use std::process::{Command, Stdio};

use anyhow::{anyhow, Context, Result};
use tracing::debug;

/// Program and leading arguments of the platform opener.
pub fn platform_opener() -> Option<(&'static str, &'static [&'static str])> {
    #[cfg(target_os = "macos")]
    {
        Some(("open", &[]))
    }

    #[cfg(target_os = "windows")]
    {
        Some(("cmd", &["/C", "start", ""]))
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        Some(("xdg-open", &[]))
    }

    #[cfg(not(any(unix, target_os = "windows")))]
    {
        None
    }
}

/// Launch the opener on `path` without waiting for the viewer to exit.
pub fn open(path: &Path) -> Result<()> {
    let (program, args) =
        platform_opener().ok_or_else(|| anyhow!("Opening files is not supported on this platform"))?;
    debug!(program, path = %path.display(), "Opening output");
    Command::new(program)
        .args(args)
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to run '{}' on {}", program, path.display()))?;
    Ok(())
}
