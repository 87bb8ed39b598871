// src/infrastructure/opener.rs
use crate::constants::OPENER_LAUNCH_DELAY_MS;
use anyhow::{Context, Result};
use std::path::Path;
use std::process::Command;
use tracing::instrument;

/// Hand a file to the platform's default viewer.
#[instrument(level = "debug")]
pub fn open_with_default_app(path: &Path) -> Result<()> {
    let path_str = path.to_str().context("Failed to convert path to string")?;

    #[cfg(target_os = "macos")]
    {
        Command::new("open")
            .arg(path_str)
            .spawn()
            .context("Failed to open exported file")?;
    }
    #[cfg(target_os = "windows")]
    {
        Command::new("cmd")
            .args(["/C", "start", "", path_str])
            .spawn()
            .context("Failed to open exported file")?;
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        Command::new("xdg-open")
            .arg(path_str)
            .spawn()
            .context("Failed to open exported file")?;
    }

    std::thread::sleep(std::time::Duration::from_millis(OPENER_LAUNCH_DELAY_MS));

    Ok(())
}
