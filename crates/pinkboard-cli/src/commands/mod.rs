//! CLI command implementations

pub mod init;
pub mod render;
pub mod simulate;
pub mod sprite;

use anyhow::{Context, Result};
use pinkboard_particles::Settings;
use std::path::Path;

/// Configuration picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_PATH: &str = "pinkboard.toml";

/// Load settings from an explicit path, else from `pinkboard.toml` if one
/// exists, else fall back to the defaults.
pub fn load_settings(config: Option<&str>) -> Result<Settings> {
    match config {
        Some(path) => Settings::load(Path::new(path))
            .with_context(|| format!("Failed to load config '{}'", path)),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => {
            log::info!("Using {}", DEFAULT_CONFIG_PATH);
            Settings::load(Path::new(DEFAULT_CONFIG_PATH))
                .with_context(|| format!("Failed to load config '{}'", DEFAULT_CONFIG_PATH))
        }
        None => {
            log::info!("No config given, using defaults");
            Ok(Settings::default())
        }
    }
}

/// Seconds per frame for a frames-per-second rate
pub fn frame_interval(fps: f64) -> Result<f64> {
    if !(fps > 0.0 && fps.is_finite()) {
        anyhow::bail!("fps must be a positive number, got {}", fps);
    }
    Ok(1.0 / fps)
}
