//! Sprite export command

use super::load_settings;
use anyhow::{Context, Result};
use pinkboard_particles::{render_sprite, HeartCurve};
use std::path::Path;

pub fn run(output: &str, config: Option<&str>, size: Option<u32>) -> Result<()> {
    let mut settings = load_settings(config)?;
    if let Some(size) = size {
        settings.particles.size = size;
    }
    settings.validate().context("Invalid settings")?;

    let sprite = render_sprite(&HeartCurve, settings.particles.size, settings.particles.color)
        .context("Failed to build sprite")?;
    sprite
        .save_png(Path::new(output))
        .with_context(|| format!("Failed to write '{}'", output))?;

    println!("Wrote {}x{} sprite to {}", sprite.width(), sprite.height(), output);
    Ok(())
}
