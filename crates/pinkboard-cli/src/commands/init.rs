//! Configuration initialization command

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Default configuration, matching the built-in settings
pub const DEFAULT_CONFIG: &str = r##"# Pinkboard animation settings

[particles]
# Pool capacity; the oldest particle is overwritten once it is full
length = 500
# Seconds each particle lives
duration = 2.0
# Spawn speed in pixels per second, pointing away from the curve center
velocity = 100.0
# Acceleration as a multiple of the spawn velocity (negative slows particles)
effect = -0.75
# Sprite edge length in pixels
size = 30
color = "#ea80b0"
seed = 3735928559

[canvas]
width = 800
height = 600
background = "#000000"
"##;

pub fn run(path: &str) -> Result<()> {
    let target = Path::new(path);
    if target.exists() {
        anyhow::bail!("'{}' already exists", path);
    }

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(target, DEFAULT_CONFIG)?;

    println!("Created {}", path);
    println!();
    println!("Next steps:");
    println!("  pinkboard sprite --config {}", path);
    println!("  pinkboard render --config {} --frames 120", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinkboard_particles::Settings;

    #[test]
    fn template_matches_built_in_defaults() {
        let settings = Settings::from_toml_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("pinkboard.toml");
        let path = path.to_str().unwrap();

        run(path).unwrap();
        assert_eq!(fs::read_to_string(path).unwrap(), DEFAULT_CONFIG);
        assert!(run(path).is_err());
    }
}
