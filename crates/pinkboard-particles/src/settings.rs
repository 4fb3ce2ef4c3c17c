//! Animation settings (parsed from TOML)

use crate::particle::DEFAULT_EFFECT;
use pinkboard_core::{Color, PinkboardError, Result};
use std::path::Path;

/// Largest pool the loader accepts
pub const MAX_PARTICLES: usize = 100_000;

/// The `[particles]` table
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleSettings {
    /// Pool capacity
    pub length: usize,
    /// Seconds before a particle expires
    pub duration: f32,
    /// Spawn speed in pixels per second
    pub velocity: f32,
    /// Acceleration as a multiple of the spawn velocity
    pub effect: f32,
    /// Sprite edge length in pixels
    pub size: u32,
    /// Sprite fill
    pub color: Color,
    /// Seed for spawn sampling
    pub seed: u32,
}

impl Default for ParticleSettings {
    fn default() -> Self {
        Self {
            length: 500,
            duration: 2.0,
            velocity: 100.0,
            effect: DEFAULT_EFFECT,
            size: 30,
            color: Color::PINK,
            seed: 0xDEAD_BEEF,
        }
    }
}

impl ParticleSettings {
    /// Particles spawned per second so the pool turns over once per duration
    pub fn spawn_rate(&self) -> f32 {
        self.length as f32 / self.duration
    }

    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(v) = table.get("length") {
            settings.length = toml_usize(v, "particles.length")?;
        }
        if let Some(v) = table.get("duration") {
            settings.duration = toml_f32(v, "particles.duration")?;
        }
        if let Some(v) = table.get("velocity") {
            settings.velocity = toml_f32(v, "particles.velocity")?;
        }
        if let Some(v) = table.get("effect") {
            settings.effect = toml_f32(v, "particles.effect")?;
        }
        if let Some(v) = table.get("size") {
            settings.size = toml_u32(v, "particles.size")?;
        }
        if let Some(v) = table.get("color") {
            settings.color = toml_color(v, "particles.color")?;
        }
        if let Some(v) = table.get("seed") {
            settings.seed = toml_u32(v, "particles.seed")?;
        }

        Ok(settings)
    }

    /// Reject configurations the pool and sprite builder can't run with
    pub fn validate(&self) -> Result<()> {
        if self.length == 0 || self.length > MAX_PARTICLES {
            return Err(PinkboardError::ValueOutOfRange {
                field: "particles.length".to_string(),
                min: 1.0,
                max: MAX_PARTICLES as f64,
                value: self.length as f64,
            });
        }
        if !(self.duration > 0.0 && self.duration.is_finite()) {
            return Err(PinkboardError::ConfigurationError(format!(
                "particles.duration must be positive, got {}",
                self.duration
            )));
        }
        if !(self.velocity > 0.0 && self.velocity.is_finite()) {
            return Err(PinkboardError::ConfigurationError(format!(
                "particles.velocity must be positive, got {}",
                self.velocity
            )));
        }
        if !self.effect.is_finite() {
            return Err(PinkboardError::ConfigurationError(format!(
                "particles.effect must be finite, got {}",
                self.effect
            )));
        }
        if self.size == 0 || self.size > 1024 {
            return Err(PinkboardError::ValueOutOfRange {
                field: "particles.size".to_string(),
                min: 1.0,
                max: 1024.0,
                value: self.size as f64,
            });
        }
        Ok(())
    }
}

/// The `[canvas]` table: the headless drawing surface
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
    pub background: Color,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            background: Color::BLACK,
        }
    }
}

impl CanvasSettings {
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let mut settings = Self::default();

        if let Some(v) = table.get("width") {
            settings.width = toml_u32(v, "canvas.width")?;
        }
        if let Some(v) = table.get("height") {
            settings.height = toml_u32(v, "canvas.height")?;
        }
        if let Some(v) = table.get("background") {
            settings.background = toml_color(v, "canvas.background")?;
        }

        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [("canvas.width", self.width), ("canvas.height", self.height)] {
            if value == 0 || value > 16384 {
                return Err(PinkboardError::ValueOutOfRange {
                    field: field.to_string(),
                    min: 1.0,
                    max: 16384.0,
                    value: value as f64,
                });
            }
        }
        Ok(())
    }
}

/// A whole configuration file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    pub particles: ParticleSettings,
    pub canvas: CanvasSettings,
}

impl Settings {
    /// Parse and validate a configuration document. Missing tables and keys
    /// keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let root: toml::value::Table = toml::from_str(source)?;
        let mut settings = Self::default();

        if let Some(v) = root.get("particles") {
            let table = v.as_table().ok_or_else(|| {
                PinkboardError::ConfigurationError("[particles] must be a table".to_string())
            })?;
            settings.particles = ParticleSettings::from_toml(table)?;
        }
        if let Some(v) = root.get("canvas") {
            let table = v.as_table().ok_or_else(|| {
                PinkboardError::ConfigurationError("[canvas] must be a table".to_string())
            })?;
            settings.canvas = CanvasSettings::from_toml(table)?;
        }

        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        self.particles.validate()?;
        self.canvas.validate()
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn type_error(field: &str, expected: &str, got: &toml::Value) -> PinkboardError {
    PinkboardError::ConfigurationError(format!(
        "{field} must be {expected}, got {}",
        got.type_str()
    ))
}

fn toml_f32(v: &toml::Value, field: &str) -> Result<f32> {
    v.as_float()
        .map(|f| f as f32)
        .or_else(|| v.as_integer().map(|i| i as f32))
        .ok_or_else(|| type_error(field, "a number", v))
}

fn toml_u32(v: &toml::Value, field: &str) -> Result<u32> {
    let i = v
        .as_integer()
        .ok_or_else(|| type_error(field, "an integer", v))?;
    u32::try_from(i).map_err(|_| PinkboardError::ValueOutOfRange {
        field: field.to_string(),
        min: 0.0,
        max: u32::MAX as f64,
        value: i as f64,
    })
}

fn toml_usize(v: &toml::Value, field: &str) -> Result<usize> {
    toml_u32(v, field).map(|n| n as usize)
}

fn toml_color(v: &toml::Value, field: &str) -> Result<Color> {
    let s = v
        .as_str()
        .ok_or_else(|| type_error(field, "a colour string", v))?;
    Color::parse_hex(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_are_sane() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.particles.length, 500);
        assert!((settings.particles.duration - 2.0).abs() < 1e-6);
        assert!((settings.particles.velocity - 100.0).abs() < 1e-6);
        assert!((settings.particles.effect + 0.75).abs() < 1e-6);
        assert_eq!(settings.particles.size, 30);
        assert!((settings.particles.spawn_rate() - 250.0).abs() < 1e-3);
    }

    #[test]
    fn parse_from_toml() {
        let source = r##"
[particles]
length = 120
duration = 3
velocity = 80.5
effect = -1
size = 24
color = "#ff0000"
seed = 7

[canvas]
width = 320
height = 240
background = "#10203040"
"##;
        let settings = Settings::from_toml_str(source).unwrap();
        assert_eq!(settings.particles.length, 120);
        assert!((settings.particles.duration - 3.0).abs() < 1e-6);
        assert!((settings.particles.velocity - 80.5).abs() < 1e-6);
        assert!((settings.particles.effect + 1.0).abs() < 1e-6);
        assert_eq!(settings.particles.size, 24);
        assert_eq!(settings.particles.color.to_rgba8(), [255, 0, 0, 255]);
        assert_eq!(settings.particles.seed, 7);
        assert_eq!(settings.canvas.width, 320);
        assert_eq!(settings.canvas.background.to_rgba8(), [0x10, 0x20, 0x30, 0x40]);
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let settings = Settings::from_toml_str("[particles]\nduration = 4.0\n").unwrap();
        assert_eq!(settings.particles.length, 500);
        assert!((settings.particles.duration - 4.0).abs() < 1e-6);
        assert_eq!(settings.canvas, CanvasSettings::default());

        let empty = Settings::from_toml_str("").unwrap();
        assert_eq!(empty, Settings::default());
    }

    #[test]
    fn zero_capacity_is_a_configuration_error() {
        let err = Settings::from_toml_str("[particles]\nlength = 0\n").unwrap_err();
        assert!(matches!(err, PinkboardError::ValueOutOfRange { .. }));
    }

    #[test]
    fn non_positive_duration_is_rejected() {
        for source in ["[particles]\nduration = 0\n", "[particles]\nduration = -2.5\n"] {
            let err = Settings::from_toml_str(source).unwrap_err();
            assert!(matches!(err, PinkboardError::ConfigurationError(_)));
        }
    }

    #[test]
    fn wrong_types_are_reported() {
        assert!(Settings::from_toml_str("[particles]\nlength = \"many\"\n").is_err());
        assert!(Settings::from_toml_str("[particles]\ncolor = 5\n").is_err());
        assert!(Settings::from_toml_str("[particles]\nlength = -3\n").is_err());
        assert!(Settings::from_toml_str("particles = 3\n").is_err());
        assert!(matches!(
            Settings::from_toml_str("[particles\n"),
            Err(PinkboardError::TomlParseError(_))
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pinkboard.toml");
        std::fs::write(&path, "[canvas]\nwidth = 64\nheight = 48\n").unwrap();
        let settings = Settings::load(&path).unwrap();
        assert_eq!((settings.canvas.width, settings.canvas.height), (64, 48));

        let missing = Settings::load(&dir.path().join("nope.toml"));
        assert!(matches!(missing, Err(PinkboardError::IoError(_))));
    }
}
