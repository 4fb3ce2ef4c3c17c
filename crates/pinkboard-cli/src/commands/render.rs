//! Headless animation-to-PNG render command

use super::{frame_interval, load_settings};
use anyhow::{Context, Result};
use pinkboard_particles::{AnimationDriver, Canvas};
use pinkboard_runtime::FrameLoop;
use std::fs;
use std::path::{Path, PathBuf};

pub struct RenderArgs {
    pub config: Option<String>,
    pub output: String,
    pub frames: u64,
    pub fps: f64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub sequence: Option<String>,
    pub seed: Option<u32>,
}

pub fn run(args: RenderArgs) -> Result<()> {
    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(w) = args.width {
        settings.canvas.width = w;
    }
    if let Some(h) = args.height {
        settings.canvas.height = h;
    }
    if let Some(seed) = args.seed {
        settings.particles.seed = seed;
    }
    settings.validate().context("Invalid settings")?;

    if args.frames == 0 {
        anyhow::bail!("Nothing to render: --frames must be at least 1");
    }
    let dt = frame_interval(args.fps)?;

    let sequence_dir = match &args.sequence {
        Some(dir) => {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create sequence directory '{}'", dir))?;
            Some(PathBuf::from(dir))
        }
        None => None,
    };

    let driver = AnimationDriver::new(settings.particles.clone())
        .context("Failed to set up particle animation")?;
    let mut frame_loop = FrameLoop::new(driver);
    let mut canvas = Canvas::with_background(
        settings.canvas.width,
        settings.canvas.height,
        settings.canvas.background,
    );

    let ran = frame_loop.run_fixed(&mut canvas, args.frames, dt, |index, canvas| {
        if let Some(dir) = &sequence_dir {
            canvas.save_png(&sequence_frame_path(dir, index))?;
        }
        Ok(())
    })?;

    canvas
        .save_png(Path::new(&args.output))
        .with_context(|| format!("Failed to write '{}'", args.output))?;

    let driver = frame_loop.system();
    println!(
        "Rendered {} frame(s) at {}x{} ({} active particle(s) in last frame)",
        ran,
        settings.canvas.width,
        settings.canvas.height,
        driver.last_frame().active
    );
    if let Some(dir) = &sequence_dir {
        println!("Frame sequence: {}", dir.display());
    }
    println!("Saved to {}", args.output);

    frame_loop.shutdown()?;
    Ok(())
}

fn sequence_frame_path(dir: &Path, index: u64) -> PathBuf {
    dir.join(format!("frame_{:05}.png", index))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(dir: &Path) -> RenderArgs {
        RenderArgs {
            config: Some(dir.join("pinkboard.toml").to_string_lossy().into_owned()),
            output: dir.join("out.png").to_string_lossy().into_owned(),
            frames: 3,
            fps: 10.0,
            width: None,
            height: None,
            sequence: None,
            seed: None,
        }
    }

    fn write_config(dir: &Path) {
        fs::write(
            dir.join("pinkboard.toml"),
            "[particles]\nlength = 20\nsize = 8\n\n[canvas]\nwidth = 64\nheight = 48\n",
        )
        .unwrap();
    }

    #[test]
    fn sequence_frames_are_zero_padded() {
        let path = sequence_frame_path(Path::new("out"), 7);
        assert_eq!(path, Path::new("out").join("frame_00007.png"));
    }

    #[test]
    fn renders_final_frame_and_sequence() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path());
        let seq = dir.path().join("seq");

        let mut a = args(dir.path());
        a.sequence = Some(seq.to_string_lossy().into_owned());
        a.width = Some(32);
        run(a).unwrap();

        assert_eq!(
            image::image_dimensions(dir.path().join("out.png")).unwrap(),
            (32, 48)
        );
        for i in 0..3 {
            assert!(sequence_frame_path(&seq, i).exists());
        }
        assert!(!sequence_frame_path(&seq, 3).exists());
    }

    #[test]
    fn rejects_bad_arguments() {
        let dir = tempfile::tempdir().unwrap();
        write_config(dir.path());

        let mut a = args(dir.path());
        a.frames = 0;
        assert!(run(a).is_err());

        let mut a = args(dir.path());
        a.fps = 0.0;
        assert!(run(a).is_err());

        let mut a = args(dir.path());
        a.height = Some(0);
        assert!(run(a).is_err());
        assert!(!dir.path().join("out.png").exists());
    }
}
