//! Rasterless simulation command: runs the pool and reports its counters

use super::{frame_interval, load_settings};
use anyhow::{Context, Result};
use pinkboard_core::DrawRecorder;
use pinkboard_particles::{AnimationDriver, PoolStats, Settings};
use pinkboard_runtime::FrameLoop;
use serde::Serialize;

pub struct SimulateArgs {
    pub config: Option<String>,
    pub frames: u64,
    pub fps: f64,
    pub format: String,
}

/// Totals for one simulated run
#[derive(Debug, Serialize)]
pub struct SimulationReport {
    pub frames: u64,
    pub simulated_seconds: f64,
    pub capacity: usize,
    pub spawn_rate: f32,
    pub active: usize,
    pub peak_active: usize,
    pub stamps: usize,
    pub first_active: usize,
    pub first_free: usize,
    pub stats: PoolStats,
}

pub fn run(args: SimulateArgs) -> Result<()> {
    let settings = load_settings(args.config.as_deref())?;
    let dt = frame_interval(args.fps)?;
    let report = simulate(&settings, args.frames, dt)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_text(&report),
        _ => anyhow::bail!("Unknown format: {}", args.format),
    }
    Ok(())
}

/// Run `frames` frames of `dt` seconds against a draw recorder
pub fn simulate(settings: &Settings, frames: u64, dt: f64) -> Result<SimulationReport> {
    let driver = AnimationDriver::new(settings.particles.clone())
        .context("Failed to set up particle animation")?;
    let mut frame_loop = FrameLoop::new(driver);
    let mut surface = DrawRecorder::new(settings.canvas.width, settings.canvas.height);

    let mut peak_active = 0;
    let mut stamps = 0;
    for _ in 0..frames {
        frame_loop.step_with(&mut surface, dt)?;
        let frame = frame_loop.system().last_frame();
        peak_active = peak_active.max(frame.active);
        stamps += surface.stamp_count();
        surface.reset();
    }

    let driver = frame_loop.system();
    let pool = driver.pool();
    let report = SimulationReport {
        frames: frame_loop.frame_count(),
        simulated_seconds: frame_loop.clock().total_time,
        capacity: pool.capacity(),
        spawn_rate: driver.settings().spawn_rate(),
        active: pool.active_count(),
        peak_active,
        stamps,
        first_active: pool.first_active(),
        first_free: pool.first_free(),
        stats: driver.stats(),
    };
    frame_loop.shutdown()?;
    Ok(report)
}

fn print_text(report: &SimulationReport) {
    println!(
        "Simulated {} frame(s), {:.2}s",
        report.frames, report.simulated_seconds
    );
    println!(
        "Pool: {}/{} active (peak {}), first_active={} first_free={}",
        report.active, report.capacity, report.peak_active, report.first_active, report.first_free
    );
    println!("Spawn rate: {:.1}/s", report.spawn_rate);
    println!(
        "Spawned: {}  Expired: {}  Evicted: {}",
        report.stats.spawned, report.stats.expired, report.stats.evicted
    );
    println!("Sprites stamped: {}", report.stamps);
    if report.stats.evicted > 0 {
        println!("Warning: pool saturated; raise particles.length or lower the spawn rate");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(length: usize, duration: f32) -> Settings {
        let mut settings = Settings::default();
        settings.particles.length = length;
        settings.particles.duration = duration;
        settings.particles.size = 8;
        settings
    }

    #[test]
    fn steady_state_fills_without_eviction() {
        // 10 particles per second, each living one second, at 10 fps
        let report = simulate(&settings(10, 1.0), 31, 0.1).unwrap();
        assert_eq!(report.frames, 31);
        assert!((report.simulated_seconds - 3.0).abs() < 1e-9);
        assert_eq!(report.stats.spawned, 30);
        assert_eq!(report.stats.evicted, 0);
        assert!(report.peak_active <= report.capacity);
        assert_eq!(
            report.stats.spawned,
            report.stats.expired + report.active as u64
        );
    }

    #[test]
    fn oversized_frames_evict() {
        // Each 0.25s frame (clamped) asks for 10 particles from a pool of 4
        let report = simulate(&settings(4, 0.1), 3, 1.0).unwrap();
        assert_eq!(report.stats.spawned, 20);
        assert_eq!(report.stats.evicted, 12);
        assert_eq!(report.active, 0);
    }

    #[test]
    fn report_serializes_to_json() {
        let report = simulate(&settings(10, 1.0), 2, 0.1).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["frames"], 2);
        assert_eq!(json["capacity"], 10);
        assert_eq!(json["stats"]["spawned"], 1);
    }
}
