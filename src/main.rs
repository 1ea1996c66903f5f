use anyhow::Result;
use clap::Parser;
use log::{debug, error, info, trace};
use std::path::PathBuf;
use std::time::Instant;

use ballsim::{FixedClock, FrameClock, ImageRenderer, NullRenderer, RealtimeClock, Renderer, Simulation};
use ballsim_common::SimulationConfig;

/// Command-line arguments for the simulation
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the config.toml file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Number of frames to run before closing (overrides timing.total_frames)
    #[arg(long)]
    frames: Option<u64>,

    /// Scenario seed (overrides scenario.seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Pace frames by the wall clock instead of a fixed timestep
    #[arg(long)]
    realtime: bool,

    /// Write rendered frames as PNG files
    #[arg(long)]
    save_frames: bool,

    /// Directory for rendered frames (overrides output.frames_dir)
    #[arg(long)]
    frames_dir: Option<String>,
}

impl Args {
    fn apply_to(&self, config: &mut SimulationConfig) -> Result<()> {
        if let Some(frames) = self.frames {
            config.timing.total_frames = frames;
        }
        if let Some(seed) = self.seed {
            config.scenario.seed = seed;
        }
        if self.realtime {
            config.timing.realtime = true;
        }
        if self.save_frames {
            config.output.save_frames = true;
        }
        if let Some(dir) = &self.frames_dir {
            config.output.frames_dir = dir.clone();
        }
        config.validate()
    }
}

fn build_clock(config: &SimulationConfig) -> Box<dyn FrameClock> {
    let timing = &config.timing;
    let (width, height) = (config.window.width as f32, config.window.height as f32);
    if timing.realtime {
        Box::new(RealtimeClock::new(timing.target_fps, width, height, timing.total_frames))
    } else {
        Box::new(FixedClock::new(timing.target_fps, width, height, timing.total_frames))
    }
}

fn build_renderer(config: &SimulationConfig) -> Result<Box<dyn Renderer>> {
    let output = &config.output;
    if !output.render {
        info!("Rendering disabled.");
        return Ok(Box::new(NullRenderer));
    }
    let renderer = ImageRenderer::new(config.window.width, config.window.height, output.background);
    if output.save_frames {
        Ok(Box::new(renderer.with_output(&output.frames_dir, output.frame_interval)?))
    } else {
        Ok(Box::new(renderer))
    }
}

fn main() -> Result<()> {
    // Initialize the logger
    env_logger::init();
    let args = Args::parse();

    info!("Starting ball simulation...");

    // --- Load Configuration ---
    let mut config = SimulationConfig::load(&args.config)?;
    args.apply_to(&mut config)?;
    info!("Loaded configuration from {}", args.config.display());
    debug!("Configuration: {:#?}", config);

    // --- Initialize Simulation ---
    let mut sim = Simulation::new(config)?;
    let mut clock = build_clock(sim.config());
    let mut renderer = build_renderer(sim.config())?;
    let summary_interval = sim.config().timing.summary_interval_frames;

    // --- Frame Loop: boundary -> physics -> render ---
    info!(
        "Starting frame loop for {} frames ({}).",
        sim.config().timing.total_frames,
        if sim.config().timing.realtime { "realtime" } else { "fixed timestep" }
    );
    let start_time = Instant::now();

    while let Some(input) = clock.next_frame() {
        let step_start_time = Instant::now();
        sim.advance(input);
        let step_duration = step_start_time.elapsed();

        if let Err(e) = renderer.draw(sim.frame(), sim.bodies()) {
            error!("Error rendering frame {}: {}", sim.frame(), e);
            anyhow::bail!("Rendering failed.");
        }

        if sim.frame() % summary_interval == 0 {
            let summary = sim.summary();
            info!(
                "Frame {} ({:.2} s) | Bodies: {} | Links: {} | KE: {:.1} | Mean speed: {:.2} | Step Time: {:6.3} ms",
                summary.frame,
                summary.time,
                summary.body_count,
                summary.link_count,
                summary.kinetic_energy,
                summary.mean_speed,
                step_duration.as_secs_f64() * 1000.0
            );
        } else {
            trace!(
                "Frame {} completed in {:.3} ms",
                sim.frame(),
                step_duration.as_secs_f64() * 1000.0
            );
        }
    }

    let total_duration = start_time.elapsed();
    let summary = sim.summary();
    info!(
        "Simulation finished after {} frames ({:.2} s simulated) in {:.3} s. Max speed: {:.2}",
        summary.frame,
        summary.time,
        total_duration.as_secs_f64(),
        summary.max_speed
    );

    info!("Simulation Complete.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_overrides_are_applied_and_validated() {
        let args = Args::parse_from(["ballsim", "--frames", "12", "--seed", "99", "--save-frames", "--frames-dir", "tmp"]);
        let mut config = SimulationConfig::default();
        args.apply_to(&mut config).unwrap();
        assert_eq!(config.timing.total_frames, 12);
        assert_eq!(config.scenario.seed, 99);
        assert!(config.output.save_frames);
        assert_eq!(config.output.frames_dir, "tmp");
        assert!(!config.timing.realtime);
        assert_eq!(args.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn headless_loop_runs_to_the_frame_budget() {
        let mut config = SimulationConfig::default();
        config.timing.total_frames = 5;
        config.output.render = false;
        let mut sim = Simulation::new(config).unwrap();
        let mut clock = build_clock(sim.config());
        let mut renderer = build_renderer(sim.config()).unwrap();
        while let Some(input) = clock.next_frame() {
            sim.advance(input);
            renderer.draw(sim.frame(), sim.bodies()).unwrap();
        }
        assert_eq!(sim.frame(), 5);
    }
}
