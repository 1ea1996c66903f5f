use crate::sim_params::SimParams;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Window the bodies are confined to (pixels)
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

// Frame pacing and run length
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct TimingConfig {
    pub target_fps: u32,
    pub total_frames: u64, // Close request is raised after this many frames
    #[serde(default)]
    pub realtime: bool, // Measure dt from the wall clock instead of using 1 / target_fps
    #[serde(default = "default_summary_interval")]
    pub summary_interval_frames: u64,
}

// Random scenario generation
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub seed: u64,
    pub num_bodies: usize,
    #[serde(default)]
    pub body_capacity: Option<usize>, // Defaults to num_bodies
    pub position_min: f32,
    pub position_max: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    #[serde(default)]
    pub link_count: usize,
    #[serde(default)]
    pub link_capacity: Option<usize>, // Defaults to link_count
    #[serde(default = "default_link_strength")]
    pub link_strength_min: f32,
    #[serde(default = "default_link_strength")]
    pub link_strength_max: f32,
    #[serde(default = "default_link_bothways")]
    pub link_bothways: bool,
}

// Force law and integration coefficients
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct PhysicsConfig {
    #[serde(default = "default_fallout")]
    pub fallout: f32,
    #[serde(default = "default_friction")]
    pub friction: f32,
}

// Rendering output
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct OutputConfig {
    #[serde(default = "default_render")]
    pub render: bool,
    #[serde(default)]
    pub save_frames: bool,
    #[serde(default = "default_frames_dir")]
    pub frames_dir: String,
    #[serde(default = "default_frame_interval")]
    pub frame_interval: u64, // Write every Nth frame when save_frames is on
    #[serde(default)]
    pub background: [u8; 3],
}

/// Main simulation configuration structure, loaded from config.toml.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SimulationConfig {
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    pub scenario: ScenarioConfig,
    #[serde(default)]
    pub physics: PhysicsConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig { width: 800, height: 450 }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            target_fps: 60,
            total_frames: 600,
            realtime: false,
            summary_interval_frames: default_summary_interval(),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            seed: 0,
            num_bodies: 10,
            body_capacity: None,
            position_min: 0.0,
            position_max: 450.0,
            radius_min: 20.0,
            radius_max: 30.0,
            link_count: 0,
            link_capacity: None,
            link_strength_min: default_link_strength(),
            link_strength_max: default_link_strength(),
            link_bothways: default_link_bothways(),
        }
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig { fallout: default_fallout(), friction: default_friction() }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            render: default_render(),
            save_frames: false,
            frames_dir: default_frames_dir(),
            frame_interval: default_frame_interval(),
            background: [0, 0, 0],
        }
    }
}

impl SimulationConfig {
    /// Loads the simulation configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();

        let config_str = std::fs::read_to_string(path_ref)
            .with_context(|| format!("Failed to read config file '{}'", path_ref.display()))?;
        Self::from_toml_str(&config_str)
            .with_context(|| format!("Invalid config file '{}'", path_ref.display()))
    }

    /// Parses and validates a configuration from TOML text.
    pub fn from_toml_str(config_str: &str) -> Result<Self> {
        let config: SimulationConfig =
            toml::from_str(config_str).map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.window.width == 0 || self.window.height == 0 {
            anyhow::bail!("window width and height must be positive.");
        }
        if self.timing.target_fps == 0 {
            anyhow::bail!("target_fps must be greater than 0.");
        }
        if self.timing.summary_interval_frames == 0 {
            anyhow::bail!("summary_interval_frames must be greater than 0.");
        }

        let scenario = &self.scenario;
        if scenario.num_bodies == 0 {
            anyhow::bail!("num_bodies must be greater than 0.");
        }
        if self.body_capacity() < scenario.num_bodies {
            anyhow::bail!(
                "body_capacity ({}) is smaller than num_bodies ({}).",
                self.body_capacity(),
                scenario.num_bodies
            );
        }
        if scenario.position_max < scenario.position_min {
            anyhow::bail!("position_max must not be smaller than position_min.");
        }
        if scenario.radius_max <= 0.0 || scenario.radius_max < scenario.radius_min {
            anyhow::bail!("radius_max must be positive and not smaller than radius_min.");
        }
        if scenario.link_count > 0 && scenario.num_bodies < 2 {
            anyhow::bail!("links need at least two bodies.");
        }
        if self.link_capacity() < scenario.link_count {
            anyhow::bail!(
                "link_capacity ({}) is smaller than link_count ({}).",
                self.link_capacity(),
                scenario.link_count
            );
        }
        if scenario.link_strength_max < scenario.link_strength_min {
            anyhow::bail!("link_strength_max must not be smaller than link_strength_min.");
        }

        if !(0.0..=1.0).contains(&self.physics.friction) {
            anyhow::bail!("friction must be within [0, 1], got {}.", self.physics.friction);
        }
        if !self.physics.fallout.is_finite() {
            anyhow::bail!("fallout must be finite.");
        }

        if self.output.frame_interval == 0 {
            anyhow::bail!("frame_interval must be greater than 0.");
        }
        Ok(())
    }

    pub fn body_capacity(&self) -> usize {
        self.scenario.body_capacity.unwrap_or(self.scenario.num_bodies)
    }

    pub fn link_capacity(&self) -> usize {
        self.scenario.link_capacity.unwrap_or(self.scenario.link_count)
    }

    /// Converts the configuration into simulation parameters used at runtime.
    pub fn get_sim_params(&self) -> SimParams {
        SimParams {
            fallout: self.physics.fallout,
            friction: self.physics.friction,
            body_capacity: self.body_capacity(),
            link_capacity: self.link_capacity(),
        }
    }
}

fn default_summary_interval() -> u64 {
    60 // Once per second at the default frame rate
}

fn default_link_strength() -> f32 {
    1.0
}

fn default_link_bothways() -> bool {
    true
}

fn default_fallout() -> f32 {
    5e-2
}

fn default_friction() -> f32 {
    0.995
}

fn default_render() -> bool {
    true
}

fn default_frames_dir() -> String {
    "frames".to_string()
}

fn default_frame_interval() -> u64 {
    10
}
