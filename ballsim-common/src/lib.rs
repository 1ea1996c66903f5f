pub mod config;
pub mod sim_params;
pub mod snapshot;
pub mod vecmath;

// Re-export key types for easier use by dependent crates
pub use config::{
    OutputConfig, PhysicsConfig, ScenarioConfig, SimulationConfig, TimingConfig, WindowConfig,
};
pub use sim_params::SimParams;
pub use snapshot::FrameSummary;
pub use vecmath::Vec2;
