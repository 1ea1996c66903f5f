use serde::{Deserialize, Serialize};

/// Aggregate metrics of the body store at a specific frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSummary {
    /// Number of frames advanced so far.
    pub frame: u64,
    /// Accumulated simulation time in seconds.
    pub time: f32,
    /// Number of live bodies.
    pub body_count: usize,
    /// Number of declared links.
    pub link_count: usize,
    /// Sum of `0.5 * r^2 * |v|^2`, using radius squared as the mass the stepper divides by.
    pub kinetic_energy: f32,
    /// Mean speed over all bodies (0 when the store is empty).
    pub mean_speed: f32,
    /// Largest speed of any body.
    pub max_speed: f32,
}
