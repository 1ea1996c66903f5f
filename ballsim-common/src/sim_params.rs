use serde::{Deserialize, Serialize};

/// Simulation parameters derived from the configuration, fixed for the whole run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimParams {
    // Physics
    pub fallout: f32,  // Passed through to the force law, not used by its magnitude
    pub friction: f32, // Per-tick velocity multiplier in [0, 1]

    // Store capacities
    pub body_capacity: usize,
    pub link_capacity: usize,
}
