use crate::body_store::BodyStore;
use crate::boundary::BoundaryReflector;
use crate::frame_driver::FrameInput;
use crate::links::LinkStore;
use crate::physics::PhysicsStepper;
use crate::scenario::ScenarioGenerator;
use anyhow::Result;
use ballsim_common::{FrameSummary, SimulationConfig};
use log::{debug, info, trace};

/// Owns the simulation state and advances it one frame at a time.
pub struct Simulation {
    /// The simulation configuration the scenario was built from.
    config: SimulationConfig,
    bodies: BodyStore,
    links: LinkStore,
    stepper: PhysicsStepper,
    /// Number of frames advanced so far.
    frame: u64,
    /// Accumulated simulation time in seconds.
    time: f32,
}

impl Simulation {
    /// Creates a new `Simulation`, generating the random scenario described by `config`.
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let params = config.get_sim_params();

        let mut generator = ScenarioGenerator::new(config.scenario.clone());
        let bodies = generator.generate_bodies(params.body_capacity)?;
        let links = generator.generate_links(&bodies, params.link_capacity)?;
        info!(
            "Scenario ready: {} bodies (capacity {}), {} links (capacity {}), seed {}.",
            bodies.len(),
            bodies.capacity(),
            links.len(),
            links.capacity(),
            config.scenario.seed
        );

        Ok(Self::from_parts(config, bodies, links))
    }

    /// Wraps stores built elsewhere.
    pub fn from_parts(config: SimulationConfig, bodies: BodyStore, links: LinkStore) -> Self {
        let params = config.get_sim_params();
        let stepper = PhysicsStepper::from_params(&params);
        debug!("Simulation Parameters: {:#?}", params);
        Self {
            config,
            bodies,
            links,
            stepper,
            frame: 0,
            time: 0.0,
        }
    }

    /// Advances one frame: boundary reflection against the frame's window, then one
    /// physics step of the frame's `dt`.
    pub fn advance(&mut self, input: FrameInput) {
        BoundaryReflector::new(input.width, input.height).apply(&mut self.bodies);
        self.stepper.step(&mut self.bodies, &self.links, input.dt);

        self.frame += 1;
        self.time += input.dt;
        trace!("Frame {} advanced by {:.4} s", self.frame, input.dt);
    }

    /// Aggregate metrics of the current state.
    pub fn summary(&self) -> FrameSummary {
        let speeds = self.bodies.iter().map(|b| b.velocity.length());
        let (total_speed, max_speed) = speeds.fold((0.0f32, 0.0f32), |(sum, max), s| (sum + s, max.max(s)));
        let mean_speed = if self.bodies.is_empty() {
            0.0
        } else {
            total_speed / self.bodies.len() as f32
        };

        FrameSummary {
            frame: self.frame,
            time: self.time,
            body_count: self.bodies.len(),
            link_count: self.links.len(),
            kinetic_energy: self.bodies.kinetic_energy(),
            mean_speed,
            max_speed,
        }
    }

    /// Retrieves the current positions of all bodies.
    pub fn positions(&self) -> Vec<(f32, f32)> {
        self.bodies.positions()
    }

    pub fn bodies(&self) -> &BodyStore {
        &self.bodies
    }

    pub fn links(&self) -> &LinkStore {
        &self.links
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Provides access to the original simulation configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body_store::BodyId;
    use crate::links::Link;
    use ballsim_common::Vec2;

    fn input(dt: f32) -> FrameInput {
        FrameInput { dt, width: 800.0, height: 450.0 }
    }

    #[test]
    fn new_builds_the_configured_scenario() {
        let mut config = SimulationConfig::default();
        config.scenario.link_count = 4;
        let sim = Simulation::new(config).unwrap();
        assert_eq!(sim.bodies().len(), 10);
        assert_eq!(sim.bodies().capacity(), 10);
        assert_eq!(sim.links().len(), 4);
        assert_eq!(sim.frame(), 0);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let mut config = SimulationConfig::default();
        config.physics.friction = -0.1;
        assert!(Simulation::new(config).is_err());
    }

    #[test]
    fn advance_reflects_before_stepping() {
        let mut config = SimulationConfig::default();
        config.physics.friction = 1.0;
        let mut bodies = BodyStore::with_capacity(1);
        let id = bodies.append(Vec2::new(2.0, 200.0), 10.0, [0; 4]).unwrap();
        bodies[id].velocity = Vec2::new(-100.0, 0.0);
        let mut sim = Simulation::from_parts(config, bodies, LinkStore::with_capacity(0));

        sim.advance(input(0.01));

        let body = &sim.bodies()[BodyId(0)];
        assert_eq!(body.velocity.x, 100.0);
        assert!((body.position.x - 3.0).abs() < 1e-4);
        assert_eq!(sim.frame(), 1);
        assert!((sim.summary().time - 0.01).abs() < 1e-7);
    }

    #[test]
    fn linked_pair_end_to_end() {
        let mut config = SimulationConfig::default();
        config.physics.friction = 1.0;
        let mut bodies = BodyStore::with_capacity(2);
        let a = bodies.append(Vec2::new(200.0, 200.0), 20.0, [0; 4]).unwrap();
        let b = bodies.append(Vec2::new(300.0, 200.0), 20.0, [0; 4]).unwrap();
        let mut links = LinkStore::with_capacity(1);
        links.append(&bodies, Link::new(a, b, -1.0, true)).unwrap();
        let mut sim = Simulation::from_parts(config, bodies, links);

        sim.advance(input(0.01));

        let (pa, pb) = (sim.bodies()[a].position, sim.bodies()[b].position);
        assert!(pa.x > 200.0 && pb.x < 300.0);
        assert!(((pa.x - 200.0) + (pb.x - 300.0)).abs() < 1e-4);
        for body in sim.bodies() {
            assert_eq!(body.acceleration, Vec2::zero());
        }
    }

    #[test]
    fn summary_reports_speeds_and_energy() {
        let config = SimulationConfig::default();
        let mut bodies = BodyStore::with_capacity(2);
        let a = bodies.append(Vec2::new(100.0, 100.0), 2.0, [0; 4]).unwrap();
        let b = bodies.append(Vec2::new(300.0, 300.0), 1.0, [0; 4]).unwrap();
        bodies[a].velocity = Vec2::new(3.0, 4.0);
        bodies[b].velocity = Vec2::new(0.0, 1.0);
        let sim = Simulation::from_parts(config, bodies, LinkStore::with_capacity(0));

        let summary = sim.summary();
        assert_eq!(summary.body_count, 2);
        assert_eq!(summary.link_count, 0);
        assert!((summary.mean_speed - 3.0).abs() < 1e-6);
        assert!((summary.max_speed - 5.0).abs() < 1e-6);
        // 0.5 * 4 * 25 + 0.5 * 1 * 1
        assert!((summary.kinetic_energy - 50.5).abs() < 1e-4);
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let run = || {
            let mut sim = Simulation::new(SimulationConfig::default()).unwrap();
            for _ in 0..30 {
                sim.advance(input(1.0 / 60.0));
            }
            sim.positions()
        };
        assert_eq!(run(), run());
    }
}
