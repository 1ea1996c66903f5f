use crate::body_store::{BodyId, BodyStore, Color, MIN_RADIUS};
use crate::links::{Link, LinkStore};
use anyhow::Result;
use ballsim_common::{ScenarioConfig, Vec2};
use log::{debug, warn};
use rand::distr::Uniform;
use rand::prelude::*;

/// Builds random initial body and link stores from an explicitly seeded RNG.
pub struct ScenarioGenerator {
    config: ScenarioConfig,
    rng: StdRng,
}

impl ScenarioGenerator {
    pub fn new(config: ScenarioConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Places `num_bodies` bodies with uniformly random positions, radii and colours.
    ///
    /// Both position components share the `[position_min, position_max]` range. The minimum
    /// radius is raised to `MIN_RADIUS` first. Generation stops at the first rejected append.
    pub fn generate_bodies(&mut self, capacity: usize) -> Result<BodyStore> {
        let cfg = &self.config;
        let radius_min = cfg.radius_min.max(MIN_RADIUS);
        let radius_max = cfg.radius_max.max(radius_min);

        let pos_dist = Uniform::new_inclusive(cfg.position_min, cfg.position_max)?;
        let radius_dist = Uniform::new_inclusive(radius_min, radius_max)?;
        let channel_dist = Uniform::new_inclusive(0u8, 255u8)?;

        let mut bodies = BodyStore::with_capacity(capacity);
        for _ in 0..cfg.num_bodies {
            let position = Vec2::new(self.rng.sample(pos_dist), self.rng.sample(pos_dist));
            let color: Color = [
                self.rng.sample(channel_dist),
                self.rng.sample(channel_dist),
                self.rng.sample(channel_dist),
                255,
            ];
            let radius = self.rng.sample(radius_dist);

            if let Err(e) = bodies.append(position, radius, color) {
                warn!("Stopping body generation after {} bodies: {}", bodies.len(), e);
                break;
            }
        }
        debug!("Generated {} bodies (capacity {}).", bodies.len(), bodies.capacity());
        Ok(bodies)
    }

    /// Declares `link_count` links between distinct random bodies of `bodies`.
    pub fn generate_links(&mut self, bodies: &BodyStore, capacity: usize) -> Result<LinkStore> {
        let cfg = &self.config;
        let mut links = LinkStore::with_capacity(capacity);
        if cfg.link_count == 0 {
            return Ok(links);
        }
        if bodies.len() < 2 {
            anyhow::bail!("Cannot link bodies in a store of {} bodies.", bodies.len());
        }

        let origin_dist = Uniform::new(0usize, bodies.len())?;
        let other_dist = Uniform::new(0usize, bodies.len() - 1)?;
        let strength_dist = Uniform::new_inclusive(cfg.link_strength_min, cfg.link_strength_max)?;

        for _ in 0..cfg.link_count {
            let origin = self.rng.sample(origin_dist);
            let mut affected = self.rng.sample(other_dist);
            if affected >= origin {
                affected += 1; // Skip the origin itself
            }
            let strength = self.rng.sample(strength_dist);
            let link = Link::new(BodyId(origin), BodyId(affected), strength, cfg.link_bothways);

            if let Err(e) = links.append(bodies, link) {
                warn!("Stopping link generation after {} links: {}", links.len(), e);
                break;
            }
        }
        debug!("Generated {} links (capacity {}).", links.len(), links.capacity());
        Ok(links)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> ScenarioConfig {
        ScenarioConfig {
            seed: 1234,
            num_bodies: 25,
            position_min: 10.0,
            position_max: 300.0,
            radius_min: 0.2,
            radius_max: 6.0,
            link_count: 8,
            link_strength_min: -1.0,
            link_strength_max: 2.0,
            ..ScenarioConfig::default()
        }
    }

    #[test]
    fn bodies_respect_configured_ranges() {
        let mut generator = ScenarioGenerator::new(config());
        let bodies = generator.generate_bodies(25).unwrap();
        assert_eq!(bodies.len(), 25);
        for body in &bodies {
            assert!((10.0..=300.0).contains(&body.position.x));
            assert!((10.0..=300.0).contains(&body.position.y));
            assert!((MIN_RADIUS..=6.0).contains(&body.radius));
            assert_eq!(body.color[3], 255);
            assert_eq!(body.velocity, Vec2::zero());
        }
    }

    #[test]
    fn same_seed_gives_same_scenario() {
        let run = || {
            let mut generator = ScenarioGenerator::new(config());
            let bodies = generator.generate_bodies(25).unwrap();
            let links = generator.generate_links(&bodies, 8).unwrap();
            (bodies.as_slice().to_vec(), links.as_slice().to_vec())
        };
        assert_eq!(run(), run());

        let mut other = config();
        other.seed = 4321;
        let mut generator = ScenarioGenerator::new(other);
        let bodies = generator.generate_bodies(25).unwrap();
        assert_ne!(bodies.as_slice().to_vec(), run().0);
    }

    #[test]
    fn links_connect_distinct_live_bodies() {
        let mut generator = ScenarioGenerator::new(config());
        let bodies = generator.generate_bodies(25).unwrap();
        let links = generator.generate_links(&bodies, 8).unwrap();
        assert_eq!(links.len(), 8);
        for link in &links {
            assert_ne!(link.origin, link.affected);
            assert!(bodies.contains(link.origin) && bodies.contains(link.affected));
            assert!((-1.0..=2.0).contains(&link.strength));
            assert!(link.bothways);
        }
    }

    #[test]
    fn undersized_stores_stop_generation_cleanly() {
        let mut generator = ScenarioGenerator::new(config());
        let bodies = generator.generate_bodies(10).unwrap();
        assert_eq!(bodies.len(), 10);
        let links = generator.generate_links(&bodies, 3).unwrap();
        assert_eq!(links.len(), 3);
    }

    #[test]
    fn degenerate_ranges_are_allowed() {
        let mut cfg = config();
        cfg.position_min = 42.0;
        cfg.position_max = 42.0;
        cfg.radius_min = 3.0;
        cfg.radius_max = 3.0;
        let bodies = ScenarioGenerator::new(cfg).generate_bodies(25).unwrap();
        assert!(bodies.iter().all(|b| b.position == Vec2::new(42.0, 42.0) && b.radius == 3.0));
    }
}
