use crate::body_store::{Body, BodyStore};
use crate::forces::pair_force;
use crate::links::LinkStore;
use ballsim_common::{SimParams, Vec2};

/// Advances a body store by one Euler step under pairwise and link forces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsStepper {
    pub fallout: f32,
    /// Velocity multiplier applied once per step: 0 stops every body, 1 disables damping.
    pub friction: f32,
}

impl PhysicsStepper {
    pub fn new(fallout: f32, friction: f32) -> Self {
        Self { fallout, friction }
    }

    pub fn from_params(params: &SimParams) -> Self {
        Self::new(params.fallout, params.friction)
    }

    /// Runs one tick of length `dt` seconds.
    ///
    /// Link forces are accumulated first, in insertion order. Then each body `i`, in store
    /// order, collects the force of every pair `(i, j)` with `j > i` and is integrated right
    /// away. Every pair is evaluated before either of its bodies moves, so the result matches
    /// accumulating all forces first and integrating afterwards.
    ///
    /// Every acceleration is zero when this returns.
    pub fn step(&self, bodies: &mut BodyStore, links: &LinkStore, dt: f32) {
        self.accumulate_link_forces(bodies, links);

        let slice = bodies.as_mut_slice();
        for i in 0..slice.len() {
            let (head, tail) = slice.split_at_mut(i + 1);
            let current = &mut head[i];
            let sqr_radius = current.radius_squared();

            for other in tail.iter_mut() {
                let force = pair_force(
                    current.position,
                    current.radius,
                    other.position,
                    other.radius,
                    self.fallout,
                );
                current.acceleration += force / sqr_radius;
                other.acceleration -= force / other.radius_squared();
            }

            self.integrate(current, dt);
        }
    }

    /// Adds the force of every link to the accelerations of its bodies.
    ///
    /// The force law runs from origin to affected; the scaled result is pushed onto the
    /// affected body and, for `bothways` links, the reaction onto the origin.
    pub fn accumulate_link_forces(&self, bodies: &mut BodyStore, links: &LinkStore) {
        for link in links {
            let (o_pos, o_radius) = {
                let o = &bodies[link.origin];
                (o.position, o.radius)
            };
            let (a_pos, a_radius) = {
                let a = &bodies[link.affected];
                (a.position, a.radius)
            };

            let force = pair_force(o_pos, o_radius, a_pos, a_radius, link.strength.recip()) * link.strength;

            bodies[link.affected].acceleration += force / (a_radius * a_radius);
            if link.bothways {
                bodies[link.origin].acceleration -= force / (o_radius * o_radius);
            }
        }
    }

    #[inline(always)]
    fn integrate(&self, body: &mut Body, dt: f32) {
        body.velocity = body.velocity * self.friction;
        body.velocity += body.acceleration * dt;
        body.position += body.velocity * dt;
        body.acceleration = Vec2::zero();
    }
}
