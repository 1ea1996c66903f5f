use crate::error::{StoreError, StoreKind};
use ballsim_common::Vec2;

/// RGBA display colour. Never read by the physics.
pub type Color = [u8; 4];

/// Radius floor applied to every body at creation.
pub const MIN_RADIUS: f32 = 1.0;

/// Stable index of a body inside its `BodyStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub usize);

/// A circular particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Accumulated during a step, zero outside of one.
    pub acceleration: Vec2,
    pub radius: f32,
    pub color: Color,
}

impl Body {
    /// A body at rest. Radii below `MIN_RADIUS` (and non-finite radii) are raised to the floor.
    pub fn new(position: Vec2, radius: f32, color: Color) -> Self {
        let radius = if radius.is_finite() { radius.max(MIN_RADIUS) } else { MIN_RADIUS };
        Body {
            position,
            velocity: Vec2::zero(),
            acceleration: Vec2::zero(),
            radius,
            color,
        }
    }

    #[inline(always)]
    pub fn radius_squared(&self) -> f32 {
        self.radius * self.radius
    }
}

/// Holds every body of the simulation in one contiguous, fixed-capacity buffer.
///
/// The buffer is allocated once in `with_capacity` and never grows, so a `BodyId`
/// stays valid for the whole lifetime of the store.
#[derive(Debug, Clone)]
pub struct BodyStore {
    bodies: Vec<Body>,
    max_len: usize,
}

impl BodyStore {
    pub fn with_capacity(max_len: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(max_len),
            max_len,
        }
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_len
    }

    pub fn is_full(&self) -> bool {
        self.bodies.len() >= self.max_len
    }

    /// Adds a new body at rest to the end of the store.
    ///
    /// A full store rejects the insert and is left untouched.
    pub fn append(&mut self, position: Vec2, radius: f32, color: Color) -> Result<BodyId, StoreError> {
        if self.is_full() {
            log::warn!(
                "Body store maximum reached ({} bodies). Dropping body at ({:.1}, {:.1}).",
                self.max_len,
                position.x,
                position.y
            );
            return Err(StoreError::CapacityExceeded {
                store: StoreKind::Bodies,
                capacity: self.max_len,
            });
        }
        let id = BodyId(self.bodies.len());
        self.bodies.push(Body::new(position, radius, color));
        Ok(id)
    }

    pub fn contains(&self, id: BodyId) -> bool {
        id.0 < self.bodies.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }

    pub fn as_slice(&self) -> &[Body] {
        &self.bodies
    }

    pub fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Current positions of all bodies as (x, y) tuples.
    pub fn positions(&self) -> Vec<(f32, f32)> {
        self.bodies.iter().map(|b| (b.position.x, b.position.y)).collect()
    }

    /// Sum of `0.5 * r^2 * |v|^2` over all bodies.
    pub fn kinetic_energy(&self) -> f32 {
        self.bodies
            .iter()
            .map(|b| 0.5 * b.radius_squared() * b.velocity.length_squared())
            .sum()
    }
}

impl std::ops::Index<BodyId> for BodyStore {
    type Output = Body;

    fn index(&self, id: BodyId) -> &Body {
        &self.bodies[id.0]
    }
}

impl std::ops::IndexMut<BodyId> for BodyStore {
    fn index_mut(&mut self, id: BodyId) -> &mut Body {
        &mut self.bodies[id.0]
    }
}

impl<'a> IntoIterator for &'a BodyStore {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
