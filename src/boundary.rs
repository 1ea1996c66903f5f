use crate::body_store::BodyStore;

/// Keeps bodies inside `[0, width] x [0, height]` by turning their velocity back inward.
///
/// Positions are never corrected. A body fast enough to cross the edge within one step
/// ends up outside and is sent back on the following frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryReflector {
    pub width: f32,
    pub height: f32,
}

impl BoundaryReflector {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn apply(&self, bodies: &mut BodyStore) {
        for body in bodies.as_mut_slice() {
            let r = body.radius;
            body.velocity.x = reflect(body.position.x, body.velocity.x, r, self.width);
            body.velocity.y = reflect(body.position.y, body.velocity.y, r, self.height);
        }
    }
}

#[inline(always)]
fn reflect(position: f32, velocity: f32, radius: f32, bound: f32) -> f32 {
    if position < radius {
        velocity.abs()
    } else if position > bound - radius {
        -velocity.abs()
    } else {
        velocity
    }
}
