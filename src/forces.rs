use ballsim_common::Vec2;

/// Force magnitude used whenever two bodies touch or overlap.
/// Independent of distance: a hard-collision penalty, not a smooth potential.
pub const COLLISION_FORCE: f32 = -100_000.0;

/// Force between two circular bodies, pointing along `p2 - p1` and scaled by the magnitude.
///
/// - `dist <= r1 + r2`: magnitude is [`COLLISION_FORCE`].
/// - otherwise: `(dist - 2 * (r1 + r2)) * r1 * r2`, negative inside twice the
///   combined radius and positive beyond it.
///
/// The caller adds the result to body 1 and subtracts it from body 2 (or the reverse
/// for links). Coincident bodies have no direction and yield the zero vector.
/// `_fallout` is accepted for callers that tune it but does not enter the magnitude.
#[inline]
pub fn pair_force(p1: Vec2, r1: f32, p2: Vec2, r2: f32, _fallout: f32) -> Vec2 {
    let diff = p2 - p1;
    let dist = diff.length();
    if dist == 0.0 || !dist.is_finite() {
        return Vec2::zero();
    }
    let direction = diff / dist;

    let radius_sum = r1 + r2;
    let magnitude = if dist <= radius_sum {
        COLLISION_FORCE
    } else {
        (dist - 2.0 * radius_sum) * (r1 * r2)
    };

    direction * magnitude
}
