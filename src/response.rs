//! Collision response for confirmed overlapping pairs.

use crate::{Body, Fp, Vec2};

/// Separation direction used when two centres coincide.
pub const FALLBACK_NORMAL: Vec2 = Vec2::X;

#[inline]
pub fn restitution(elasticity: Fp) -> Fp {
    //! Blend applied to outgoing velocities. Never below `0.8`: even inelastic pairs keep most of the reflected impulse.
    0.8 + 0.2 * elasticity
}

#[inline]
fn outgoing_velocity(v1: Vec2, m1: Fp, v2: Vec2, m2: Fp, norm: Vec2, scale: Fp) -> Vec2 {
    // 2D elastic collision along the line of centres
    (v1 - norm * (2.0 * m2 / (m1 + m2) * (v1 - v2).dot(norm))) * scale
}

pub fn resolve(b1: &mut Body, b2: &mut Body, elasticity: Fp, dt: Fp) {
    //! Pushes the bodies apart, heavier body moving less, and exchanges their velocities.
    //! Both bodies then receive an extra `acc * dt` on top of the step's integration.
    //! Bodies that no longer overlap are never pulled together.
    let (m1, m2) = (b1.mass(), b2.mass());
    let delta = b1.pos - b2.pos;
    let dist = delta.length();
    let depth = (b1.rad + b2.rad - dist).max(0.0);
    let norm = if dist > 0.0 { delta / dist } else { FALLBACK_NORMAL };

    b1.pos += norm * (depth * m2 / (m1 + m2));
    b2.pos -= norm * (depth * m1 / (m1 + m2));

    let scale = restitution(elasticity);
    let v1 = outgoing_velocity(b1.vel, m1, b2.vel, m2, norm, scale);
    let v2 = outgoing_velocity(b2.vel, m2, b1.vel, m1, -norm, scale);
    b1.vel = v1 + b1.acc * dt;
    b2.vel = v2 + b2.acc * dt;
}

#[inline]
pub fn pair_mut(bodies: &mut [Body], a: usize, b: usize) -> (&mut Body, &mut Body) {
    //! Borrows two distinct bodies mutably, in argument order.
    assert_ne!(a, b, "a body cannot collide with itself");
    if a < b {
        let (lo, hi) = bodies.split_at_mut(b);
        (&mut lo[a], &mut hi[0])
    } else {
        let (lo, hi) = bodies.split_at_mut(a);
        (&mut hi[0], &mut lo[b])
    }
}
