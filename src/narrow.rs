//! Narrowphase data and logic module.

use crate::{Body, BodyPair, Fp, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}
impl Aabb {
    #[inline]
    pub fn around(centre: Vec2, rad: Fp) -> Aabb {
        //! Square bounding box of a circle.
        Aabb {
            min: centre - Vec2::new(rad, rad),
            max: centre + Vec2::new(rad, rad),
        }
    }
}

#[inline]
pub fn circle_circle_test(p1: Vec2, r1: Fp, p2: Vec2, r2: Fp) -> bool {
    //! Returns whether two circles overlap or touch. No square root is taken.
    let r = r1 + r2;
    p1.distance_squared(p2) <= r * r
}

#[inline]
pub fn body_test(b1: &Body, b2: &Body) -> bool {
    circle_circle_test(b1.pos, b1.rad, b2.pos, b2.rad)
}

pub fn retain_colliding(bodies: &[Body], pairs: &mut Vec<BodyPair>) {
    //! Drops every candidate pair whose circles do not actually overlap.
    pairs.retain(|&(a, b)| body_test(&bodies[a], &bodies[b]));
}
