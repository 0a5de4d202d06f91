//! Per-body semi-implicit Euler step with reflecting walls.

use crate::{Body, Fp, config::Arena};

#[inline]
fn reflect_axis(pos: &mut Fp, vel: &mut Fp, rad: Fp, extent: Fp, elasticity: Fp) {
    if *pos - rad <= 0.0 {
        *pos = 2.0 * rad - *pos;
        *vel = (*vel * elasticity).abs();
    } else if *pos + rad >= extent {
        *pos = 2.0 * extent - *pos - 2.0 * rad;
        *vel = -(*vel * elasticity).abs();
    }
}

pub fn integrate(body: &mut Body, arena: &Arena, elasticity: Fp, dt: Fp) {
    //! Advances `body` from its current velocity, reflecting off each wall it reaches, then
    //! applies its acceleration. A zero `dt` leaves it untouched.
    if dt > 0.0 {
        let mut next = body.pos + body.vel * dt;
        reflect_axis(&mut next.x, &mut body.vel.x, body.rad, arena.width, elasticity);
        reflect_axis(&mut next.y, &mut body.vel.y, body.rad, arena.height, elasticity);
        body.pos = next;
    }
    body.vel += body.acc * dt;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Vec2;
    use approx::assert_relative_eq;

    fn arena() -> Arena {
        Arena { width: 100.0, height: 50.0 }
    }
    fn body(x: Fp, y: Fp, vx: Fp, vy: Fp) -> Body {
        Body::new(5.0, Vec2::new(x, y), Vec2::new(vx, vy), Vec2::ZERO, 0).unwrap()
    }

    #[test]
    fn free_flight() {
        let mut b = body(50.0, 25.0, 2.0, -1.0);
        b.acc = Vec2::new(0.0, 0.5);
        integrate(&mut b, &arena(), 1.0, 2.0);
        // position uses the velocity from before the step
        assert_eq!(b.pos, Vec2::new(54.0, 23.0));
        assert_eq!(b.vel, Vec2::new(2.0, 0.0));
    }

    #[test]
    fn near_wall() {
        let mut b = body(4.0, 25.0, -1.0, 0.0);
        integrate(&mut b, &arena(), 0.5, 1.0);
        assert!(b.pos.x >= b.rad);
        assert_relative_eq!(b.pos.x, 7.0);
        assert_relative_eq!(b.vel.x, 0.5);
    }

    #[test]
    fn far_walls() {
        let mut b = body(94.0, 44.0, 3.0, 2.0);
        integrate(&mut b, &arena(), 1.0, 1.0);
        assert_relative_eq!(b.pos.x, 93.0);
        assert_relative_eq!(b.pos.y, 44.0);
        assert_relative_eq!(b.vel.x, -3.0);
        assert_relative_eq!(b.vel.y, -2.0);
    }

    #[test]
    fn zero_dt() {
        let mut b = body(2.0, 25.0, -1.0, 0.0);
        b.acc = Vec2::new(0.0, 1.0);
        integrate(&mut b, &arena(), 1.0, 0.0);
        assert_eq!(b.pos, Vec2::new(2.0, 25.0));
        assert_eq!(b.vel, Vec2::new(-1.0, 0.0));
    }
}
