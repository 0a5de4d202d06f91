use crate::{Fp, Vec2, error::ConfigError, narrow::Aabb};

/// A circle in the arena. Its mass is its radius: larger circles are heavier.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    /// Position of the centre
    pub pos: Vec2,
    /// Velocity
    pub vel: Vec2,
    /// Acceleration, usually `(0, gravity)`
    pub acc: Vec2,
    /// Radius, doubling as mass
    pub rad: Fp,
    /// Opaque display attribute, passed through untouched. Populated scenes store a `0xRRGGBB` colour.
    pub tag: u32,
}

impl Body {
    pub fn new(rad: Fp, pos: Vec2, vel: Vec2, acc: Vec2, tag: u32) -> Result<Body, ConfigError> {
        if !rad.is_finite() || !pos.is_finite() || !vel.is_finite() || !acc.is_finite() {
            return Err(ConfigError::NonFinite("body state"));
        }
        if rad <= 0.0 {
            return Err(ConfigError::InvalidSize { min: rad, max: rad });
        }
        Ok(Body { pos, vel, acc, rad, tag })
    }

    #[inline]
    pub fn mass(&self) -> Fp {
        self.rad
    }

    #[inline]
    pub fn aabb(&self) -> Aabb {
        //! Returns the bounding box `[pos - rad, pos + rad]`.
        Aabb::around(self.pos, self.rad)
    }

    #[inline]
    pub fn kinetic_energy(&self) -> Fp {
        0.5 * self.mass() * self.vel.length_squared()
    }
    #[inline]
    pub fn potential_energy(&self) -> Fp {
        //! Measured against the arena origin, with `y` growing toward the floor.
        self.mass() * self.acc.length() * self.pos.y
    }
    #[inline]
    pub fn energy(&self) -> Fp {
        self.kinetic_energy() - self.potential_energy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn body_validation() {
        assert!(Body::new(1.0, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, 0).is_ok());
        assert_eq!(
            Body::new(0.0, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO, 0),
            Err(ConfigError::InvalidSize { min: 0.0, max: 0.0 })
        );
        assert_eq!(
            Body::new(1.0, Vec2::new(Fp::NAN, 0.0), Vec2::ZERO, Vec2::ZERO, 0),
            Err(ConfigError::NonFinite("body state"))
        );
    }

    #[test]
    fn body_energy() {
        let b = Body::new(2.0, Vec2::new(0.0, 10.0), Vec2::new(3.0, 4.0), Vec2::new(0.0, 0.5), 0xff00ff).unwrap();
        assert_eq!(b.mass(), 2.0);
        assert_relative_eq!(b.kinetic_energy(), 25.0);
        assert_relative_eq!(b.potential_energy(), 10.0);
        assert_relative_eq!(b.energy(), 15.0);

        let bb = b.aabb();
        assert_eq!(bb.min, Vec2::new(-2.0, 8.0));
        assert_eq!(bb.max, Vec2::new(2.0, 12.0));
    }
}
