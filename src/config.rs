//! Configuration types for building a simulation, loadable from YAML.
//!
//! A [`SimConfig`] groups:
//!
//! - [`Arena`]      – the walls the bodies bounce between
//! - [`Physics`]    – gravity, elasticity and the grid pairing policy
//! - [`Population`] – how many bodies to spawn and their size/velocity ranges
//!
//! Units follow a frame-driven renderer: time in milliseconds, lengths in pixels,
//! and `y` growing downward so positive gravity pulls toward the floor.
//!
//! ```yaml
//! arena:
//!   width: 800.0
//!   height: 600.0
//! physics:
//!   gravity: 0.0005
//!   elasticity: 0.9
//!   grid_pairing: unique   # or directional
//! population:
//!   count: 200
//!   min_size: 4.0
//!   max_size: 14.0
//!   h_velocity: 0.5        # x velocities drawn from [-h/2, h/2]
//!   v_velocity: 0.5
//!   seed: 42
//! broad_phase: grid        # naive, grid or sap
//! ```

use crate::{BroadPhaseKind, Fp, GridPairing, error::ConfigError};
use serde::Deserialize;

#[inline]
fn finite(v: Fp, name: &'static str) -> Result<Fp, ConfigError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(ConfigError::NonFinite(name))
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Arena {
    pub width: Fp,
    pub height: Fp,
}
impl Default for Arena {
    fn default() -> Self {
        Arena { width: 800.0, height: 600.0 }
    }
}
impl Arena {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite(self.width, "arena width")?;
        finite(self.height, "arena height")?;
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(ConfigError::NonPositiveArena { width: self.width, height: self.height });
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Physics {
    /// Downward acceleration applied to every body
    pub gravity: Fp,
    /// Wall restitution, also blended into collision restitution
    pub elasticity: Fp,
    pub grid_pairing: GridPairing,
}
impl Default for Physics {
    fn default() -> Self {
        Physics { gravity: 0.0005, elasticity: 0.9, grid_pairing: GridPairing::Unique }
    }
}
impl Physics {
    pub fn validate(&self) -> Result<(), ConfigError> {
        finite(self.gravity, "gravity")?;
        let e = finite(self.elasticity, "elasticity")?;
        if !(0.0..=1.0).contains(&e) {
            return Err(ConfigError::InvalidElasticity(e));
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct Population {
    pub count: usize,
    /// Smallest radius
    pub min_size: Fp,
    /// Largest radius
    pub max_size: Fp,
    /// Width of the initial x velocity range, centred on zero
    pub h_velocity: Fp,
    /// Width of the initial y velocity range, centred on zero
    pub v_velocity: Fp,
    pub seed: u64,
}
impl Default for Population {
    fn default() -> Self {
        Population { count: 200, min_size: 4.0, max_size: 14.0, h_velocity: 0.5, v_velocity: 0.5, seed: 0 }
    }
}
impl Population {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.count == 0 {
            return Err(ConfigError::ZeroCount);
        }
        finite(self.min_size, "min_size")?;
        finite(self.max_size, "max_size")?;
        finite(self.h_velocity, "h_velocity")?;
        finite(self.v_velocity, "v_velocity")?;
        if self.min_size <= 0.0 || self.min_size > self.max_size {
            return Err(ConfigError::InvalidSize { min: self.min_size, max: self.max_size });
        }
        Ok(())
    }
}

/// Top-level configuration.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct SimConfig {
    pub arena: Arena,
    pub physics: Physics,
    pub population: Population,
    pub broad_phase: BroadPhaseKind,
}
impl SimConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.arena.validate()?;
        self.physics.validate()?;
        self.population.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let arena = Arena { width: 0.0, height: 10.0 };
        assert_eq!(arena.validate(), Err(ConfigError::NonPositiveArena { width: 0.0, height: 10.0 }));
        let arena = Arena { width: Fp::INFINITY, height: 10.0 };
        assert_eq!(arena.validate(), Err(ConfigError::NonFinite("arena width")));

        let physics = Physics { elasticity: 1.5, ..Physics::default() };
        assert_eq!(physics.validate(), Err(ConfigError::InvalidElasticity(1.5)));
        let physics = Physics { gravity: Fp::NAN, ..Physics::default() };
        assert_eq!(physics.validate(), Err(ConfigError::NonFinite("gravity")));

        let pop = Population { count: 0, ..Population::default() };
        assert_eq!(pop.validate(), Err(ConfigError::ZeroCount));
        let pop = Population { min_size: -1.0, ..Population::default() };
        assert_eq!(pop.validate(), Err(ConfigError::InvalidSize { min: -1.0, max: 14.0 }));
        let pop = Population { min_size: 20.0, ..Population::default() };
        assert_eq!(pop.validate(), Err(ConfigError::InvalidSize { min: 20.0, max: 14.0 }));
    }

    #[test]
    fn parse_yaml() {
        let cfg: SimConfig = serde_yaml::from_str(
            "arena: { width: 320.0, height: 240.0 }\n\
             physics: { elasticity: 1.0, grid_pairing: directional }\n\
             population: { count: 12, seed: 9 }\n\
             broad_phase: sap\n",
        )
        .unwrap();
        assert_eq!(cfg.arena, Arena { width: 320.0, height: 240.0 });
        assert_eq!(cfg.physics.elasticity, 1.0);
        assert_eq!(cfg.physics.gravity, Physics::default().gravity);
        assert_eq!(cfg.physics.grid_pairing, GridPairing::Directional);
        assert_eq!(cfg.population.count, 12);
        assert_eq!(cfg.population.max_size, 14.0);
        assert_eq!(cfg.broad_phase, BroadPhaseKind::Sap);
        assert_eq!(cfg.validate(), Ok(()));
    }
}
