//! Broadphase strategies: cheap candidate pair generation ahead of the exact circle test.

pub mod grid;
pub mod naive;
pub mod sap;

pub use grid::UniformGrid;
pub use naive::Naive;
pub use sap::SweepAndPrune;

use crate::{Body, error::ConfigError, narrow};
use serde::Deserialize;
use std::{fmt, str::FromStr};

/// Indices of two bodies in the scene's body list.
pub type BodyPair = (usize, usize);

pub trait BroadPhase {
    /// Appends candidate pairs for `bodies` to `out`. Candidates may not collide.
    fn candidates(&mut self, bodies: &[Body], out: &mut Vec<BodyPair>);

    /// Appends confirmed colliding pairs for `bodies` to `out`.
    fn collisions(&mut self, bodies: &[Body], out: &mut Vec<BodyPair>) {
        let start = out.len();
        self.candidates(bodies, out);
        let mut found = out.split_off(start);
        narrow::retain_colliding(bodies, &mut found);
        out.append(&mut found);
    }
}

/// Runtime broadphase selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BroadPhaseKind {
    Naive,
    Grid,
    Sap,
}
impl Default for BroadPhaseKind {
    fn default() -> Self {
        BroadPhaseKind::Grid
    }
}
impl FromStr for BroadPhaseKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "naive" => Ok(BroadPhaseKind::Naive),
            "grid" => Ok(BroadPhaseKind::Grid),
            "sap" => Ok(BroadPhaseKind::Sap),
            _ => Err(ConfigError::UnknownBroadPhase(s.to_owned())),
        }
    }
}
impl fmt::Display for BroadPhaseKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            BroadPhaseKind::Naive => "naive",
            BroadPhaseKind::Grid => "grid",
            BroadPhaseKind::Sap => "sap",
        })
    }
}

/// How the uniform grid reports a pair of bodies that see each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridPairing {
    /// Once per pair; matches the naive and sweep and prune phases.
    Unique,
    /// Once from each body's neighbourhood scan, so the pair is resolved twice per step.
    Directional,
}
impl Default for GridPairing {
    fn default() -> Self {
        GridPairing::Unique
    }
}
