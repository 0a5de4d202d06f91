//! Colliding circles under gravity in a bounded 2D arena.
//!
//! A [`Scene`] owns a set of [`Body`]s and advances them with [`Scene::step`]:
//! every body is integrated and reflected off the arena walls, a selectable
//! broad phase proposes candidate pairs, the narrow phase confirms overlaps and
//! the resolver separates each colliding pair and exchanges velocities.

pub mod body;
pub mod broad;
pub mod config;
pub mod error;
pub mod integrate;
pub mod narrow;
pub mod response;
pub mod scene;

pub use body::Body;
pub use broad::{BodyPair, BroadPhase, BroadPhaseKind, GridPairing, Naive, SweepAndPrune, UniformGrid};
pub use config::{Arena, Physics, Population, SimConfig};
pub use error::ConfigError;
pub use scene::{Scene, StepStats};

#[cfg(not(feature = "f64"))]
pub type Fp = f32;
#[cfg(not(feature = "f64"))]
pub type Vec2 = glam::Vec2;

#[cfg(feature = "f64")]
pub type Fp = f64;
#[cfg(feature = "f64")]
pub type Vec2 = glam::DVec2;
