use crate::Fp;
use thiserror::Error;

/// Rejected simulation configuration. Raised before any `Body` is created or mutated.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("arena must have positive dimensions, got {width}x{height}")]
    NonPositiveArena { width: Fp, height: Fp },
    #[error("body count must be at least 1")]
    ZeroCount,
    #[error("body size range must satisfy 0 < min <= max, got [{min}, {max}]")]
    InvalidSize { min: Fp, max: Fp },
    #[error("elasticity must lie within [0, 1], got {0}")]
    InvalidElasticity(Fp),
    #[error("{0} must be finite")]
    NonFinite(&'static str),
    #[error("unknown broad phase `{0}`, expected one of naive, grid, sap")]
    UnknownBroadPhase(String),
}
