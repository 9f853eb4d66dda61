//! Error and signal types surfaced by the engine.

use nbody_core::ConstantsError;
use thiserror::Error;

/// Two bodies came closer than the sum of their radii.
///
/// This is the only recoverable condition raised while integrating. `first < second`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error(
    "bodies {first} and {second} are {separation:e} apart, inside their safe distance {safe_distance:e}"
)]
pub struct Collision {
    pub first: usize,
    pub second: usize,
    pub separation: f64,
    pub safe_distance: f64,
}

impl Collision {
    pub(crate) fn between(a: usize, b: usize, separation: f64, safe_distance: f64) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
            separation,
            safe_distance,
        }
    }
}

/// Rejected preconditions for building or running a simulation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimulationError {
    #[error("mass of body {index} must be positive and finite, got {value}")]
    NonPositiveMass { index: usize, value: f64 },
    #[error("step size must be positive, finite, and advance time, got {0}")]
    InvalidStep(f64),
    #[error("time span must be finite with start <= end, got [{start}, {end}]")]
    InvalidTimeSpan { start: f64, end: f64 },
    #[error(transparent)]
    InvalidConstant(#[from] ConstantsError),
}
