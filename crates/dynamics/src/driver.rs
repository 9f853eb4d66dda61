//! Time-stepping loop that accumulates a trajectory and stops on the first collision.

use tracing::{debug, warn};

use crate::error::{Collision, SimulationError};
use crate::integrator::Method;
use crate::matrices::{GravitationalParameters, SafeDistances};
use crate::state::{Point, State, TimeSpan, Trajectory};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RunOutcome {
    /// Every time in the span was reached without a collision.
    Completed { points: usize },
    /// The step leaving the point at `time` detected `collision`; nothing was appended for it.
    Collided { time: f64, collision: Collision },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed { .. })
    }

    pub fn collision(&self) -> Option<&Collision> {
        match self {
            RunOutcome::Completed { .. } => None,
            RunOutcome::Collided { collision, .. } => Some(collision),
        }
    }
}

/// Reject step sizes that are not positive and finite, or too small for `t0 + k·h` to
/// stay strictly increasing anywhere in `span`.
pub fn validate_step(h: f64, span: &TimeSpan) -> Result<(), SimulationError> {
    if !(h.is_finite() && h > 0.0) {
        return Err(SimulationError::InvalidStep(h));
    }
    // Each grid time carries at most one spacing of rounding error (product plus sum)
    let magnitude = span.start().abs().max(span.end().abs());
    if h <= 2.0 * spacing_at(2.0 * magnitude) {
        return Err(SimulationError::InvalidStep(h));
    }
    Ok(())
}

/// Gap between `x` and the next larger `f64`, for finite non-negative `x`.
fn spacing_at(x: f64) -> f64 {
    if !x.is_finite() {
        return f64::INFINITY;
    }
    f64::from_bits(x.to_bits() + 1) - x
}

/// Integrate from `initial` over `span` with a fixed step `h`.
///
/// `trajectory` is cleared first, then receives the point at `t0 + k·h` for every
/// `k` with `t0 + k·h <= t1`, each appended before the step that leaves it. A collision
/// ends the run early with the trajectory holding every point reached so far.
#[tracing::instrument(skip_all, fields(method = %method, step = h))]
pub fn simulate<const D: usize, const N: usize>(
    method: Method,
    h: f64,
    span: TimeSpan,
    initial: State<D, N>,
    gm: &GravitationalParameters<N>,
    safe: &SafeDistances<N>,
    trajectory: &mut Trajectory<D, N>,
) -> Result<RunOutcome, SimulationError> {
    validate_step(h, &span)?;
    trajectory.clear();
    debug!(
        start = span.start(),
        end = span.end(),
        bodies = N,
        dimensions = D,
        "starting run"
    );

    let mut state = initial;
    let mut k: usize = 0;
    loop {
        // t0 + k·h rather than repeated addition keeps the grid free of drift
        let time = span.start() + k as f64 * h;
        if time > span.end() {
            break;
        }
        trajectory.push(Point::new(time, state));

        // Always step after appending, even past the last in-span point: a collision
        // there still ends the run as `Collided`
        match method.step(h, &state, gm, safe) {
            Ok(step) => {
                trajectory.record_acceleration(step.acceleration);
                state = step.state;
                k += 1;
            }
            Err(collision) => {
                warn!(
                    time,
                    first = collision.first,
                    second = collision.second,
                    separation = collision.separation,
                    safe_distance = collision.safe_distance,
                    "collision detected, stopping run"
                );
                return Ok(RunOutcome::Collided { time, collision });
            }
        }
    }

    debug!(points = trajectory.len(), "run completed");
    Ok(RunOutcome::Completed {
        points: trajectory.len(),
    })
}
