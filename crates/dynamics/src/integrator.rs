//! Fixed-step single-step integrators.
//!
//! Both steps are pure: they read the current state and return the next one by value.
//! Callers advance in place with `state = step.state`, so a failed step leaves the
//! caller's state untouched.

use std::fmt;

use crate::derivative::derivative;
use crate::error::Collision;
use crate::field::Acceleration;
use crate::matrices::{GravitationalParameters, SafeDistances};
use crate::state::State;

/// Integration scheme selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Forward Euler, first order, one evaluation per step.
    Euler,
    /// Classical fourth-order Runge–Kutta with a fixed step, four evaluations per step.
    Rk4Fixed,
}

impl Method {
    pub fn label(self) -> &'static str {
        match self {
            Method::Euler => "euler",
            Method::Rk4Fixed => "rk4",
        }
    }

    /// Advance `state` by `h` with this scheme.
    pub fn step<const D: usize, const N: usize>(
        self,
        h: f64,
        state: &State<D, N>,
        gm: &GravitationalParameters<N>,
        safe: &SafeDistances<N>,
    ) -> Result<Step<D, N>, Collision> {
        match self {
            Method::Euler => euler_step(h, state, gm, safe),
            Method::Rk4Fixed => rk4_step(h, state, gm, safe),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one successful step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step<const D: usize, const N: usize> {
    pub state: State<D, N>,
    /// Acceleration evaluated at the state the step started from.
    pub acceleration: Acceleration<D, N>,
}

/// Forward Euler: `x' = x + h·v`, `v' = v + h·a`.
pub fn euler_step<const D: usize, const N: usize>(
    h: f64,
    y: &State<D, N>,
    gm: &GravitationalParameters<N>,
    safe: &SafeDistances<N>,
) -> Result<Step<D, N>, Collision> {
    let k1 = derivative(y, gm, safe)?;
    Ok(Step {
        state: y.advanced(h, &k1),
        acceleration: k1.acceleration,
    })
}

/// Classical RK4 on the first-order system `(x, v)' = (v, a(x))`.
///
/// A collision at any of the four stages fails the whole step.
pub fn rk4_step<const D: usize, const N: usize>(
    h: f64,
    y: &State<D, N>,
    gm: &GravitationalParameters<N>,
    safe: &SafeDistances<N>,
) -> Result<Step<D, N>, Collision> {
    let half = 0.5 * h;

    let k1 = derivative(y, gm, safe)?;
    let k2 = derivative(&y.advanced(half, &k1), gm, safe)?;
    let k3 = derivative(&y.advanced(half, &k2), gm, safe)?;
    let k4 = derivative(&y.advanced(h, &k3), gm, safe)?;

    let slope = (k1 + (k2 + k3) * 2.0 + k4) * (1.0 / 6.0);
    Ok(Step {
        state: y.advanced(h, &slope),
        acceleration: k1.acceleration,
    })
}
