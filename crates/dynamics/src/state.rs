//! Masses, instantaneous states, and the recorded trajectory.

use std::ops::{Add, Index, Mul};

use crate::error::SimulationError;
use crate::field::{Acceleration, Position, Velocity};

/// Validated per-body masses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Masses<const N: usize>([f64; N]);

impl<const N: usize> Masses<N> {
    /// Accept the masses only if every entry is strictly positive and finite.
    pub fn new(values: [f64; N]) -> Result<Self, SimulationError> {
        if let Some((index, &value)) = values
            .iter()
            .enumerate()
            .find(|(_, m)| !(m.is_finite() && **m > 0.0))
        {
            return Err(SimulationError::NonPositiveMass { index, value });
        }
        Ok(Self(values))
    }

    pub fn as_array(&self) -> &[f64; N] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }
}

impl<const N: usize> Index<usize> for Masses<N> {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

/// Complete instantaneous configuration of all bodies.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct State<const D: usize, const N: usize> {
    pub position: Position<D, N>,
    pub velocity: Velocity<D, N>,
}

impl<const D: usize, const N: usize> State<D, N> {
    pub fn new(position: Position<D, N>, velocity: Velocity<D, N>) -> Self {
        Self { position, velocity }
    }

    /// `y + h · dy`, applied to position (from the velocity slot) and velocity
    /// (from the acceleration slot).
    pub fn advanced(&self, h: f64, rate: &Derivative<D, N>) -> Self {
        Self {
            position: self.position.advanced_by(h, &rate.velocity),
            velocity: self.velocity.advanced_by(h, &rate.acceleration),
        }
    }
}

/// Time derivative of a [`State`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Derivative<const D: usize, const N: usize> {
    pub velocity: Velocity<D, N>,
    pub acceleration: Acceleration<D, N>,
}

impl<const D: usize, const N: usize> Add for Derivative<D, N> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            velocity: self.velocity + rhs.velocity,
            acceleration: self.acceleration + rhs.acceleration,
        }
    }
}

impl<const D: usize, const N: usize> Mul<f64> for Derivative<D, N> {
    type Output = Self;

    fn mul(self, s: f64) -> Self {
        Self {
            velocity: self.velocity * s,
            acceleration: self.acceleration * s,
        }
    }
}

/// Closed integration interval `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSpan {
    start: f64,
    end: f64,
}

impl TimeSpan {
    pub fn new(start: f64, end: f64) -> Result<Self, SimulationError> {
        if !(start.is_finite() && end.is_finite()) || start > end {
            return Err(SimulationError::InvalidTimeSpan { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

/// Timestamped state, with the acceleration evaluated there when it is known.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point<const D: usize, const N: usize> {
    pub time: f64,
    pub state: State<D, N>,
    /// Filled once the integrator's first-stage evaluation at this point succeeds.
    pub acceleration: Option<Acceleration<D, N>>,
}

impl<const D: usize, const N: usize> Point<D, N> {
    pub fn new(time: f64, state: State<D, N>) -> Self {
        Self {
            time,
            state,
            acceleration: None,
        }
    }
}

/// Chronologically ordered points produced by one run.
///
/// Only the driver appends; outside the crate the trajectory is read-only apart from
/// [`Trajectory::clear`].
#[derive(Debug, Clone, Default)]
pub struct Trajectory<const D: usize, const N: usize> {
    points: Vec<Point<D, N>>,
}

impl<const D: usize, const N: usize> Trajectory<D, N> {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn points(&self) -> &[Point<D, N>] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point<D, N>> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point<D, N>> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point<D, N>> {
        self.points.iter()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub(crate) fn push(&mut self, point: Point<D, N>) {
        debug_assert!(
            self.points.last().is_none_or(|last| last.time < point.time),
            "trajectory times must increase"
        );
        self.points.push(point);
    }

    pub(crate) fn record_acceleration(&mut self, acceleration: Acceleration<D, N>) {
        if let Some(last) = self.points.last_mut() {
            last.acceleration = Some(acceleration);
        }
    }
}

impl<'a, const D: usize, const N: usize> IntoIterator for &'a Trajectory<D, N> {
    type Item = &'a Point<D, N>;
    type IntoIter = std::slice::Iter<'a, Point<D, N>>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
