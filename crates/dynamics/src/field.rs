//! Fixed-shape `(dimension, body)` arrays used for positions, velocities, and accelerations.

use std::ops::{Add, AddAssign, Index, IndexMut, Mul, Sub};

/// Dense `D × N` array indexed by `(dimension, body)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field<const D: usize, const N: usize> {
    rows: [[f64; N]; D],
}

pub type Position<const D: usize, const N: usize> = Field<D, N>;
pub type Velocity<const D: usize, const N: usize> = Field<D, N>;
pub type Acceleration<const D: usize, const N: usize> = Field<D, N>;

impl<const D: usize, const N: usize> Field<D, N> {
    pub fn zeros() -> Self {
        Self {
            rows: [[0.0; N]; D],
        }
    }

    /// Build from per-body vectors: `bodies[i][d]` is component `d` of body `i`.
    pub fn from_bodies(bodies: [[f64; D]; N]) -> Self {
        Self {
            rows: std::array::from_fn(|d| std::array::from_fn(|i| bodies[i][d])),
        }
    }

    /// Vector of body `i` across all dimensions.
    #[inline]
    pub fn body(&self, i: usize) -> [f64; D] {
        std::array::from_fn(|d| self.rows[d][i])
    }

    #[inline]
    pub fn set_body(&mut self, i: usize, value: [f64; D]) {
        for (d, component) in value.into_iter().enumerate() {
            self.rows[d][i] = component;
        }
    }

    /// Iterate over the per-body vectors in body order.
    pub fn bodies(&self) -> impl Iterator<Item = [f64; D]> + '_ {
        (0..N).map(|i| self.body(i))
    }

    /// `self + h · rate`, computed into a fresh array.
    #[inline]
    pub fn advanced_by(&self, h: f64, rate: &Self) -> Self {
        let mut out = *self;
        for (row, rate_row) in out.rows.iter_mut().zip(rate.rows.iter()) {
            for (value, r) in row.iter_mut().zip(rate_row.iter()) {
                *value += h * r;
            }
        }
        out
    }

    pub fn is_finite(&self) -> bool {
        self.rows.iter().flatten().all(|v| v.is_finite())
    }
}

impl<const D: usize, const N: usize> Default for Field<D, N> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<const D: usize, const N: usize> Index<(usize, usize)> for Field<D, N> {
    type Output = f64;

    fn index(&self, (dim, body): (usize, usize)) -> &f64 {
        &self.rows[dim][body]
    }
}

impl<const D: usize, const N: usize> IndexMut<(usize, usize)> for Field<D, N> {
    fn index_mut(&mut self, (dim, body): (usize, usize)) -> &mut f64 {
        &mut self.rows[dim][body]
    }
}

impl<const D: usize, const N: usize> Add for Field<D, N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const D: usize, const N: usize> AddAssign for Field<D, N> {
    fn add_assign(&mut self, rhs: Self) {
        for (row, rhs_row) in self.rows.iter_mut().zip(rhs.rows.iter()) {
            for (value, r) in row.iter_mut().zip(rhs_row.iter()) {
                *value += r;
            }
        }
    }
}

impl<const D: usize, const N: usize> Sub for Field<D, N> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        for (row, rhs_row) in self.rows.iter_mut().zip(rhs.rows.iter()) {
            for (value, r) in row.iter_mut().zip(rhs_row.iter()) {
                *value -= r;
            }
        }
        self
    }
}

impl<const D: usize, const N: usize> Mul<f64> for Field<D, N> {
    type Output = Self;

    fn mul(mut self, s: f64) -> Self {
        for value in self.rows.iter_mut().flatten() {
            *value *= s;
        }
        self
    }
}
