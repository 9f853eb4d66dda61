//! Pairwise coupling tables derived once from the mass vector.

use std::f64::consts::PI;

use nbody_core::PhysicalConstants;

use crate::state::Masses;

/// `G · m_j` for the ordered pair `(i, j)`; the diagonal is zero and never read.
///
/// Row `i` holds what body `i` feels, so the table is not symmetric unless the masses are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GravitationalParameters<const N: usize> {
    entries: [[f64; N]; N],
}

impl<const N: usize> GravitationalParameters<N> {
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.entries[i][j]
    }
}

/// Build the gravitational-parameter table for `masses`.
pub fn gravitational_parameters<const N: usize>(
    masses: &Masses<N>,
    constants: &PhysicalConstants,
) -> GravitationalParameters<N> {
    let g = constants.gravitational_constant;
    let entries = std::array::from_fn(|i| {
        std::array::from_fn(|j| if i == j { 0.0 } else { g * masses[j] })
    });
    GravitationalParameters { entries }
}

/// Minimum centre-to-centre separation for each pair before their surfaces touch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafeDistances<const N: usize> {
    entries: [[f64; N]; N],
}

impl<const N: usize> SafeDistances<N> {
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.entries[i][j]
    }
}

/// Radius of a homogeneous sphere of `mass` at `density`.
#[inline]
pub fn body_radius(mass: f64, density: f64) -> f64 {
    (3.0 * mass / (4.0 * PI * density)).cbrt()
}

/// Build the symmetric safe-distance table, assuming every body has `density`.
pub fn safe_distances<const N: usize>(masses: &Masses<N>, density: f64) -> SafeDistances<N> {
    let radii: [f64; N] = std::array::from_fn(|i| body_radius(masses[i], density));
    let entries = std::array::from_fn(|i| {
        std::array::from_fn(|j| if i == j { 0.0 } else { radii[i] + radii[j] })
    });
    SafeDistances { entries }
}
