//! Energy and momentum read from recorded states.
//!
//! Nothing here re-checks collisions: the driver only records states it reached
//! without one.

use nbody_core::vector;

use crate::state::{Masses, Point, State};

/// `Σ ½ mᵢ ‖vᵢ‖²`.
pub fn kinetic_energy<const D: usize, const N: usize>(
    state: &State<D, N>,
    masses: &Masses<N>,
) -> f64 {
    state
        .velocity
        .bodies()
        .zip(masses.iter())
        .map(|(v, m)| 0.5 * m * vector::dot(&v, &v))
        .sum()
}

/// `Σ_{i<j} −G mᵢ mⱼ / ‖xᵢ − xⱼ‖`.
pub fn potential_energy<const D: usize, const N: usize>(
    state: &State<D, N>,
    masses: &Masses<N>,
    g: f64,
) -> f64 {
    let mut total = 0.0;
    for i in 0..N {
        let xi = state.position.body(i);
        for j in (i + 1)..N {
            let distance = vector::norm(&vector::sub(&xi, &state.position.body(j)));
            total -= g * masses[i] * masses[j] / distance;
        }
    }
    total
}

pub fn total_energy<const D: usize, const N: usize>(
    state: &State<D, N>,
    masses: &Masses<N>,
    g: f64,
) -> f64 {
    kinetic_energy(state, masses) + potential_energy(state, masses, g)
}

/// `Σ mᵢ vᵢ`.
pub fn total_momentum<const D: usize, const N: usize>(
    state: &State<D, N>,
    masses: &Masses<N>,
) -> [f64; D] {
    let mut p = [0.0; D];
    for (v, m) in state.velocity.bodies().zip(masses.iter()) {
        for (component, vd) in p.iter_mut().zip(v) {
            *component += m * vd;
        }
    }
    p
}

/// Mass-weighted mean position.
pub fn center_of_mass<const D: usize, const N: usize>(
    state: &State<D, N>,
    masses: &Masses<N>,
) -> [f64; D] {
    let mut weighted = [0.0; D];
    for (x, m) in state.position.bodies().zip(masses.iter()) {
        for (component, xd) in weighted.iter_mut().zip(x) {
            *component += m * xd;
        }
    }
    vector::scale(&weighted, masses.total().recip())
}

/// Total-energy behaviour over a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyReport {
    pub initial: f64,
    pub final_energy: f64,
    /// `(final − initial) / |initial|`, or the absolute change when `initial` is zero.
    pub relative_drift: f64,
    /// Largest `|E(t) − initial|` seen at any point, on the same scale as `relative_drift`.
    pub max_relative_deviation: f64,
}

/// Summarise energy conservation over `points`; `None` for an empty trajectory.
pub fn energy_report<const D: usize, const N: usize>(
    points: &[Point<D, N>],
    masses: &Masses<N>,
    g: f64,
) -> Option<EnergyReport> {
    let first = points.first()?;
    let last = points.last()?;
    let initial = total_energy(&first.state, masses, g);
    let final_energy = total_energy(&last.state, masses, g);
    let scale = if initial == 0.0 { 1.0 } else { initial.abs() };

    let max_relative_deviation = points
        .iter()
        .map(|p| (total_energy(&p.state, masses, g) - initial).abs() / scale)
        .fold(0.0, f64::max);

    Some(EnergyReport {
        initial,
        final_energy,
        relative_drift: (final_energy - initial) / scale,
        max_relative_deviation,
    })
}
