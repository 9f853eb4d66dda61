//! Physical constants, reference scales, and shared primitives for the n-body simulator workspace.

use thiserror::Error;

/// Raw constants expressed in SI units (unless stated otherwise).
pub mod si {
    /// Newtonian gravitational constant (m³ kg⁻¹ s⁻²).
    pub const G: f64 = 6.674_30e-11;
    /// Nominal solar mass (kg).
    pub const SOLAR_MASS_KG: f64 = 1.988_47e30;
    /// Metres per astronomical unit.
    pub const AU_M: f64 = 1.495_978_707e11;
    /// Seconds per Julian day.
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
    /// Seconds per Julian year.
    pub const SECONDS_PER_YEAR: f64 = 365.25 * SECONDS_PER_DAY;
    /// Mean solar density (kg/m³).
    pub const SOLAR_MEAN_DENSITY_KG_M3: f64 = 1_408.0;
}

/// Errors raised when a constants set is not physically usable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConstantsError {
    #[error("{name} must be positive and finite, got {value}")]
    NotPositive { name: &'static str, value: f64 },
}

/// Reference scales a constants set is expressed against.
///
/// `speed` is the circular speed of a test particle around one reference mass at one
/// reference length, `acceleration` the matching centripetal acceleration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceScales {
    pub mass: f64,
    pub length: f64,
    pub time: f64,
    pub speed: f64,
    pub angular_speed: f64,
    pub acceleration: f64,
    /// Default integration horizon when a scenario does not name an end time.
    pub max_time: f64,
}

impl ReferenceScales {
    fn derive(g: f64, mass: f64, length: f64, time: f64, horizon_in_times: f64) -> Self {
        let speed = (g * mass / length).sqrt();
        Self {
            mass,
            length,
            time,
            speed,
            angular_speed: std::f64::consts::TAU / time,
            acceleration: speed * speed / length,
            max_time: horizon_in_times * time,
        }
    }
}

/// Immutable constant set handed to the matrix builders, driver, and diagnostics.
///
/// Units are whatever the caller picks; they only need to agree with the masses,
/// positions, velocities, and times fed to the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    pub gravitational_constant: f64,
    /// Density assumed for every body when deriving its radius.
    pub reference_density: f64,
    pub scales: ReferenceScales,
}

impl PhysicalConstants {
    /// Validate and assemble a constant set.
    pub fn new(
        gravitational_constant: f64,
        reference_density: f64,
        scales: ReferenceScales,
    ) -> Result<Self, ConstantsError> {
        ensure_positive("gravitational_constant", gravitational_constant)?;
        ensure_positive("reference_density", reference_density)?;
        ensure_positive("scales.length", scales.length)?;
        ensure_positive("scales.mass", scales.mass)?;
        ensure_positive("scales.time", scales.time)?;
        Ok(Self {
            gravitational_constant,
            reference_density,
            scales,
        })
    }

    /// SI units with solar mass, 1 AU, and one Julian year as reference scales.
    pub fn solar_si() -> Self {
        Self {
            gravitational_constant: si::G,
            reference_density: si::SOLAR_MEAN_DENSITY_KG_M3,
            scales: ReferenceScales::derive(
                si::G,
                si::SOLAR_MASS_KG,
                si::AU_M,
                si::SECONDS_PER_YEAR,
                100.0,
            ),
        }
    }

    /// Solar masses, astronomical units, and Julian years (G = 4π²).
    pub fn astronomical() -> Self {
        let g = 4.0 * std::f64::consts::PI * std::f64::consts::PI;
        Self {
            gravitational_constant: g,
            reference_density: units::density_si_to_astronomical(si::SOLAR_MEAN_DENSITY_KG_M3),
            scales: ReferenceScales::derive(g, 1.0, 1.0, 1.0, 100.0),
        }
    }

    /// Replace the gravitational constant, keeping the other fields.
    pub fn with_gravitational_constant(self, value: f64) -> Result<Self, ConstantsError> {
        Self::new(value, self.reference_density, self.scales)
    }

    /// Replace the reference density, keeping the other fields.
    pub fn with_reference_density(self, value: f64) -> Result<Self, ConstantsError> {
        Self::new(self.gravitational_constant, value, self.scales)
    }
}

fn ensure_positive(name: &'static str, value: f64) -> Result<(), ConstantsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConstantsError::NotPositive { name, value })
    }
}

/// Unit conversion helpers between SI and the astronomical system.
pub mod units {
    use super::si::{AU_M, SECONDS_PER_YEAR, SOLAR_MASS_KG};

    /// Convert metres to astronomical units.
    #[inline]
    pub fn m_to_au(v: f64) -> f64 {
        v / AU_M
    }

    /// Convert astronomical units to metres.
    #[inline]
    pub fn au_to_m(v: f64) -> f64 {
        v * AU_M
    }

    /// Convert kilograms to solar masses.
    #[inline]
    pub fn kg_to_solar(v: f64) -> f64 {
        v / SOLAR_MASS_KG
    }

    /// Convert seconds to Julian years.
    #[inline]
    pub fn seconds_to_years(v: f64) -> f64 {
        v / SECONDS_PER_YEAR
    }

    /// Convert metres per second to AU per year.
    #[inline]
    pub fn ms_to_au_per_year(v: f64) -> f64 {
        v * SECONDS_PER_YEAR / AU_M
    }

    /// Convert kg/m³ to solar masses per cubic AU.
    #[inline]
    pub fn density_si_to_astronomical(v: f64) -> f64 {
        v * AU_M * AU_M * AU_M / SOLAR_MASS_KG
    }
}

/// Minimal `[f64; D]` helpers used by diagnostics and export.
pub mod vector {
    /// Dot product of two vectors.
    #[inline]
    pub fn dot<const D: usize>(a: &[f64; D], b: &[f64; D]) -> f64 {
        a.iter().zip(b).map(|(x, y)| x * y).sum()
    }

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm<const D: usize>(v: &[f64; D]) -> f64 {
        dot(v, v).sqrt()
    }

    /// Vector subtraction.
    #[inline]
    pub fn sub<const D: usize>(a: &[f64; D], b: &[f64; D]) -> [f64; D] {
        std::array::from_fn(|d| a[d] - b[d])
    }

    /// Scale a vector by a scalar.
    #[inline]
    pub fn scale<const D: usize>(v: &[f64; D], s: f64) -> [f64; D] {
        std::array::from_fn(|d| v[d] * s)
    }
}
