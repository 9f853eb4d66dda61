use std::path::Path;

use nbody_config::{ConstantsPreset, MethodConfig, ScenarioConfig};
use nbody_core::{ConstantsError, PhysicalConstants};
use nbody_dynamics::{Field, Masses, Method, SimulationError, State, TimeSpan};
use thiserror::Error;

use crate::simulator::Simulator;

pub use nbody_config::{ConfigError, load_scenarios};

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("no scenarios defined")]
    Empty,
    #[error("scenario '{0}' not found")]
    NotFound(String),
    #[error("scenario '{scenario}' has {found} bodies, expected {expected}")]
    BodyCount {
        scenario: String,
        found: usize,
        expected: usize,
    },
    #[error("body {index} of scenario '{scenario}' has a {field} with {found} components, expected {expected}")]
    Dimension {
        scenario: String,
        index: usize,
        field: &'static str,
        found: usize,
        expected: usize,
    },
    #[error(transparent)]
    Constants(#[from] ConstantsError),
    #[error(transparent)]
    Simulation(#[from] SimulationError),
}

/// Validated runtime inputs for a `D`-dimensional, `N`-body run.
#[derive(Debug, Clone)]
pub struct Scenario<const D: usize, const N: usize> {
    pub name: String,
    pub body_names: Vec<String>,
    pub constants: PhysicalConstants,
    pub masses: Masses<N>,
    pub initial: State<D, N>,
    pub span: TimeSpan,
    pub step: f64,
    pub methods: Vec<Method>,
}

impl<const D: usize, const N: usize> Scenario<D, N> {
    /// Fresh simulator configured with this scenario's constants and masses.
    pub fn simulator(&self) -> Simulator<D, N> {
        Simulator::new(self.constants, self.masses)
    }
}

impl<const D: usize, const N: usize> TryFrom<&ScenarioConfig> for Scenario<D, N> {
    type Error = ScenarioError;

    fn try_from(value: &ScenarioConfig) -> Result<Self, Self::Error> {
        if value.bodies.len() != N {
            return Err(ScenarioError::BodyCount {
                scenario: value.name.clone(),
                found: value.bodies.len(),
                expected: N,
            });
        }

        let constants = constants_from_config(value)?;

        let mut mass = [0.0; N];
        let mut position = Field::<D, N>::zeros();
        let mut velocity = Field::<D, N>::zeros();
        for (index, body) in value.bodies.iter().enumerate() {
            mass[index] = body.mass;
            position.set_body(index, vector_of(value, index, "position", &body.position)?);
            velocity.set_body(index, vector_of(value, index, "velocity", &body.velocity)?);
        }

        let end = value
            .end
            .unwrap_or(value.start + constants.scales.max_time);
        let span = TimeSpan::new(value.start, end)?;
        nbody_dynamics::driver::validate_step(value.step, &span)?;

        let methods = match value.method {
            MethodConfig::Euler => vec![Method::Euler],
            MethodConfig::Rk4 => vec![Method::Rk4Fixed],
            MethodConfig::Both => vec![Method::Euler, Method::Rk4Fixed],
        };

        let body_names = value
            .bodies
            .iter()
            .enumerate()
            .map(|(i, b)| b.name.clone().unwrap_or_else(|| format!("body{i}")))
            .collect();

        Ok(Scenario {
            name: value.name.clone(),
            body_names,
            constants,
            masses: Masses::new(mass)?,
            initial: State::new(position, velocity),
            span,
            step: value.step,
            methods,
        })
    }
}

fn constants_from_config(value: &ScenarioConfig) -> Result<PhysicalConstants, ConstantsError> {
    let mut constants = match value.constants.preset {
        ConstantsPreset::Astronomical => PhysicalConstants::astronomical(),
        ConstantsPreset::SolarSi => PhysicalConstants::solar_si(),
    };
    if let Some(g) = value.constants.gravitational_constant {
        constants = constants.with_gravitational_constant(g)?;
    }
    if let Some(density) = value.constants.reference_density {
        constants = constants.with_reference_density(density)?;
    }
    Ok(constants)
}

fn vector_of<const D: usize>(
    scenario: &ScenarioConfig,
    index: usize,
    field: &'static str,
    values: &[f64],
) -> Result<[f64; D], ScenarioError> {
    <[f64; D]>::try_from(values).map_err(|_| ScenarioError::Dimension {
        scenario: scenario.name.clone(),
        index,
        field,
        found: values.len(),
        expected: D,
    })
}

/// Pick a scenario by case-insensitive name, defaulting to the first one.
pub fn select<'a>(
    configs: &'a [ScenarioConfig],
    requested: Option<&str>,
) -> Result<&'a ScenarioConfig, ScenarioError> {
    if configs.is_empty() {
        return Err(ScenarioError::Empty);
    }
    match requested {
        Some(name) => {
            let upper = name.to_uppercase();
            configs
                .iter()
                .find(|cfg| cfg.name.to_uppercase() == upper)
                .ok_or_else(|| ScenarioError::NotFound(name.to_string()))
        }
        None => Ok(&configs[0]),
    }
}

/// Load a manifest and convert the requested scenario.
pub fn load_scenario<const D: usize, const N: usize, P: AsRef<Path>>(
    path: P,
    requested: Option<&str>,
) -> Result<Scenario<D, N>, ScenarioError> {
    let configs = load_scenarios(path)?;
    Scenario::try_from(select(&configs, requested)?)
}
