//! Scenario manifests and loaders for the n-body simulator.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One simulation run described in a manifest.
#[derive(Debug, Deserialize, Clone)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(default)]
    pub constants: ConstantsConfig,
    #[serde(default)]
    pub method: MethodConfig,
    pub step: f64,
    #[serde(default)]
    pub start: f64,
    /// Defaults to `start` plus the preset's maximum simulation time.
    #[serde(default)]
    pub end: Option<f64>,
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// Spatial dimension implied by the first body, if any.
    pub fn dimensions(&self) -> Option<usize> {
        self.bodies.first().map(|b| b.position.len())
    }
}

/// Unit system and optional overrides for the physical constants.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConstantsConfig {
    #[serde(default)]
    pub preset: ConstantsPreset,
    #[serde(default)]
    pub gravitational_constant: Option<f64>,
    #[serde(default)]
    pub reference_density: Option<f64>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConstantsPreset {
    /// Solar masses, astronomical units, Julian years.
    #[serde(rename = "astronomical")]
    #[default]
    Astronomical,
    /// SI units with solar reference scales.
    #[serde(rename = "solar_si")]
    SolarSi,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
pub enum MethodConfig {
    #[serde(rename = "euler")]
    Euler,
    #[serde(rename = "rk4")]
    #[default]
    Rk4,
    /// Run Euler and RK4 on the same initial state for comparison.
    #[serde(rename = "both")]
    Both,
}

/// Initial state of a single body.
#[derive(Debug, Deserialize, Clone)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub mass: f64,
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Load scenarios from a YAML list, a single TOML file, or a directory of TOML/YAML files.
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<ScenarioConfig>, ConfigError> {
    load_records(path)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if has_extension(path, "toml") {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            has_extension(path, "toml") || has_extension(path, "yaml") || has_extension(path, "yml")
        })
        .collect();
    entries.sort();
    for path in entries {
        records.extend(load_records::<T, _>(&path)?);
    }
    Ok(records)
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension().map(|e| e == ext).unwrap_or(false)
}
