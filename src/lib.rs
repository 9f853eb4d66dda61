//! N-body simulator facade.
//!
//! The integration engine lives in `nbody_dynamics`; this crate owns the stateful
//! [`Simulator`] (masses plus the accumulated trajectory), turns scenario manifests
//! into runtime inputs, and bridges runs to the export formats. Keeping the engine
//! in its own crate lets the CLI and any other front-end share it.

pub mod report;
pub mod scenario;
pub mod simulator;

pub use nbody_config as config;
pub use nbody_core::{ConstantsError, PhysicalConstants, ReferenceScales, si, units};
pub use nbody_dynamics as dynamics;
pub use nbody_dynamics::{
    Collision, Field, Masses, Method, Point, RunOutcome, SimulationError, State, TimeSpan,
};
pub use nbody_export as export;
pub use simulator::Simulator;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
