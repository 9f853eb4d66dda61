//! Fixed-step n-body integration engine.
//!
//! Builds the pairwise gravitational-parameter and safe-distance tables from the masses,
//! evaluates Newtonian accelerations with collision detection, advances states with
//! Euler or RK4, drives a run over a time span, and reads energy/momentum diagnostics
//! off the recorded trajectory. Everything except the driver's logging is pure.

pub mod derivative;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod field;
pub mod integrator;
pub mod matrices;
pub mod state;

pub use derivative::{acceleration, derivative};
pub use driver::{RunOutcome, simulate};
pub use error::{Collision, SimulationError};
pub use field::{Acceleration, Field, Position, Velocity};
pub use integrator::{Method, Step, euler_step, rk4_step};
pub use matrices::{
    GravitationalParameters, SafeDistances, body_radius, gravitational_parameters,
    safe_distances,
};
pub use state::{Derivative, Masses, Point, State, TimeSpan, Trajectory};
