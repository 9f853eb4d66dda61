//! Stateful simulator owning the mass configuration and the latest trajectory.

use nbody_core::PhysicalConstants;
use nbody_dynamics::diagnostics::{self, EnergyReport};
use nbody_dynamics::{
    GravitationalParameters, Masses, Method, Point, RunOutcome, SafeDistances, SimulationError,
    State, TimeSpan, Trajectory, driver, gravitational_parameters, safe_distances,
};
use tracing::debug;

/// One simulation configuration: constants, masses, and the trajectory of its last run.
///
/// Runs take `&mut self`, so a simulator cannot be driven re-entrantly; independent
/// simulators share nothing and can run on separate threads.
#[derive(Debug, Clone)]
pub struct Simulator<const D: usize, const N: usize> {
    constants: PhysicalConstants,
    mass: Masses<N>,
    matrices: Option<(GravitationalParameters<N>, SafeDistances<N>)>,
    trajectory: Trajectory<D, N>,
}

impl<const D: usize, const N: usize> Simulator<D, N> {
    pub fn new(constants: PhysicalConstants, mass: Masses<N>) -> Self {
        Self {
            constants,
            mass,
            matrices: None,
            trajectory: Trajectory::new(),
        }
    }

    /// Replace the masses; the coupling tables are rebuilt on the next run.
    pub fn set_mass(&mut self, mass: Masses<N>) {
        debug!(masses = ?mass.as_array(), "masses updated, dropping cached matrices");
        self.mass = mass;
        self.matrices = None;
    }

    pub fn mass(&self) -> &Masses<N> {
        &self.mass
    }

    pub fn constants(&self) -> &PhysicalConstants {
        &self.constants
    }

    /// Gravitational-parameter and safe-distance tables for the current masses.
    pub fn matrices(&mut self) -> &(GravitationalParameters<N>, SafeDistances<N>) {
        let (mass, constants) = (&self.mass, &self.constants);
        self.matrices.get_or_insert_with(|| {
            (
                gravitational_parameters(mass, constants),
                safe_distances(mass, constants.reference_density),
            )
        })
    }

    /// Run `method` from `initial` over `span`, replacing any previous trajectory.
    pub fn simulate(
        &mut self,
        method: Method,
        step: f64,
        span: TimeSpan,
        initial: State<D, N>,
    ) -> Result<RunOutcome, SimulationError> {
        let (gm, safe) = *self.matrices();
        driver::simulate(method, step, span, initial, &gm, &safe, &mut self.trajectory)
    }

    pub fn simulate_euler(
        &mut self,
        step: f64,
        span: TimeSpan,
        initial: State<D, N>,
    ) -> Result<RunOutcome, SimulationError> {
        self.simulate(Method::Euler, step, span, initial)
    }

    pub fn simulate_rk4_fixed(
        &mut self,
        step: f64,
        span: TimeSpan,
        initial: State<D, N>,
    ) -> Result<RunOutcome, SimulationError> {
        self.simulate(Method::Rk4Fixed, step, span, initial)
    }

    pub fn clear(&mut self) {
        self.trajectory.clear();
    }

    /// Points of the last run in chronological order.
    pub fn result(&self) -> &[Point<D, N>] {
        self.trajectory.points()
    }

    pub fn trajectory(&self) -> &Trajectory<D, N> {
        &self.trajectory
    }

    pub fn calculate_kinetic(&self, point: &Point<D, N>) -> f64 {
        diagnostics::kinetic_energy(&point.state, &self.mass)
    }

    pub fn calculate_potential(&self, point: &Point<D, N>) -> f64 {
        diagnostics::potential_energy(
            &point.state,
            &self.mass,
            self.constants.gravitational_constant,
        )
    }

    pub fn calculate_energy(&self, point: &Point<D, N>) -> f64 {
        diagnostics::total_energy(
            &point.state,
            &self.mass,
            self.constants.gravitational_constant,
        )
    }

    pub fn calculate_total_motion(&self, point: &Point<D, N>) -> [f64; D] {
        diagnostics::total_momentum(&point.state, &self.mass)
    }

    pub fn calculate_center_of_mass(&self, point: &Point<D, N>) -> [f64; D] {
        diagnostics::center_of_mass(&point.state, &self.mass)
    }

    /// Energy conservation over the last run; `None` before any run.
    pub fn energy_report(&self) -> Option<EnergyReport> {
        diagnostics::energy_report(
            self.trajectory.points(),
            &self.mass,
            self.constants.gravitational_constant,
        )
    }
}
