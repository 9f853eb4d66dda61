//! Bridges finished runs to the CSV/JSON export formats.

use std::io::{self, Write};

use nbody_dynamics::{Method, RunOutcome};
use nbody_export::summary::{CollisionSummary, RunSummary};
use nbody_export::trajectory::{Row, write_header};

use crate::scenario::Scenario;
use crate::simulator::Simulator;

/// Write the header and one row per recorded point of `sim`'s last run.
pub fn write_trajectory_csv<const D: usize, const N: usize>(
    sim: &Simulator<D, N>,
    writer: &mut dyn Write,
) -> io::Result<()> {
    write_header(writer, D, N)?;
    for point in sim.result() {
        let positions: Vec<f64> = point.state.position.bodies().flatten().collect();
        let velocities: Vec<f64> = point.state.velocity.bodies().flatten().collect();
        let kinetic = sim.calculate_kinetic(point);
        let potential = sim.calculate_potential(point);
        let momentum = sim.calculate_total_motion(point);
        Row {
            time: point.time,
            positions: &positions,
            velocities: &velocities,
            kinetic,
            potential,
            energy: kinetic + potential,
            momentum: &momentum,
        }
        .write_to(writer)?;
    }
    writer.flush()
}

/// Summarise the last run of `sim`, which was started from `scenario` with `method`.
pub fn run_summary<const D: usize, const N: usize>(
    scenario: &Scenario<D, N>,
    method: Method,
    outcome: &RunOutcome,
    sim: &Simulator<D, N>,
    generated_at: String,
) -> RunSummary {
    let energy = sim.energy_report();
    let final_momentum = sim
        .result()
        .last()
        .map(|p| sim.calculate_total_motion(p).to_vec())
        .unwrap_or_default();

    let collision = match outcome {
        RunOutcome::Completed { .. } => None,
        RunOutcome::Collided { time, collision } => Some(CollisionSummary {
            time: *time,
            first_body: body_name(scenario, collision.first),
            second_body: body_name(scenario, collision.second),
            separation: collision.separation,
            safe_distance: collision.safe_distance,
        }),
    };

    RunSummary {
        scenario: scenario.name.clone(),
        method: method.label().to_string(),
        step: scenario.step,
        start: scenario.span.start(),
        end: scenario.span.end(),
        completed: outcome.is_completed(),
        collision,
        points: sim.result().len(),
        initial_energy: energy.map(|e| e.initial).unwrap_or_default(),
        final_energy: energy.map(|e| e.final_energy).unwrap_or_default(),
        relative_energy_drift: energy.map(|e| e.relative_drift).unwrap_or_default(),
        max_relative_energy_deviation: energy
            .map(|e| e.max_relative_deviation)
            .unwrap_or_default(),
        final_momentum,
        generated_at,
    }
}

fn body_name<const D: usize, const N: usize>(scenario: &Scenario<D, N>, index: usize) -> String {
    scenario
        .body_names
        .get(index)
        .cloned()
        .unwrap_or_else(|| format!("body{index}"))
}
