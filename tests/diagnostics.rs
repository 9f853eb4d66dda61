use std::f64::consts::PI;

use nbody_simulator::dynamics::diagnostics::{
    center_of_mass, energy_report, kinetic_energy, potential_energy, total_energy, total_momentum,
};
use nbody_simulator::{Field, Masses, Method, PhysicalConstants, Simulator, State, TimeSpan};

fn circular_binary() -> State<2, 2> {
    let v = 2.0_f64.sqrt() * PI;
    State::new(
        Field::from_bodies([[-0.5, 0.0], [0.5, 0.0]]),
        Field::from_bodies([[0.0, -v], [0.0, v]]),
    )
}

/// Three unequal bodies on roughly circular orbits in 3D, shifted into the
/// centre-of-momentum frame.
fn three_body() -> (Masses<3>, State<3, 3>) {
    let masses = Masses::new([1.0, 1.0e-3, 3.0e-4]).unwrap();
    let position = Field::from_bodies([[0.0, 0.0, 0.0], [1.0, 0.0, 0.1], [-0.3, 2.0, -0.2]]);
    let mut velocity = Field::from_bodies([[0.0, 0.0, 0.0], [0.0, 6.2, 0.2], [-4.3, -0.65, 0.1]]);

    let p = total_momentum(&State::new(position, velocity), &masses);
    let total = masses.total();
    for body in 0..3 {
        let mut v = velocity.body(body);
        for d in 0..3 {
            v[d] -= p[d] / total;
        }
        velocity.set_body(body, v);
    }
    (masses, State::new(position, velocity))
}

#[test]
fn circular_binary_energies() {
    let g = PhysicalConstants::astronomical().gravitational_constant;
    let masses = Masses::new([1.0, 1.0]).unwrap();
    let state = circular_binary();

    let kinetic = kinetic_energy(&state, &masses);
    let potential = potential_energy(&state, &masses, g);
    assert!((kinetic - 2.0 * PI * PI).abs() < 1e-12, "kinetic = {kinetic}");
    assert!((potential + 4.0 * PI * PI).abs() < 1e-12, "potential = {potential}");
    assert!((total_energy(&state, &masses, g) + 2.0 * PI * PI).abs() < 1e-12);

    let p = total_momentum(&state, &masses);
    assert!(p.iter().all(|c| c.abs() < 1e-15));
    assert_eq!(center_of_mass(&state, &masses), [0.0, 0.0]);
}

#[test]
fn momentum_is_conserved_in_three_dimensions() {
    let (masses, initial) = three_body();
    let p0 = total_momentum(&initial, &masses);
    assert!(p0.iter().all(|c| c.abs() < 1e-12), "p0 = {p0:?}");

    let mut sim = Simulator::<3, 3>::new(PhysicalConstants::astronomical(), masses);
    let span = TimeSpan::new(0.0, 0.5).unwrap();
    let outcome = sim.simulate(Method::Rk4Fixed, 1.0 / 2048.0, span, initial).unwrap();
    assert!(outcome.is_completed(), "unexpected {outcome:?}");

    for point in sim.result() {
        let p = sim.calculate_total_motion(point);
        assert!(
            p.iter().all(|c| c.abs() < 1e-9),
            "momentum drifted at t = {}: {p:?}",
            point.time
        );
    }
}

#[test]
fn centre_of_mass_stays_put_without_net_momentum() {
    let (masses, initial) = three_body();
    let com0 = center_of_mass(&initial, &masses);

    let mut sim = Simulator::<3, 3>::new(PhysicalConstants::astronomical(), masses);
    let span = TimeSpan::new(0.0, 0.25).unwrap();
    sim.simulate_euler(1.0 / 1024.0, span, initial).unwrap();

    let com = sim.calculate_center_of_mass(sim.result().last().unwrap());
    for d in 0..3 {
        assert!((com[d] - com0[d]).abs() < 1e-9, "axis {d}: {} vs {}", com[d], com0[d]);
    }
}

#[test]
fn rk4_conserves_energy_far_better_than_euler() {
    let masses = Masses::new([1.0, 1.0]).unwrap();
    let span = TimeSpan::new(0.0, 1.0).unwrap();
    let h = 1.0 / 1024.0;

    let mut rk4 = Simulator::<2, 2>::new(PhysicalConstants::astronomical(), masses);
    rk4.simulate_rk4_fixed(h, span, circular_binary()).unwrap();
    let rk4_report = rk4.energy_report().unwrap();

    let mut euler = Simulator::<2, 2>::new(PhysicalConstants::astronomical(), masses);
    euler.simulate_euler(h, span, circular_binary()).unwrap();
    let euler_report = euler.energy_report().unwrap();

    assert!(
        rk4_report.relative_drift.abs() < 1e-6,
        "rk4 drift = {}",
        rk4_report.relative_drift
    );
    assert!(
        euler_report.relative_drift.abs() > 1e-3,
        "euler drift = {}",
        euler_report.relative_drift
    );
    // Forward Euler spirals outward on a Kepler orbit
    assert!(euler_report.final_energy > euler_report.initial);
}

#[test]
fn energy_report_tracks_the_worst_deviation() {
    let g = PhysicalConstants::astronomical().gravitational_constant;
    let masses = Masses::new([1.0, 1.0]).unwrap();

    let mut sim = Simulator::<2, 2>::new(PhysicalConstants::astronomical(), masses);
    assert!(sim.energy_report().is_none());

    let span = TimeSpan::new(0.0, 0.5).unwrap();
    sim.simulate_euler(1.0 / 256.0, span, circular_binary()).unwrap();
    let report = energy_report(sim.result(), &masses, g).unwrap();

    assert_eq!(report.initial, sim.calculate_energy(&sim.result()[0]));
    assert_eq!(
        report.final_energy,
        sim.calculate_energy(sim.result().last().unwrap())
    );
    assert!(report.max_relative_deviation >= report.relative_drift.abs());
    assert!(report.max_relative_deviation > 0.0);
}
