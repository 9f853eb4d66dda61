use std::fs;

use nbody_simulator::export::summary::write_summaries;
use nbody_simulator::export::trajectory::header;
use nbody_simulator::report::{run_summary, write_trajectory_csv};
use nbody_simulator::scenario::{Scenario, load_scenario};
use nbody_simulator::Method;

const SCENARIOS: &str = "configs/scenarios";

#[test]
fn header_lists_body_major_columns() {
    assert_eq!(
        header(2, 2),
        "time,pos0_0,pos0_1,pos1_0,pos1_1,vel0_0,vel0_1,vel1_0,vel1_1,kinetic,potential,energy,p_0,p_1"
    );
    assert_eq!(header(3, 1).split(',').count(), 1 + 3 + 3 + 3 + 3);
}

#[test]
fn trajectory_csv_has_one_row_per_point() {
    let scenario: Scenario<2, 2> = load_scenario(SCENARIOS, Some("circular-binary")).unwrap();
    let mut sim = scenario.simulator();
    let span = nbody_simulator::TimeSpan::new(0.0, 0.01).unwrap();
    sim.simulate_euler(scenario.step, span, scenario.initial).unwrap();

    let mut buffer = Vec::new();
    write_trajectory_csv(&sim, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines.len(), sim.result().len() + 1);
    assert_eq!(lines[0], header(2, 2));

    let first: Vec<f64> = lines[1].split(',').map(|v| v.parse().unwrap()).collect();
    assert_eq!(first.len(), 14);
    assert_eq!(first[0], 0.0);
    assert_eq!(&first[1..5], &[-0.5, 0.0, 0.5, 0.0]);
    let energy = sim.calculate_energy(&sim.result()[0]);
    assert!((first[11] - energy).abs() < 1e-12 * energy.abs());
}

#[test]
fn collision_summary_names_the_bodies() {
    let scenario: Scenario<2, 2> = load_scenario(SCENARIOS, Some("head-on")).unwrap();
    let mut sim = scenario.simulator();
    let outcome = sim
        .simulate(Method::Rk4Fixed, scenario.step, scenario.span, scenario.initial)
        .unwrap();

    let summary = run_summary(
        &scenario,
        Method::Rk4Fixed,
        &outcome,
        &sim,
        "2000-01-01T12:00:00+00:00".to_string(),
    );
    assert!(!summary.completed);
    assert_eq!(summary.method, "rk4");
    assert_eq!(summary.points, sim.result().len());
    let collision = summary.collision.as_ref().expect("collision summary");
    assert_eq!(collision.first_body, "body0");
    assert_eq!(collision.second_body, "body1");
    assert!(collision.separation < collision.safe_distance);
    assert_eq!(summary.final_momentum.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/summary.json");
    write_summaries(&path, &[summary]).unwrap();
    let json = fs::read_to_string(&path).unwrap();
    assert!(json.contains("\"scenario\": \"head-on\""));
    assert!(json.contains("\"first_body\": \"body0\""));
}
