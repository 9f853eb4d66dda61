use nbody_simulator::dynamics::{
    acceleration, derivative, gravitational_parameters, safe_distances,
};
use nbody_simulator::{Field, Masses, PhysicalConstants, State};

fn two_bodies(separation: f64, m0: f64, m1: f64) -> (Masses<2>, Field<2, 2>) {
    let masses = Masses::new([m0, m1]).expect("masses");
    let position = Field::from_bodies([[-0.5 * separation, 0.0], [0.5 * separation, 0.0]]);
    (masses, position)
}

#[test]
fn collision_detected_inside_safe_distance() {
    let constants = PhysicalConstants::astronomical();
    let (masses, _) = two_bodies(1.0, 1.0, 1.0);
    let gm = gravitational_parameters(&masses, &constants);
    let safe = safe_distances(&masses, constants.reference_density);
    let limit = safe.get(0, 1);

    let (_, inside) = two_bodies(0.99 * limit, 1.0, 1.0);
    let collision = acceleration(&inside, &gm, &safe).expect_err("bodies overlap");
    assert_eq!((collision.first, collision.second), (0, 1));
    assert!(collision.separation < collision.safe_distance);
    assert_eq!(collision.safe_distance, limit);

    let (_, outside) = two_bodies(1.01 * limit, 1.0, 1.0);
    let acc = acceleration(&outside, &gm, &safe).expect("no collision just outside");
    assert!(acc.is_finite(), "acceleration must be finite: {acc:?}");
}

#[test]
fn collision_reports_the_offending_pair() {
    let constants = PhysicalConstants::astronomical();
    let masses = Masses::new([1.0, 1.0, 1.0]).unwrap();
    let gm = gravitational_parameters(&masses, &constants);
    let safe = safe_distances(&masses, constants.reference_density);

    // Bodies 0 and 2 overlap, body 1 is far away
    let position = Field::from_bodies([[0.0, 0.0], [5.0, 0.0], [0.001, 0.0]]);
    let collision = acceleration(&position, &gm, &safe).unwrap_err();
    assert_eq!((collision.first, collision.second), (0, 2));
}

#[test]
fn accelerations_obey_newtons_third_law() {
    let constants = PhysicalConstants::astronomical();
    let (masses, position) = two_bodies(1.0, 2.0, 3.0);
    let gm = gravitational_parameters(&masses, &constants);
    let safe = safe_distances(&masses, constants.reference_density);

    let acc = acceleration(&position, &gm, &safe).unwrap();
    for d in 0..2 {
        let net = masses[0] * acc[(d, 0)] + masses[1] * acc[(d, 1)];
        assert!(net.abs() < 1e-12, "net force along {d}: {net}");
    }
    // Body 0 sits at -x and is pulled toward +x
    assert!(acc[(0, 0)] > 0.0);
    assert!(acc[(0, 1)] < 0.0);
    let expected = constants.gravitational_constant * 3.0;
    assert!((acc[(0, 0)] - expected).abs() < 1e-12);
}

#[test]
fn acceleration_follows_inverse_square_law() {
    let constants = PhysicalConstants::astronomical();
    let (masses, near) = two_bodies(1.0, 1.0, 1.0);
    let (_, far) = two_bodies(2.0, 1.0, 1.0);
    let gm = gravitational_parameters(&masses, &constants);
    let safe = safe_distances(&masses, constants.reference_density);

    let a_near = acceleration(&near, &gm, &safe).unwrap();
    let a_far = acceleration(&far, &gm, &safe).unwrap();
    let ratio = a_near[(0, 0)] / a_far[(0, 0)];
    assert!((ratio - 4.0).abs() < 1e-12, "expected 4x, got {ratio}");
}

#[test]
fn derivative_carries_state_velocity() {
    let constants = PhysicalConstants::astronomical();
    let (masses, position) = two_bodies(1.0, 1.0, 1.0);
    let velocity = Field::from_bodies([[0.0, -1.0], [0.0, 1.0]]);
    let gm = gravitational_parameters(&masses, &constants);
    let safe = safe_distances(&masses, constants.reference_density);

    let state = State::new(position, velocity);
    let dy = derivative(&state, &gm, &safe).unwrap();
    assert_eq!(dy.velocity, velocity);
    assert_eq!(dy.acceleration, acceleration(&position, &gm, &safe).unwrap());
}
