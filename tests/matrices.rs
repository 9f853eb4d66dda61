use nbody_simulator::dynamics::{body_radius, gravitational_parameters, safe_distances};
use nbody_simulator::{Masses, PhysicalConstants, si};

fn masses() -> Masses<3> {
    Masses::new([1.0, 0.25, 3.0e-6]).expect("valid masses")
}

#[test]
fn gravitational_parameters_depend_only_on_the_source_mass() {
    let constants = PhysicalConstants::astronomical();
    let m = masses();
    let gm = gravitational_parameters(&m, &constants);
    let g = constants.gravitational_constant;

    for i in 0..3 {
        for j in 0..3 {
            if i == j {
                assert_eq!(gm.get(i, j), 0.0, "diagonal must stay unused");
            } else {
                assert_eq!(gm.get(i, j), g * m[j], "entry ({i},{j})");
            }
        }
    }
    // Asymmetric whenever masses differ
    assert!(gm.get(0, 1) != gm.get(1, 0));
}

#[test]
fn safe_distances_are_symmetric_sums_of_radii() {
    let constants = PhysicalConstants::astronomical();
    let m = masses();
    let safe = safe_distances(&m, constants.reference_density);

    for i in 0..3 {
        assert_eq!(safe.get(i, i), 0.0);
        for j in 0..3 {
            assert_eq!(safe.get(i, j), safe.get(j, i), "pair ({i},{j})");
            if i != j {
                let expected = body_radius(m[i], constants.reference_density)
                    + body_radius(m[j], constants.reference_density);
                assert!((safe.get(i, j) - expected).abs() < 1e-15);
            }
        }
    }
}

#[test]
fn builders_are_idempotent() {
    let constants = PhysicalConstants::solar_si();
    let m = Masses::new([si::SOLAR_MASS_KG, 2.0 * si::SOLAR_MASS_KG]).unwrap();

    assert_eq!(
        gravitational_parameters(&m, &constants),
        gravitational_parameters(&m, &constants)
    );
    assert_eq!(
        safe_distances(&m, constants.reference_density),
        safe_distances(&m, constants.reference_density)
    );
}

#[test]
fn solar_mass_at_solar_density_has_solar_radius() {
    let r_si = body_radius(si::SOLAR_MASS_KG, si::SOLAR_MEAN_DENSITY_KG_M3);
    assert!((r_si / 6.957e8 - 1.0).abs() < 0.01, "radius = {r_si} m");

    // Same body in the astronomical system: ~0.00465 AU
    let r_au = body_radius(1.0, PhysicalConstants::astronomical().reference_density);
    assert!((r_au - r_si / si::AU_M).abs() < 1e-9, "radius = {r_au} AU");
}

#[test]
fn masses_reject_non_positive_or_non_finite_values() {
    use nbody_simulator::SimulationError;

    assert_eq!(
        Masses::new([1.0, 0.0]),
        Err(SimulationError::NonPositiveMass {
            index: 1,
            value: 0.0
        })
    );
    assert!(Masses::new([-1.0, 1.0]).is_err());
    assert!(Masses::new([1.0, f64::INFINITY]).is_err());
    assert!(Masses::new([f64::NAN, 1.0]).is_err());
}
