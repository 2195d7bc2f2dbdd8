use approx::assert_relative_eq;
use materials::{LinearFit, PhaseId, SimonGlatzel, Substance, ThermalProperties};
use numerics::State;
use units::Temperature;

use crate::config::Configuration;
use crate::constants::{G, PI};
use crate::equations::{
    gravity, relativistic_scale, Equations, Isothermal, LayerEnvironment, Thermal, HEAT_FLUX,
    TEMPERATURE,
};

fn rock() -> Substance {
    Substance::new("Rock", LinearFit::incompressible(3000.0)).with_thermal(ThermalProperties {
        melting_curve: Some(SimonGlatzel::new(1500.0, 1.0e9, 3.0)),
        specific_heat_capacity: 1000.0,
        thermal_expansion: 3.0e-5,
        thermal_conductivity: 4.0,
    })
}

#[test]
fn test_gravity_vanishes_at_center() {
    assert_eq!(gravity(0.0, 0.0), 0.0);
    assert_eq!(gravity(0.0, 1.0), 0.0);
    assert_relative_eq!(gravity(2.0, 4.0), G);
}

#[test]
fn test_relativistic_scale() {
    assert_eq!(relativistic_scale(0.0, 1.0e10, 0.0, 3000.0), 1.0);
    // Earth-like conditions are Newtonian to better than 1e-8
    let scale = relativistic_scale(3.0e6, 1.0e11, 2.0e24, 1.0e4);
    assert!(scale > 1.0);
    assert_relative_eq!(scale, 1.0, epsilon = 1e-8);
}

#[test]
fn test_central_states() {
    let config = Configuration::default()
        .with_initial_temperature(Temperature::from_kelvin(2000.0))
        .with_endogenous_heat_flux(0.05);

    let isothermal = Isothermal::central_state(3.0e11, &config);
    assert_eq!(isothermal, State::<3>::new(3.0e11, 0.0, 0.0));
    assert_eq!(Isothermal::temperature(&isothermal, &config), 2000.0);

    let thermal = Thermal::central_state(3.0e11, &config);
    assert_eq!(thermal, State::<5>::new(3.0e11, 0.0, 0.0, 0.05, 2000.0));
    assert_eq!(Thermal::temperature(&thermal, &config), 2000.0);
}

#[test]
fn test_isothermal_derivatives() {
    let material = rock();
    let config = Configuration::default();
    let environment = LayerEnvironment::new(&material, false, &config);
    let radius: f64 = 1.0e6;
    let mass = 4.0 / 3.0 * PI * radius.powi(3) * 3000.0;

    let derivatives =
        Isothermal::derivatives(radius, &State::<3>::new(1.0e9, mass, 0.0), &environment);

    assert_relative_eq!(
        derivatives[0],
        -G * mass / (radius * radius) * 3000.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        derivatives[1],
        4.0 * PI * radius * radius * 3000.0,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        derivatives[2],
        8.0 / 3.0 * PI * radius.powi(4) * 3000.0,
        max_relative = 1e-12
    );
}

#[test]
fn test_derivatives_at_center_are_finite() {
    let material = rock();
    let config = Configuration::default().with_heat_generation_rate(1.0e-11);
    let environment = LayerEnvironment::new(&material, true, &config);

    let derivatives = Thermal::derivatives(
        0.0,
        &State::<5>::new(1.0e9, 0.0, 0.0, 0.1, 2000.0),
        &environment,
    );

    assert!(derivatives.iter().all(|value| value.is_finite()));
    assert_eq!(derivatives[0], 0.0);
    // the 2Q/r dilution term is dropped at r = 0
    assert_relative_eq!(derivatives[HEAT_FLUX], 3000.0 * 1.0e-11);
    assert_eq!(derivatives[TEMPERATURE], 0.0);
}

#[test]
fn test_conductive_and_convective_gradients() {
    let material = rock();
    let config = Configuration::default().with_heat_generation_rate(2.0e-12);
    let radius: f64 = 2.0e6;
    let mass = 4.0 / 3.0 * PI * radius.powi(3) * 3000.0;
    let state = State::<5>::new(1.0e10, mass, 0.0, 0.03, 1800.0);

    let conductive = Thermal::derivatives(
        radius,
        &state,
        &LayerEnvironment::new(&material, false, &config),
    );
    assert_relative_eq!(conductive[TEMPERATURE], -0.03 / 4.0);
    assert_relative_eq!(
        conductive[HEAT_FLUX],
        3000.0 * 2.0e-12 - 2.0 * 0.03 / radius,
        max_relative = 1e-12
    );

    let convective = Thermal::derivatives(
        radius,
        &state,
        &LayerEnvironment::new(&material, true, &config),
    );
    let g = gravity(radius, mass);
    assert_relative_eq!(
        convective[TEMPERATURE],
        -3.0e-5 * g * 1800.0 / 1000.0,
        max_relative = 1e-12
    );
    assert_eq!(convective[HEAT_FLUX], conductive[HEAT_FLUX]);
}

#[test]
fn test_material_without_thermal_data_keeps_temperature() {
    let material = Substance::new("Plain", LinearFit::incompressible(3000.0));
    let config = Configuration::default();
    let state = State::<5>::new(1.0e10, 1.0e22, 0.0, 0.03, 1800.0);

    for convective in [false, true] {
        let derivatives = Thermal::derivatives(
            1.0e6,
            &state,
            &LayerEnvironment::new(&material, convective, &config),
        );
        assert_eq!(derivatives[TEMPERATURE], 0.0);
    }
}

#[test]
fn test_pinned_phase_ignores_phase_bound() {
    let material = Substance::new("Layered", LinearFit::incompressible(2000.0))
        .with_phase(1.0e6, LinearFit::incompressible(2500.0));
    let config = Configuration::default();
    let radius: f64 = 1.0e4;
    // just below the bound, where the material itself is back in phase 0
    let state = State::<5>::new(9.9e5, 1.0e16, 0.0, 0.0, 1000.0);

    let free = LayerEnvironment::new(&material, false, &config);
    let pinned = free.with_phase(PhaseId(1));
    assert_eq!(free.density(9.9e5, 1000.0), 2000.0);
    assert_eq!(pinned.density(9.9e5, 1000.0), 2500.0);

    let derivatives = Thermal::derivatives(radius, &state, &pinned);
    assert_relative_eq!(
        derivatives[1],
        4.0 * PI * radius * radius * 2500.0,
        max_relative = 1e-12
    );
    let derivatives = Isothermal::derivatives(
        radius,
        &State::<3>::new(9.9e5, 1.0e16, 0.0),
        &pinned,
    );
    assert_relative_eq!(
        derivatives[1],
        4.0 * PI * radius * radius * 2500.0,
        max_relative = 1e-12
    );
}
