use materials::{LinearFit, PhaseId, Substance};

use crate::config::Configuration;
use crate::driver::{detect_trigger, judge_surface, IsothermalSolver, StepProbe, Trigger, Verdict};
use crate::error::{ConfigurationError, InteriorError};
use crate::layers::Composition;

fn quiet_probe() -> StepProbe {
    StepProbe {
        enclosed_mass: 1.0,
        layer_mass_limit: 2.0,
        thermal: true,
        convective: false,
        temperature: 1000.0,
        melting_temperature: 1500.0,
        phase: PhaseId(0),
        current_phase: PhaseId(0),
    }
}

#[test]
fn test_no_trigger_inside_layer() {
    assert_eq!(detect_trigger(&quiet_probe()), None);
}

#[test]
fn test_layer_boundary_takes_priority() {
    let probe = StepProbe {
        enclosed_mass: 3.0,
        temperature: 2000.0,
        current_phase: PhaseId(1),
        ..quiet_probe()
    };
    assert_eq!(detect_trigger(&probe), Some(Trigger::LayerBoundary));
}

#[test]
fn test_enclosed_mass_equal_to_limit_is_not_a_boundary() {
    let probe = StepProbe {
        enclosed_mass: 2.0,
        ..quiet_probe()
    };
    assert_eq!(detect_trigger(&probe), None);
}

#[test]
fn test_regime_switch_before_phase_switch() {
    let melting = StepProbe {
        temperature: 2000.0,
        current_phase: PhaseId(1),
        ..quiet_probe()
    };
    assert_eq!(
        detect_trigger(&melting),
        Some(Trigger::RegimeSwitch { convective: true })
    );

    let freezing = StepProbe {
        convective: true,
        ..quiet_probe()
    };
    assert_eq!(
        detect_trigger(&freezing),
        Some(Trigger::RegimeSwitch { convective: false })
    );
}

#[test]
fn test_phase_switch() {
    let probe = StepProbe {
        current_phase: PhaseId(2),
        ..quiet_probe()
    };
    assert_eq!(
        detect_trigger(&probe),
        Some(Trigger::PhaseSwitch {
            from: PhaseId(0),
            to: PhaseId(2)
        })
    );
}

#[test]
fn test_isothermal_models_ignore_regime_and_phase() {
    let probe = StepProbe {
        thermal: false,
        temperature: 2000.0,
        current_phase: PhaseId(1),
        ..quiet_probe()
    };
    assert_eq!(detect_trigger(&probe), None);
}

#[test]
fn test_never_melting_material_stays_conductive() {
    let probe = StepProbe {
        melting_temperature: f64::INFINITY,
        temperature: 1.0e6,
        ..quiet_probe()
    };
    assert_eq!(detect_trigger(&probe), None);
}

#[test]
fn test_verdict_converged_within_tolerance() {
    let verdict = judge_surface(1.0e6, 101_325.005, 101_325.0, 0.01, 5.0e4).unwrap();
    assert_eq!(verdict, Verdict::Converged);
}

#[test]
fn test_verdict_restart_subtracts_residual() {
    let verdict = judge_surface(1.0e6, 250.0, 0.0, 1e-5, 5.0e4).unwrap();
    assert_eq!(
        verdict,
        Verdict::Restart {
            central_pressure: 1.0e6 - 250.0,
            residual: 250.0
        }
    );

    let verdict = judge_surface(1.0e6, -400.0, 100.0, 1e-5, 5.0e4).unwrap();
    assert_eq!(
        verdict,
        Verdict::Restart {
            central_pressure: 1.0e6 + 500.0,
            residual: -500.0
        }
    );
}

#[test]
fn test_verdict_rejects_non_finite_pressure() {
    for pressure in [f64::NAN, f64::INFINITY] {
        assert_eq!(
            judge_surface(1.0e6, pressure, 0.0, 1e-5, 42.0),
            Err(InteriorError::NonFinitePressure { radius: 42.0 })
        );
    }
}

#[test]
fn test_solver_validates_configuration() {
    let rock = Substance::new("Rock", LinearFit::incompressible(2000.0));
    let body = Composition::new(&[1.0e18], &[&rock]).unwrap();
    let config = Configuration::default().with_max_attempts(0);

    let result = IsothermalSolver::new(body, config);
    assert!(matches!(
        result,
        Err(InteriorError::Configuration(
            ConfigurationError::InvalidParameter {
                name: "maxAttempts",
                ..
            }
        ))
    ));
}
