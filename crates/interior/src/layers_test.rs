use approx::assert_relative_eq;
use materials::{LinearFit, Substance};

use crate::error::ConfigurationError;
use crate::layers::{sort_layers, Composition};

fn material(name: &str, density: f64) -> Substance {
    Substance::new(name, LinearFit::incompressible(density))
}

#[test]
fn test_layers_ordered_densest_first() {
    let ice = material("Ice", 1000.0);
    let iron = material("Iron", 8000.0);
    let rock = material("Rock", 3000.0);

    let layers = sort_layers(&[1.0, 2.0, 3.0], &[&ice, &iron, &rock]).unwrap();
    let names: Vec<&str> = layers.iter().map(|layer| layer.material.name()).collect();
    let masses: Vec<f64> = layers.iter().map(|layer| layer.mass).collect();

    assert_eq!(names, ["Iron", "Rock", "Ice"]);
    assert_eq!(masses, [2.0, 3.0, 1.0]);
}

#[test]
fn test_equal_densities_keep_input_order() {
    let first = material("First", 3000.0);
    let second = material("Second", 3000.0);
    let core = material("Core", 9000.0);

    let layers = sort_layers(&[1.0, 2.0, 3.0], &[&first, &second, &core]).unwrap();
    let names: Vec<&str> = layers.iter().map(|layer| layer.material.name()).collect();

    assert_eq!(names, ["Core", "First", "Second"]);
}

#[test]
fn test_length_mismatch() {
    let rock = material("Rock", 3000.0);
    let result = sort_layers(&[1.0, 2.0], &[&rock]);

    assert_eq!(
        result.unwrap_err(),
        ConfigurationError::LengthMismatch {
            masses: 2,
            materials: 1
        }
    );
}

#[test]
fn test_empty_composition() {
    let result = Composition::new(&[], &[]);
    assert_eq!(result.unwrap_err(), ConfigurationError::EmptyComposition);
}

#[test]
fn test_non_positive_mass_rejected() {
    let rock = material("Rock", 3000.0);
    let ice = material("Ice", 1000.0);

    for bad in [0.0, -1.0e20, f64::NAN] {
        let result = sort_layers(&[1.0e20, bad], &[&rock, &ice]);
        assert!(matches!(
            result,
            Err(ConfigurationError::NonPositiveMass { index: 1, .. })
        ));
    }
}

#[test]
fn test_cumulative_mass() {
    let ice = material("Ice", 1000.0);
    let iron = material("Iron", 8000.0);
    let rock = material("Rock", 3000.0);
    let body = Composition::new(&[5.0, 2.0, 3.0], &[&ice, &iron, &rock]).unwrap();

    assert_eq!(body.len(), 3);
    assert!(!body.is_empty());
    assert_relative_eq!(body.cumulative_mass(0), 2.0);
    assert_relative_eq!(body.cumulative_mass(1), 5.0);
    assert_relative_eq!(body.cumulative_mass(2), 10.0);
    assert_relative_eq!(body.cumulative_mass(7), body.total_mass());
}
