//! Two-layer Earth model
//!
//! Solves an iron core under a silicate mantle at one Earth mass and prints
//! the radius, central conditions and a sampled pressure profile.
//!
//! Run with: RUST_LOG=interior=debug cargo run --package interior --example earth_model

use interior::{Composition, Configuration, InteriorError, IsothermalSolver};
use materials::catalog;
use tracing_subscriber::EnvFilter;
use units::{Length, Mass, Pressure, EARTH_RADIUS_M};

fn main() -> Result<(), InteriorError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Interior Structure: Two-Layer Earth\n");
    println!("{}", "=".repeat(60));

    let iron = catalog::iron();
    let rock = catalog::silicate();
    let total = Mass::from_earth_masses(1.0).to_kg();
    let body = Composition::new(&[0.325 * total, 0.675 * total], &[&iron, &rock])?;

    let config = Configuration::default()
        .with_error_exponent(3.0)
        .with_initial_pressure(Pressure::from_gpa(350.0))
        .with_max_radius(Length::from_earth_radii(4.0));

    let structure = IsothermalSolver::new(body, config)?.solve()?;
    let radius = structure.radius();

    println!("\nConverged after {} attempts", structure.attempts());
    println!("  Radius: {:.4} R⊕ ({:.1} km)", radius / EARTH_RADIUS_M, radius / 1000.0);
    println!(
        "  Central pressure: {:.1} GPa",
        Pressure::from_pascals(structure.core_pressure()).to_gpa()
    );
    println!("  Central density: {:.0} kg/m³", structure.core_density());
    println!("  Mean density: {:.0} kg/m³", structure.mean_density());

    for transition in structure.transitions() {
        println!(
            "  {:?} boundary at {:.1} km",
            transition.kind,
            transition.radius / 1000.0
        );
    }

    println!("\nProfile:");
    println!("{:>10} {:>12} {:>12} {:>12}", "r (km)", "P (GPa)", "ρ (kg/m³)", "M (M⊕)");
    for i in 0..=10 {
        let r = radius * (i as f64 / 10.0);
        println!(
            "{:>10.0} {:>12.2} {:>12.0} {:>12.4}",
            r / 1000.0,
            structure.pressure_at(r)? / 1e9,
            structure.density_at(r)?,
            Mass::from_kg(structure.mass_at(r)?).to_earth_masses()
        );
    }

    let summary = structure.to_summary();
    println!("\nNormalized moment of inertia: {:.4}", summary.inertia_moment);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("\n{json}"),
        Err(error) => eprintln!("could not serialize summary: {error}"),
    }

    Ok(())
}
