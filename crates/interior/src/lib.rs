//! Interior structure of planets, brown dwarfs and stars
//!
//! Given the masses of a body's layers and a material for each, this crate
//! finds the radial profiles of pressure, enclosed mass, moment of inertia
//! and (optionally) heat flux and temperature for a body in hydrostatic
//! equilibrium. The central pressure is found by shooting: integrate
//! outward, compare the pressure where the mass runs out with the target
//! surface pressure, correct, repeat.
//!
//! ```
//! use interior::{Composition, Configuration, IsothermalSolver};
//! use materials::{LinearFit, Material, Substance};
//! use units::Pressure;
//!
//! let rock = Substance::new("Rock", LinearFit::incompressible(2000.0));
//! let body = Composition::new(&[1.0e18], &[&rock]).unwrap();
//! let config = Configuration::default()
//!     .with_error_exponent(5.0)
//!     .with_surface_pressure(Pressure::from_pascals(0.0))
//!     .with_initial_pressure(Pressure::from_pascals(1.3e6));
//!
//! let structure = IsothermalSolver::new(body, config).unwrap().solve().unwrap();
//! let radius = structure.radius();
//!
//! assert!((radius - 4.9238e4).abs() < 10.0);
//! assert_eq!(structure.pressure_at(0.0).unwrap(), structure.core_pressure());
//! assert_eq!(structure.density_at(0.5 * radius).unwrap(), rock.base_density());
//! ```

pub mod config;
pub mod constants;
pub mod driver;
pub mod equations;
pub mod error;
pub mod layers;
pub mod structure;

#[cfg(test)]
mod driver_test;
#[cfg(test)]
mod equations_test;
#[cfg(test)]
mod layers_test;

pub use config::Configuration;
pub use constants::GAS_GIANT_SURFACE_PRESSURE;
pub use driver::{IsothermalSolver, Solver, ThermalSolver};
pub use equations::{Equations, Isothermal, Thermal};
pub use error::{ConfigurationError, InteriorError};
pub use layers::{Composition, Layer};
pub use structure::{BodySummary, Segment, Structure, Transition, TransitionKind};
