//! SI physical quantities used by the interior structure solver.
//!
//! Every quantity stores its value in the SI base unit (kg, m, Pa, kg/m³, K)
//! and offers constructors and accessors for the astronomical units planetary
//! scientists usually quote (Earth masses, Jupiter radii, GPa, g/cm³, ...).

pub mod density;
pub mod length;
pub mod mass;
pub mod pressure;
pub mod temperature;

#[cfg(test)]
mod density_test;
#[cfg(test)]
mod length_test;
#[cfg(test)]
mod pressure_test;

pub use density::Density;
pub use length::{Length, EARTH_RADIUS_M, JUPITER_RADIUS_M, SOLAR_RADIUS_M};
pub use mass::{Mass, EARTH_MASS_KG, JUPITER_MASS_KG, SOLAR_MASS_KG};
pub use pressure::{Pressure, STANDARD_ATMOSPHERE_PA};
pub use temperature::Temperature;
