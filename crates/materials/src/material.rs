//! The capability interface the structure solver consumes

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

/// Index into a material's phase table; 0 is the lowest-pressure phase.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PhaseId(pub usize);

impl PhaseId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A substance that can be placed in a composition layer.
///
/// All quantities are SI: pressure in Pa, temperature in K, density in
/// kg/m³. Only [`density`](Material::density) and
/// [`base_density`](Material::base_density) are required; the thermal
/// queries default to a material with no thermal coupling (never melts,
/// perfectly conducting, no expansion), and to a single phase.
///
/// Implementations must be pure: the solver calls every method many times
/// per step and relies on identical inputs producing identical outputs.
pub trait Material: Debug + Send + Sync {
    fn name(&self) -> &str;

    /// Uncompressed density, used to order layers from the center outward.
    fn base_density(&self) -> f64;

    fn density(&self, pressure: f64, temperature: f64) -> f64;

    /// Density of `phase` at `pressure`, even outside the pressure range
    /// where that phase is stable. Lets an integration step that crosses a
    /// phase bound stay on one equation of state.
    fn density_in(&self, _phase: PhaseId, pressure: f64, temperature: f64) -> f64 {
        self.density(pressure, temperature)
    }

    /// Melting temperature at `pressure`.
    fn melting_curve(&self, _pressure: f64) -> f64 {
        f64::INFINITY
    }

    /// Specific heat capacity at constant pressure, J/(kg K).
    fn specific_heat_capacity(&self, _pressure: f64, _temperature: f64) -> f64 {
        f64::INFINITY
    }

    /// Volumetric thermal expansion coefficient, 1/K.
    fn thermal_expansion(&self, _pressure: f64, _temperature: f64) -> f64 {
        0.0
    }

    /// Thermal conductivity, W/(m K).
    fn thermal_conductivity(&self, _pressure: f64, _temperature: f64) -> f64 {
        f64::INFINITY
    }

    /// Phase the material is in at `pressure`.
    fn phase(&self, _pressure: f64) -> PhaseId {
        PhaseId(0)
    }
}
