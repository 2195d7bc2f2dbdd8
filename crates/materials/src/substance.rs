//! Named materials with pressure-driven phases and thermal properties

use serde::{Deserialize, Serialize};

use crate::eos::Eos;
use crate::material::{Material, PhaseId};

/// An equation of state that applies from `lower_pressure` upward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub lower_pressure: f64,
    pub eos: Eos,
}

/// Simon-Glatzel melting curve, Tm(P) = T0 (P/a + 1)^(1/c).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimonGlatzel {
    /// T0, K
    pub reference_temperature: f64,
    /// a, Pa
    pub pressure_scale: f64,
    /// c
    pub exponent: f64,
}

impl SimonGlatzel {
    pub const fn new(reference_temperature: f64, pressure_scale: f64, exponent: f64) -> Self {
        Self {
            reference_temperature,
            pressure_scale,
            exponent,
        }
    }

    pub fn melting_temperature(&self, pressure: f64) -> f64 {
        let base = (pressure / self.pressure_scale + 1.0).max(0.0);
        self.reference_temperature * base.powf(self.exponent.recip())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThermalProperties {
    /// `None` for a material that never melts.
    pub melting_curve: Option<SimonGlatzel>,
    /// J/(kg K)
    pub specific_heat_capacity: f64,
    /// 1/K
    pub thermal_expansion: f64,
    /// W/(m K)
    pub thermal_conductivity: f64,
}

/// A material with one or more phases.
///
/// The phase at a given pressure is the last phase whose lower bound does
/// not exceed it; the first phase also covers every pressure below the
/// second phase's bound, negative pressures included.
///
/// # Examples
///
/// ```
/// use materials::catalog::{ENSTATITE_BME, FE_PEROVSKITE_BME};
/// use materials::{Material, PhaseId, Substance};
///
/// let mantle = Substance::new("Mantle", ENSTATITE_BME).with_phase(25.0e9, FE_PEROVSKITE_BME);
///
/// assert_eq!(mantle.phase(1.0e9), PhaseId(0));
/// assert_eq!(mantle.phase(30.0e9), PhaseId(1));
/// assert_eq!(mantle.base_density(), 3220.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Substance {
    name: String,
    phases: Vec<Phase>,
    #[serde(default)]
    thermal: Option<ThermalProperties>,
}

impl Substance {
    pub fn new(name: impl Into<String>, eos: impl Into<Eos>) -> Self {
        Self {
            name: name.into(),
            phases: vec![Phase {
                lower_pressure: 0.0,
                eos: eos.into(),
            }],
            thermal: None,
        }
    }

    /// Add a phase that takes over at `lower_pressure`.
    pub fn with_phase(mut self, lower_pressure: f64, eos: impl Into<Eos>) -> Self {
        let index = self
            .phases
            .partition_point(|phase| phase.lower_pressure <= lower_pressure);
        self.phases.insert(
            index,
            Phase {
                lower_pressure,
                eos: eos.into(),
            },
        );
        self
    }

    pub fn with_thermal(mut self, thermal: ThermalProperties) -> Self {
        self.thermal = Some(thermal);
        self
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn thermal(&self) -> Option<&ThermalProperties> {
        self.thermal.as_ref()
    }

    fn phase_at(&self, pressure: f64) -> Option<&Phase> {
        self.phases.get(self.phase(pressure).index())
    }
}

impl Material for Substance {
    fn name(&self) -> &str {
        &self.name
    }

    fn base_density(&self) -> f64 {
        self.phases
            .first()
            .map_or(f64::NAN, |phase| phase.eos.reference_density())
    }

    fn density(&self, pressure: f64, _temperature: f64) -> f64 {
        self.phase_at(pressure)
            .map_or(f64::NAN, |phase| phase.eos.density(pressure))
    }

    fn density_in(&self, phase: PhaseId, pressure: f64, _temperature: f64) -> f64 {
        self.phases
            .get(phase.index())
            .map_or(f64::NAN, |phase| phase.eos.density(pressure))
    }

    fn melting_curve(&self, pressure: f64) -> f64 {
        self.thermal
            .and_then(|thermal| thermal.melting_curve)
            .map_or(f64::INFINITY, |curve| curve.melting_temperature(pressure))
    }

    fn specific_heat_capacity(&self, _pressure: f64, _temperature: f64) -> f64 {
        self.thermal
            .map_or(f64::INFINITY, |thermal| thermal.specific_heat_capacity)
    }

    fn thermal_expansion(&self, _pressure: f64, _temperature: f64) -> f64 {
        self.thermal.map_or(0.0, |thermal| thermal.thermal_expansion)
    }

    fn thermal_conductivity(&self, _pressure: f64, _temperature: f64) -> f64 {
        self.thermal
            .map_or(f64::INFINITY, |thermal| thermal.thermal_conductivity)
    }

    fn phase(&self, pressure: f64) -> PhaseId {
        let index = self
            .phases
            .iter()
            .skip(1)
            .rposition(|phase| phase.lower_pressure <= pressure)
            .map_or(0, |position| position + 1);
        PhaseId(index)
    }
}
