//! Converged interior structure and profile queries

use std::collections::BTreeMap;

use materials::{Material, PhaseId};
use nalgebra::Vector3;
use numerics::{DormandPrince, State};
use serde::{Deserialize, Serialize};
use units::Mass;

use crate::config::Configuration;
use crate::constants::PI;
use crate::equations::{LayerEnvironment, INERTIA, MASS, PRESSURE};
use crate::error::InteriorError;
use crate::layers::Layer;

/// What changed at a transition radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionKind {
    /// The enclosed mass reached the outer edge of a layer.
    Layer,
    /// Heat transport switched between conduction and convection.
    Regime { convective: bool },
    /// The material changed phase.
    Phase { from: PhaseId, to: PhaseId },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub kind: TransitionKind,
    /// m
    pub radius: f64,
    /// Layer being integrated when the transition was found.
    pub layer: usize,
}

/// A stretch of the profile integrated with one layer, regime and phase.
#[derive(Debug, Clone)]
pub struct Segment<'m, const N: usize> {
    pub(crate) layer: usize,
    pub(crate) material: &'m dyn Material,
    pub(crate) convective: bool,
    pub(crate) phase: PhaseId,
    pub(crate) start: f64,
    pub(crate) engine: DormandPrince<N>,
}

impl<'m, const N: usize> Segment<'m, N> {
    pub fn layer(&self) -> usize {
        self.layer
    }

    pub fn material(&self) -> &'m dyn Material {
        self.material
    }

    pub fn is_convective(&self) -> bool {
        self.convective
    }

    pub fn phase(&self) -> PhaseId {
        self.phase
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    /// Right-hand side inputs for this segment. Thermal segments stay on
    /// their own phase until the driver opens the next segment.
    pub(crate) fn environment(
        &self,
        config: &Configuration,
        thermal: bool,
    ) -> LayerEnvironment<'m> {
        let environment = LayerEnvironment::new(self.material, self.convective, config);
        if thermal {
            environment.with_phase(self.phase)
        } else {
            environment
        }
    }
}

/// Compact description of a solved body, ready for serialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodySummary {
    pub mass: Mass,
    /// Diameter along each axis (m)
    pub dimensions: Vector3<f64>,
    /// Moment of inertia normalized by M R²
    pub inertia_moment: f64,
    /// Percent of the total mass per material name
    pub interior: BTreeMap<String, f64>,
}

/// The result of a converged solve.
///
/// Profile queries evaluate the dense output of the segment that covers the
/// requested radius; they never mutate the structure, so repeated queries
/// return identical values.
#[derive(Debug, Clone)]
pub struct Structure<'m, const N: usize> {
    pub(crate) layers: Vec<Layer<'m>>,
    pub(crate) outer_layer: usize,
    pub(crate) segments: Vec<Segment<'m, N>>,
    pub(crate) boundaries: Vec<f64>,
    pub(crate) transitions: Vec<Transition>,
    pub(crate) surface: State<N>,
    pub(crate) central_pressure: f64,
    pub(crate) config: Configuration,
    pub(crate) temperature_index: Option<usize>,
    pub(crate) attempts: usize,
    pub(crate) degraded: bool,
}

impl<'m, const N: usize> Structure<'m, N> {
    /// Total mass of every layer the integration reached (kg).
    pub fn mass(&self) -> f64 {
        self.layers
            .iter()
            .take(self.outer_layer + 1)
            .map(|layer| layer.mass)
            .sum()
    }

    /// m
    pub fn radius(&self) -> f64 {
        self.boundaries.last().copied().unwrap_or(0.0)
    }

    /// kg m²
    pub fn inertia_moment(&self) -> f64 {
        self.surface[INERTIA]
    }

    /// kg/m³
    pub fn mean_density(&self) -> f64 {
        self.mass() / (4.0 / 3.0 * PI * self.radius().powi(3))
    }

    /// Percent of the total mass contributed by each material. Layers
    /// sharing a material name are added together.
    pub fn interior(&self) -> BTreeMap<String, f64> {
        let total = self.mass();
        let mut interior = BTreeMap::new();
        for layer in &self.layers {
            *interior
                .entry(layer.material.name().to_string())
                .or_insert(0.0) += 100.0 * layer.mass / total;
        }
        interior
    }

    /// Converged central pressure (Pa).
    pub fn core_pressure(&self) -> f64 {
        self.central_pressure
    }

    /// K
    pub fn core_temperature(&self) -> f64 {
        self.config.initial_temperature
    }

    pub fn core_density(&self) -> f64 {
        self.layers
            .first()
            .map_or(f64::NAN, |layer| {
                layer
                    .material
                    .density(self.core_pressure(), self.core_temperature())
            })
    }

    pub fn surface_pressure(&self) -> f64 {
        self.surface[PRESSURE]
    }

    pub fn surface_temperature(&self) -> f64 {
        self.temperature_of(&self.surface)
    }

    pub fn mass_at(&self, radius: f64) -> Result<f64, InteriorError> {
        Ok(self.state_at(radius)?[MASS])
    }

    pub fn pressure_at(&self, radius: f64) -> Result<f64, InteriorError> {
        Ok(self.state_at(radius)?[PRESSURE])
    }

    pub fn inertia_moment_at(&self, radius: f64) -> Result<f64, InteriorError> {
        Ok(self.state_at(radius)?[INERTIA])
    }

    pub fn temperature_at(&self, radius: f64) -> Result<f64, InteriorError> {
        let state = self.state_at(radius)?;
        Ok(self.temperature_of(&state))
    }

    /// Density from the material of the segment covering `radius`.
    pub fn density_at(&self, radius: f64) -> Result<f64, InteriorError> {
        let segment = self.segment_at(radius)?;
        let state = self.evaluate(segment, radius)?;
        let thermal = self.temperature_index.is_some();
        Ok(segment
            .environment(&self.config, thermal)
            .density(state[PRESSURE], self.temperature_of(&state)))
    }

    /// Full integrated state at `radius`.
    pub fn state_at(&self, radius: f64) -> Result<State<N>, InteriorError> {
        let segment = self.segment_at(radius)?;
        self.evaluate(segment, radius)
    }

    /// Index of the composition layer at `radius`.
    pub fn layer_at(&self, radius: f64) -> Result<usize, InteriorError> {
        Ok(self.segment_at(radius)?.layer)
    }

    /// Transition radii, starting at 0 and ending at the surface.
    pub fn boundaries(&self) -> &[f64] {
        &self.boundaries
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    pub fn segments(&self) -> &[Segment<'m, N>] {
        &self.segments
    }

    pub fn layers(&self) -> &[Layer<'m>] {
        &self.layers
    }

    /// Number of central-pressure attempts the solve needed.
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// The surface was taken where the integrator stopped rather than where
    /// the outer layer's mass was reached.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn to_summary(&self) -> BodySummary {
        let mass = self.mass();
        let radius = self.radius();
        BodySummary {
            mass: Mass::from_kg(mass),
            dimensions: Vector3::repeat(2.0 * radius),
            inertia_moment: self.inertia_moment() / (mass * radius * radius),
            interior: self.interior(),
        }
    }

    fn temperature_of(&self, state: &State<N>) -> f64 {
        match self.temperature_index {
            Some(index) => state[index],
            None => self.config.initial_temperature,
        }
    }

    /// The outermost segment whose span contains `radius`.
    fn segment_at(&self, radius: f64) -> Result<&Segment<'m, N>, InteriorError> {
        let out_of_range = || InteriorError::RadiusOutOfRange {
            radius,
            surface: self.radius(),
        };
        let index = self
            .boundaries
            .windows(2)
            .rposition(|span| span[0] <= radius && radius <= span[1])
            .ok_or_else(out_of_range)?;
        self.segments.get(index).ok_or_else(out_of_range)
    }

    fn evaluate(&self, segment: &Segment<'m, N>, radius: f64) -> Result<State<N>, InteriorError> {
        segment
            .engine
            .evaluate(radius)
            .ok_or(InteriorError::RadiusOutOfRange {
                radius,
                surface: self.radius(),
            })
    }
}
