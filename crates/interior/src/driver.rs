//! Shooting solver for the central pressure
//!
//! Each attempt integrates outward from the center with a guessed central
//! pressure. Within an attempt the integration is broken into segments at
//! every layer boundary, and for thermal models also at every change of heat
//! transport regime or material phase. The surface is the radius where the
//! enclosed mass reaches the mass of the outer layer; its pressure is
//! compared against the target and the central pressure is corrected by the
//! difference until the two agree.

use std::marker::PhantomData;

use materials::PhaseId;
use numerics::{locate_root, DormandPrince, State, Status};
use tracing::{debug, info, warn};

use crate::config::Configuration;
use crate::equations::{Equations, Isothermal, Thermal, MASS, PRESSURE, TEMPERATURE};
use crate::error::InteriorError;
use crate::layers::Composition;
use crate::structure::{Segment, Structure, Transition, TransitionKind};

pub type IsothermalSolver<'m> = Solver<'m, Isothermal, 3>;
pub type ThermalSolver<'m> = Solver<'m, Thermal, 5>;

/// An event detected at the end of an accepted step, in priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    LayerBoundary,
    RegimeSwitch { convective: bool },
    PhaseSwitch { from: PhaseId, to: PhaseId },
}

/// What the driver knows at the end of an accepted step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepProbe {
    /// kg
    pub enclosed_mass: f64,
    /// Enclosed mass at the outer edge of the current layer (kg).
    pub layer_mass_limit: f64,
    /// Regime and phase switches are only tracked for thermal models.
    pub thermal: bool,
    pub convective: bool,
    pub temperature: f64,
    pub melting_temperature: f64,
    /// Phase the current segment was seeded with.
    pub phase: PhaseId,
    /// Phase of the material at the step's end pressure.
    pub current_phase: PhaseId,
}

/// The highest-priority event at the end of a step, if any.
pub fn detect_trigger(probe: &StepProbe) -> Option<Trigger> {
    if probe.enclosed_mass > probe.layer_mass_limit {
        return Some(Trigger::LayerBoundary);
    }
    if !probe.thermal {
        return None;
    }
    if !probe.convective && probe.melting_temperature < probe.temperature {
        return Some(Trigger::RegimeSwitch { convective: true });
    }
    if probe.convective && probe.melting_temperature > probe.temperature {
        return Some(Trigger::RegimeSwitch { convective: false });
    }
    if probe.current_phase != probe.phase {
        return Some(Trigger::PhaseSwitch {
            from: probe.phase,
            to: probe.current_phase,
        });
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Converged,
    /// Try again with the corrected central pressure.
    Restart { central_pressure: f64, residual: f64 },
}

/// Compare the surface pressure of an attempt with the target.
pub fn judge_surface(
    central_pressure: f64,
    surface_pressure: f64,
    target: f64,
    tolerance: f64,
    radius: f64,
) -> Result<Verdict, InteriorError> {
    let residual = surface_pressure - target;
    if !residual.is_finite() {
        return Err(InteriorError::NonFinitePressure { radius });
    }
    if residual.abs() <= tolerance {
        Ok(Verdict::Converged)
    } else {
        Ok(Verdict::Restart {
            central_pressure: central_pressure - residual,
            residual,
        })
    }
}

/// Solves for the structure of a body in hydrostatic equilibrium.
///
/// # Examples
///
/// ```
/// use interior::{Composition, Configuration, IsothermalSolver};
/// use materials::{LinearFit, Substance};
/// use units::Pressure;
///
/// let rock = Substance::new("Rock", LinearFit::incompressible(2000.0));
/// let body = Composition::new(&[1.0e18], &[&rock]).unwrap();
/// let config = Configuration::default()
///     .with_error_exponent(5.0)
///     .with_surface_pressure(Pressure::from_pascals(0.0))
///     .with_initial_pressure(Pressure::from_pascals(1.3e6));
///
/// let structure = IsothermalSolver::new(body, config).unwrap().solve().unwrap();
/// assert!(structure.surface_pressure().abs() <= 1e-5);
/// ```
#[derive(Debug, Clone)]
pub struct Solver<'m, E, const N: usize> {
    composition: Composition<'m>,
    config: Configuration,
    equations: PhantomData<E>,
}

impl<'m, E, const N: usize> Solver<'m, E, N>
where
    E: Equations<N>,
{
    pub fn new(composition: Composition<'m>, config: Configuration) -> Result<Self, InteriorError> {
        config.validate()?;

        if E::THERMAL {
            let pressure = config.initial_pressure;
            let temperature = config.initial_temperature;
            let any_thermal = composition.layers().iter().any(|layer| {
                layer.material.melting_curve(pressure).is_finite()
                    || layer
                        .material
                        .thermal_conductivity(pressure, temperature)
                        .is_finite()
            });
            if !any_thermal {
                warn!("thermal solve requested but no layer has thermal properties");
            }
        }

        Ok(Self {
            composition,
            config,
            equations: PhantomData,
        })
    }

    pub fn composition(&self) -> &Composition<'m> {
        &self.composition
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Iterate on the central pressure until the surface pressure matches
    /// the configured target.
    pub fn solve(&self) -> Result<Structure<'m, N>, InteriorError> {
        let target = self.config.surface_pressure;
        let tolerance = self.config.tolerance();
        let mut central_pressure = self.config.initial_pressure;
        let mut residual = f64::NAN;

        for attempt in 1..=self.config.max_attempts {
            debug!(attempt, central_pressure, "starting attempt");
            let outcome =
                Attempt::<E, N>::new(&self.composition, &self.config, central_pressure).run()?;

            match judge_surface(
                central_pressure,
                outcome.surface[PRESSURE],
                target,
                tolerance,
                outcome.radius,
            )? {
                Verdict::Converged => {
                    info!(
                        attempts = attempt,
                        central_pressure,
                        radius = outcome.radius,
                        mass = self.composition.cumulative_mass(outcome.outer_layer),
                        transitions = outcome.transitions.len(),
                        "central pressure converged"
                    );
                    return Ok(outcome.into_structure(
                        &self.composition,
                        &self.config,
                        central_pressure,
                        attempt,
                        E::THERMAL,
                    ));
                }
                Verdict::Restart {
                    central_pressure: corrected,
                    residual: latest,
                } => {
                    debug!(
                        attempt,
                        residual = latest,
                        corrected,
                        "surface pressure off target"
                    );
                    residual = latest;
                    central_pressure = corrected;
                }
            }
        }

        Err(InteriorError::DidNotConverge {
            attempts: self.config.max_attempts,
            residual,
        })
    }
}

/// Where a single attempt stands.
#[derive(Debug, Clone, Copy, PartialEq)]
enum AttemptState<const N: usize> {
    Initializing,
    IntegratingLayer,
    LayerBoundaryFound {
        radius: f64,
        state: State<N>,
    },
    RegimeSwitchFound {
        radius: f64,
        state: State<N>,
        convective: bool,
    },
    PhaseSwitchFound {
        radius: f64,
        state: State<N>,
        from: PhaseId,
        to: PhaseId,
    },
    SurfaceCandidateFound {
        radius: f64,
        state: State<N>,
        degraded: bool,
    },
}

/// One outward integration for a fixed central pressure.
struct Attempt<'a, 'm, E, const N: usize> {
    composition: &'a Composition<'m>,
    config: &'a Configuration,
    central_pressure: f64,
    layer: usize,
    segments: Vec<Segment<'m, N>>,
    boundaries: Vec<f64>,
    transitions: Vec<Transition>,
    equations: PhantomData<E>,
}

/// The finished profile of one attempt.
struct AttemptOutcome<'m, const N: usize> {
    outer_layer: usize,
    segments: Vec<Segment<'m, N>>,
    boundaries: Vec<f64>,
    transitions: Vec<Transition>,
    radius: f64,
    surface: State<N>,
    degraded: bool,
}

impl<'m, const N: usize> AttemptOutcome<'m, N> {
    fn into_structure(
        self,
        composition: &Composition<'m>,
        config: &Configuration,
        central_pressure: f64,
        attempts: usize,
        thermal: bool,
    ) -> Structure<'m, N> {
        Structure {
            layers: composition.layers().to_vec(),
            outer_layer: self.outer_layer,
            segments: self.segments,
            boundaries: self.boundaries,
            transitions: self.transitions,
            surface: self.surface,
            central_pressure,
            config: config.clone(),
            temperature_index: thermal.then_some(TEMPERATURE),
            attempts,
            degraded: self.degraded,
        }
    }
}

impl<'a, 'm, E, const N: usize> Attempt<'a, 'm, E, N>
where
    E: Equations<N>,
{
    fn new(
        composition: &'a Composition<'m>,
        config: &'a Configuration,
        central_pressure: f64,
    ) -> Self {
        Self {
            composition,
            config,
            central_pressure,
            layer: 0,
            segments: Vec::new(),
            boundaries: Vec::new(),
            transitions: Vec::new(),
            equations: PhantomData,
        }
    }

    fn run(mut self) -> Result<AttemptOutcome<'m, N>, InteriorError> {
        let mut state = AttemptState::Initializing;
        loop {
            state = match state {
                AttemptState::Initializing => self.initialize()?,
                AttemptState::IntegratingLayer => self.advance()?,
                AttemptState::LayerBoundaryFound { radius, state } => {
                    self.cross_layer_boundary(radius, state)?
                }
                AttemptState::RegimeSwitchFound {
                    radius,
                    state,
                    convective,
                } => self.switch_regime(radius, state, convective)?,
                AttemptState::PhaseSwitchFound {
                    radius,
                    state,
                    from,
                    to,
                } => self.switch_phase(radius, state, from, to)?,
                AttemptState::SurfaceCandidateFound {
                    radius,
                    state,
                    degraded,
                } => return Ok(self.finish(radius, state, degraded)),
            };
        }
    }

    fn initialize(&mut self) -> Result<AttemptState<N>, InteriorError> {
        let center = E::central_state(self.central_pressure, self.config);
        self.layer = 0;
        self.segments.clear();
        self.boundaries.clear();
        self.transitions.clear();

        let (convective, phase) = self.regime_and_phase(0, &center);
        self.open_segment(0.0, center, convective, phase, None)?;
        debug!(
            central_pressure = self.central_pressure,
            convective,
            phase = phase.index(),
            "integration seeded at the center"
        );
        Ok(AttemptState::IntegratingLayer)
    }

    /// Take one step in the active segment and look for events.
    fn advance(&mut self) -> Result<AttemptState<N>, InteriorError> {
        let Some(segment) = self.segments.last_mut() else {
            return Ok(AttemptState::Initializing);
        };

        let environment = segment.environment(self.config, E::THERMAL);
        let rhs = |radius: f64, state: &State<N>| E::derivatives(radius, state, &environment);

        let before = segment.engine.current_point();
        let status = segment.engine.step(&rhs);
        let (radius, state) = segment.engine.current_state();

        if radius != before {
            segment.engine.save_dense_output();

            let pressure = state[PRESSURE];
            let layer_mass_limit = self.composition.cumulative_mass(segment.layer);
            let probe = StepProbe {
                enclosed_mass: state[MASS],
                layer_mass_limit,
                thermal: E::THERMAL,
                convective: segment.convective,
                temperature: E::temperature(&state, self.config),
                melting_temperature: segment.material.melting_curve(pressure),
                phase: segment.phase,
                current_phase: segment.material.phase(pressure),
            };
            if let Some(trigger) = detect_trigger(&probe) {
                return Ok(locate_trigger::<E, N>(
                    segment,
                    trigger,
                    layer_mass_limit,
                    self.config,
                ));
            }
        }

        if status != Status::Processing {
            warn!(
                radius,
                layer = self.layer,
                ?status,
                "integration stopped before the outer layer was complete, taking the surface here"
            );
            return Ok(AttemptState::SurfaceCandidateFound {
                radius,
                state,
                degraded: true,
            });
        }
        Ok(AttemptState::IntegratingLayer)
    }

    fn cross_layer_boundary(
        &mut self,
        radius: f64,
        state: State<N>,
    ) -> Result<AttemptState<N>, InteriorError> {
        if self.layer + 1 >= self.composition.len() {
            return Ok(AttemptState::SurfaceCandidateFound {
                radius,
                state,
                degraded: false,
            });
        }

        self.record(TransitionKind::Layer, radius)?;
        self.layer += 1;
        let (convective, phase) = self.regime_and_phase(self.layer, &state);
        debug!(
            radius,
            layer = self.layer,
            material = self.composition.layers()[self.layer].material.name(),
            convective,
            "entering layer"
        );
        let carried = self.carried_step();
        self.open_segment(radius, state, convective, phase, carried)?;
        Ok(AttemptState::IntegratingLayer)
    }

    fn switch_regime(
        &mut self,
        radius: f64,
        state: State<N>,
        convective: bool,
    ) -> Result<AttemptState<N>, InteriorError> {
        self.record(TransitionKind::Regime { convective }, radius)?;
        let phase = self.segments.last().map_or(PhaseId(0), |segment| segment.phase);
        debug!(radius, layer = self.layer, convective, "heat transport regime switched");
        let carried = self.carried_step();
        self.open_segment(radius, state, convective, phase, carried)?;
        Ok(AttemptState::IntegratingLayer)
    }

    fn switch_phase(
        &mut self,
        radius: f64,
        state: State<N>,
        from: PhaseId,
        to: PhaseId,
    ) -> Result<AttemptState<N>, InteriorError> {
        self.record(TransitionKind::Phase { from, to }, radius)?;
        let convective = self.segments.last().is_some_and(|segment| segment.convective);
        debug!(
            radius,
            layer = self.layer,
            from = from.index(),
            to = to.index(),
            "phase changed"
        );
        let carried = self.carried_step();
        self.open_segment(radius, state, convective, to, carried)?;
        Ok(AttemptState::IntegratingLayer)
    }

    fn finish(mut self, radius: f64, state: State<N>, degraded: bool) -> AttemptOutcome<'m, N> {
        self.boundaries.push(radius);
        AttemptOutcome {
            outer_layer: self.layer,
            segments: self.segments,
            boundaries: self.boundaries,
            transitions: self.transitions,
            radius,
            surface: state,
            degraded,
        }
    }

    /// Heat transport regime and phase for a segment of `layer` seeded
    /// with `state`.
    fn regime_and_phase(&self, layer: usize, state: &State<N>) -> (bool, PhaseId) {
        let material = self.composition.layers()[layer].material;
        let pressure = state[PRESSURE];
        let temperature = E::temperature(state, self.config);
        let convective = E::THERMAL && material.melting_curve(pressure) < temperature;
        (convective, material.phase(pressure))
    }

    fn carried_step(&self) -> Option<f64> {
        self.segments
            .last()
            .map(|segment| segment.engine.next_step())
    }

    fn record(&mut self, kind: TransitionKind, radius: f64) -> Result<(), InteriorError> {
        self.transitions.push(Transition {
            kind,
            radius,
            layer: self.layer,
        });
        if self.transitions.len() > self.config.max_transitions {
            return Err(InteriorError::TooManyTransitions {
                limit: self.config.max_transitions,
            });
        }
        Ok(())
    }

    fn open_segment(
        &mut self,
        start: f64,
        initial: State<N>,
        convective: bool,
        phase: PhaseId,
        carried_step: Option<f64>,
    ) -> Result<(), InteriorError> {
        let material = self.composition.layers()[self.layer].material;
        let mut segment = Segment {
            layer: self.layer,
            material,
            convective,
            phase,
            start,
            engine: DormandPrince::new(self.config.tolerances()),
        };

        let environment = segment.environment(self.config, E::THERMAL);
        let rhs = |radius: f64, state: &State<N>| E::derivatives(radius, state, &environment);
        let end = self.config.max_radius.max(start);
        segment.engine.init(&rhs, initial, start, end)?;
        if let Some(step) = carried_step.filter(|step| step.is_finite() && *step > 0.0) {
            segment.engine.set_next_step(step)?;
        }

        self.boundaries.push(start);
        self.segments.push(segment);
        Ok(())
    }
}

/// Find where inside the last accepted step `trigger` happened.
fn locate_trigger<E, const N: usize>(
    segment: &Segment<'_, N>,
    trigger: Trigger,
    layer_mass_limit: f64,
    config: &Configuration,
) -> AttemptState<N>
where
    E: Equations<N>,
{
    let (point, current) = segment.engine.current_state();
    let Some(block) = segment.engine.current_block() else {
        return AttemptState::SurfaceCandidateFound {
            radius: point,
            state: current,
            degraded: true,
        };
    };
    let (low, high) = (block.start(), block.end());
    let material = segment.material;

    let radius = match trigger {
        Trigger::LayerBoundary => {
            locate_root(|r| block.evaluate(r)[MASS], layer_mass_limit, low, high)
        }
        Trigger::RegimeSwitch { .. } => locate_root(
            |r| {
                let state = block.evaluate(r);
                E::temperature(&state, config) - material.melting_curve(state[PRESSURE])
            },
            0.0,
            low,
            high,
        ),
        Trigger::PhaseSwitch { from, to } => locate_root(
            |r| material.phase(block.evaluate(r)[PRESSURE]).index() as f64,
            0.5 * (from.index() + to.index()) as f64,
            low,
            high,
        ),
    };
    let state = segment
        .engine
        .evaluate(radius)
        .unwrap_or_else(|| block.evaluate(radius));

    match trigger {
        Trigger::LayerBoundary => AttemptState::LayerBoundaryFound { radius, state },
        Trigger::RegimeSwitch { convective } => AttemptState::RegimeSwitchFound {
            radius,
            state,
            convective,
        },
        Trigger::PhaseSwitch { from, to } => AttemptState::PhaseSwitchFound {
            radius,
            state,
            from,
            to,
        },
    }
}
