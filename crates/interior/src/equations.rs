//! Structure equations integrated outward from the center
//!
//! Two state layouts share the hydrostatic core:
//!
//! | index | [`Isothermal`] | [`Thermal`] |
//! |-------|----------------|-------------|
//! | 0 | pressure P (Pa) | pressure P |
//! | 1 | enclosed mass M (kg) | enclosed mass M |
//! | 2 | moment of inertia I (kg m²) | moment of inertia I |
//! | 3 | | heat flux Q (W/m²) |
//! | 4 | | temperature T (K) |

use materials::{Material, PhaseId};
use numerics::State;

use crate::config::Configuration;
use crate::constants::{C, G, PI};

pub const PRESSURE: usize = 0;
pub const MASS: usize = 1;
pub const INERTIA: usize = 2;
pub const HEAT_FLUX: usize = 3;
pub const TEMPERATURE: usize = 4;

/// Everything the right-hand side needs besides radius and state.
#[derive(Debug, Clone, Copy)]
pub struct LayerEnvironment<'m> {
    pub material: &'m dyn Material,
    /// Heat is carried by convection rather than conduction.
    pub convective: bool,
    pub relativity: bool,
    /// W/kg
    pub heat_generation_rate: f64,
    /// Temperature handed to the equation of state by isothermal models.
    pub temperature: f64,
    /// Phase whose equation of state is used regardless of pressure;
    /// `None` follows the material's phase at each pressure.
    pub phase: Option<PhaseId>,
}

impl<'m> LayerEnvironment<'m> {
    pub fn new(material: &'m dyn Material, convective: bool, config: &Configuration) -> Self {
        Self {
            material,
            convective,
            relativity: config.enable_relativity,
            heat_generation_rate: config.heat_generation_rate,
            temperature: config.initial_temperature,
            phase: None,
        }
    }

    pub fn with_phase(mut self, phase: PhaseId) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn density(&self, pressure: f64, temperature: f64) -> f64 {
        match self.phase {
            Some(phase) => self.material.density_in(phase, pressure, temperature),
            None => self.material.density(pressure, temperature),
        }
    }
}

/// A set of structure equations over an `N`-component state.
pub trait Equations<const N: usize> {
    /// Whether the model carries temperature, so that regime and phase
    /// switches are tracked.
    const THERMAL: bool;

    /// State at the center for a given central pressure.
    fn central_state(central_pressure: f64, config: &Configuration) -> State<N>;

    fn temperature(state: &State<N>, config: &Configuration) -> f64;

    fn derivatives(radius: f64, state: &State<N>, environment: &LayerEnvironment<'_>) -> State<N>;
}

/// P, M and I only; the temperature is the configured constant.
#[derive(Debug, Clone, Copy, Default)]
pub struct Isothermal;

/// P, M, I plus heat flux and temperature, with convective or conductive
/// heat transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thermal;

/// g = G M / r², zero where that is not finite (the center).
pub fn gravity(radius: f64, mass: f64) -> f64 {
    let g = G * mass / (radius * radius);
    if g.is_finite() {
        g
    } else {
        0.0
    }
}

/// Tolman-Oppenheimer-Volkoff factor on the Newtonian pressure gradient,
/// 1 where it is not finite.
pub fn relativistic_scale(radius: f64, pressure: f64, mass: f64, density: f64) -> f64 {
    let c2 = C * C;
    let scale = (1.0 + pressure / (density * c2))
        * (1.0 + 4.0 * PI * radius.powi(3) * pressure / (mass * c2))
        / (1.0 - 2.0 * G * mass / (radius * c2));
    if scale.is_finite() {
        scale
    } else {
        1.0
    }
}

/// dP/dr, dM/dr and dI/dr, plus the local gravity.
fn hydrostatic(
    radius: f64,
    pressure: f64,
    mass: f64,
    density: f64,
    relativity: bool,
) -> ([f64; 3], f64) {
    let g = gravity(radius, mass);
    let scale = if relativity {
        relativistic_scale(radius, pressure, mass, density)
    } else {
        1.0
    };
    let r2 = radius * radius;

    (
        [
            -g * density * scale,
            4.0 * PI * r2 * density,
            8.0 / 3.0 * PI * r2 * r2 * density,
        ],
        g,
    )
}

impl Equations<3> for Isothermal {
    const THERMAL: bool = false;

    fn central_state(central_pressure: f64, _config: &Configuration) -> State<3> {
        State::<3>::new(central_pressure, 0.0, 0.0)
    }

    fn temperature(_state: &State<3>, config: &Configuration) -> f64 {
        config.initial_temperature
    }

    fn derivatives(radius: f64, state: &State<3>, environment: &LayerEnvironment<'_>) -> State<3> {
        let pressure = state[PRESSURE];
        let density = environment.density(pressure, environment.temperature);
        let ([dp, dm, di], _) = hydrostatic(
            radius,
            pressure,
            state[MASS],
            density,
            environment.relativity,
        );
        State::<3>::new(dp, dm, di)
    }
}

impl Equations<5> for Thermal {
    const THERMAL: bool = true;

    fn central_state(central_pressure: f64, config: &Configuration) -> State<5> {
        State::<5>::new(
            central_pressure,
            0.0,
            0.0,
            config.endogenous_heat_flux,
            config.initial_temperature,
        )
    }

    fn temperature(state: &State<5>, _config: &Configuration) -> f64 {
        state[TEMPERATURE]
    }

    fn derivatives(radius: f64, state: &State<5>, environment: &LayerEnvironment<'_>) -> State<5> {
        let material = environment.material;
        let pressure = state[PRESSURE];
        let heat_flux = state[HEAT_FLUX];
        let temperature = state[TEMPERATURE];

        let density = environment.density(pressure, temperature);
        let ([dp, dm, di], g) = hydrostatic(
            radius,
            pressure,
            state[MASS],
            density,
            environment.relativity,
        );

        let mut dilution = 2.0 * heat_flux / radius;
        if !dilution.is_finite() {
            dilution = 0.0;
        }
        let dq = density * environment.heat_generation_rate - dilution;

        let dt = if environment.convective {
            -material.thermal_expansion(pressure, temperature) * g * temperature
                / material.specific_heat_capacity(pressure, temperature)
        } else {
            -heat_flux / material.thermal_conductivity(pressure, temperature)
        };

        State::<5>::new(dp, dm, di, dq, dt)
    }
}
