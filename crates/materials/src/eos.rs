//! Pressure-density equations of state
//!
//! Every model maps a pressure in Pa to a density in kg/m³. The two
//! cold-compression fits ([`BirchMurnaghan`], [`RoseVinet`]) are written as
//! P(ρ) and inverted numerically; the others are explicit in ρ(P).

use serde::{Deserialize, Serialize};
use units::{Density, Pressure};

use numerics::newton;

const NEWTON_TOLERANCE: f64 = 1e-8;
const NEWTON_MAX_ITERATIONS: usize = 1000;

/// Solve `pressure_of(ρ) = pressure` from the reference density.
/// Returns NaN when the iteration breaks down (e.g. beyond the spinodal at
/// strongly negative pressure), which stops the integrator downstream.
fn invert<F, D>(pressure_of: F, slope: D, pressure: f64, reference_density: f64) -> f64
where
    F: Fn(f64) -> f64,
    D: Fn(f64) -> f64,
{
    newton(
        pressure_of,
        slope,
        pressure,
        reference_density,
        NEWTON_TOLERANCE,
        NEWTON_MAX_ITERATIONS,
    )
    .unwrap_or(f64::NAN)
}

/// Third-order isothermal Birch-Murnaghan equation of state.
///
/// P(η) = 3/2 K0 (η^7/3 − η^5/3) (1 + 3/4 (K0' − 4)(η^2/3 − 1)), η = ρ/ρ0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirchMurnaghan {
    /// K0, Pa
    pub bulk_modulus: f64,
    /// K0', dimensionless
    pub bulk_modulus_derivative: f64,
    /// ρ0, kg/m³
    pub reference_density: f64,
}

impl BirchMurnaghan {
    pub const fn new(bulk_modulus: f64, bulk_modulus_derivative: f64, reference_density: f64) -> Self {
        Self {
            bulk_modulus,
            bulk_modulus_derivative,
            reference_density,
        }
    }

    pub fn pressure(&self, density: f64) -> f64 {
        let eta = density / self.reference_density;
        let correction = 0.75 * (self.bulk_modulus_derivative - 4.0);
        1.5 * self.bulk_modulus
            * (eta.powf(7.0 / 3.0) - eta.powf(5.0 / 3.0))
            * (1.0 + correction * (eta.powf(2.0 / 3.0) - 1.0))
    }

    /// dP/dρ
    pub fn pressure_slope(&self, density: f64) -> f64 {
        let eta = density / self.reference_density;
        let correction = 0.75 * (self.bulk_modulus_derivative - 4.0);
        let compression = eta.powf(7.0 / 3.0) - eta.powf(5.0 / 3.0);
        let compression_slope = 7.0 / 3.0 * eta.powf(4.0 / 3.0) - 5.0 / 3.0 * eta.powf(2.0 / 3.0);
        let bracket = 1.0 + correction * (eta.powf(2.0 / 3.0) - 1.0);
        let bracket_slope = correction * 2.0 / 3.0 * eta.powf(-1.0 / 3.0);

        1.5 * self.bulk_modulus * (compression_slope * bracket + compression * bracket_slope)
            / self.reference_density
    }

    pub fn density(&self, pressure: f64) -> f64 {
        invert(
            |rho| self.pressure(rho),
            |rho| self.pressure_slope(rho),
            pressure,
            self.reference_density,
        )
    }
}

/// Rose-Vinet universal equation of state.
///
/// P(η) = 3 K0 η^2/3 (1 − η^−1/3) exp(3/2 (K0' − 1)(1 − η^−1/3))
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoseVinet {
    pub bulk_modulus: f64,
    pub bulk_modulus_derivative: f64,
    pub reference_density: f64,
}

impl RoseVinet {
    pub const fn new(bulk_modulus: f64, bulk_modulus_derivative: f64, reference_density: f64) -> Self {
        Self {
            bulk_modulus,
            bulk_modulus_derivative,
            reference_density,
        }
    }

    pub fn pressure(&self, density: f64) -> f64 {
        let eta = density / self.reference_density;
        let strain = 1.0 - eta.cbrt().recip();
        let stiffening = 1.5 * (self.bulk_modulus_derivative - 1.0);
        3.0 * self.bulk_modulus * eta.powf(2.0 / 3.0) * strain * (stiffening * strain).exp()
    }

    pub fn pressure_slope(&self, density: f64) -> f64 {
        let eta = density / self.reference_density;
        let u = eta.cbrt().recip();
        let strain = 1.0 - u;
        let stiffening = 1.5 * (self.bulk_modulus_derivative - 1.0);
        self.bulk_modulus * (stiffening * strain).exp() * u * (2.0 * strain + u + stiffening * strain * u)
            / self.reference_density
    }

    pub fn density(&self, pressure: f64) -> f64 {
        invert(
            |rho| self.pressure(rho),
            |rho| self.pressure_slope(rho),
            pressure,
            self.reference_density,
        )
    }
}

/// Coefficients of the β2..β5 fits in ε (Salpeter & Zapolsky 1967).
const TFD_GAMMA: [[f64; 5]; 4] = [
    [1.512e-2, 8.955e-2, 1.090e-1, 5.089e+0, -5.980e+0],
    [2.181e-3, -4.015e-1, 1.698e+0, -9.566e+0, 9.873e+0],
    [-3.328e-4, 5.167e-1, -2.369e+0, 1.349e+1, -1.427e+1],
    [-1.384e-2, -6.520e-1, 3.529e+0, -2.095e+1, 2.264e+1],
];

/// Thomas-Fermi-Dirac model for matter at extreme pressure, where the
/// density depends only on the mean atomic weight and atomic number.
/// Inaccurate below roughly 1 TPa, where chemistry dominates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThomasFermiDirac {
    /// A
    pub atomic_weight: f64,
    /// Z
    pub atomic_number: f64,
}

impl ThomasFermiDirac {
    pub const fn new(atomic_weight: f64, atomic_number: f64) -> Self {
        Self {
            atomic_weight,
            atomic_number,
        }
    }

    /// Density in g/cm³ for a pressure in dyn/cm².
    fn density_cgs(&self, pressure: f64) -> f64 {
        let z = self.atomic_number;
        let eps = (3.0 / (32.0 * std::f64::consts::PI.powi(2) * z * z)).cbrt();
        let root_eps = eps.sqrt();
        let phi = 3f64.cbrt() / 20.0 + eps / 4.0;

        let x00 = 1.0 / (8.884e-3 + root_eps * 4.988e-1 + eps * 5.2604e-1);
        let alpha = 1.0 / (1.941e-2 - root_eps * 6.277e-2 + eps * 1.076);

        let mut beta = [0.0; 6];
        beta[0] = x00 * phi - 1.0;
        beta[1] = beta[0] * alpha + (1.0 + beta[0]) / phi;
        for (i, gamma) in TFD_GAMMA.iter().enumerate() {
            let fit = gamma[0]
                + gamma[1] * root_eps
                + gamma[2] * eps
                + gamma[3] * eps * root_eps
                + gamma[4] * eps * eps;
            beta[i + 2] = fit.powi(i as i32 + 2).recip();
        }

        let ksi = (pressure / 9.524e13).powf(0.2) * z.powf(-2.0 / 3.0);
        let series = beta
            .iter()
            .rev()
            .fold(0.0, |acc, coefficient| acc * ksi + coefficient);
        let x0 = (1.0 + (-alpha * ksi).exp() * series) / (ksi + phi);

        3.886 * self.atomic_weight * z / x0.powi(3)
    }

    /// Negative pressures are treated as zero.
    pub fn density(&self, pressure: f64) -> f64 {
        let cgs = Pressure::from_pascals(pressure.max(0.0)).to_dyn_per_cm2();
        Density::from_grams_per_cm3(self.density_cgs(cgs)).to_kg_per_m3()
    }

    /// Zero-pressure limit of the model.
    pub fn reference_density(&self) -> f64 {
        self.density(0.0)
    }
}

/// Fit ρ = ρ0 + c Pⁿ to the merged Vinet/BME and TFD curves
/// (Seager et al. 2007), valid below 1e16 Pa.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExponentialFit {
    pub reference_density: f64,
    /// c, kg m⁻³ Pa⁻ⁿ
    pub coefficient: f64,
    pub exponent: f64,
}

impl ExponentialFit {
    pub const fn new(reference_density: f64, coefficient: f64, exponent: f64) -> Self {
        Self {
            reference_density,
            coefficient,
            exponent,
        }
    }

    /// Negative pressures clamp to the reference density.
    pub fn density(&self, pressure: f64) -> f64 {
        if pressure <= 0.0 {
            return self.reference_density;
        }
        self.reference_density + self.coefficient * pressure.powf(self.exponent)
    }
}

/// ρ = ρ0 + k P. With `slope = 0` this is an incompressible material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinearFit {
    pub reference_density: f64,
    /// k, kg m⁻³ Pa⁻¹
    pub slope: f64,
}

impl LinearFit {
    pub const fn new(reference_density: f64, slope: f64) -> Self {
        Self {
            reference_density,
            slope,
        }
    }

    pub const fn incompressible(density: f64) -> Self {
        Self::new(density, 0.0)
    }

    pub fn density(&self, pressure: f64) -> f64 {
        self.reference_density + self.slope * pressure
    }
}

/// Any of the supported equations of state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "camelCase")]
pub enum Eos {
    BirchMurnaghan(BirchMurnaghan),
    RoseVinet(RoseVinet),
    ThomasFermiDirac(ThomasFermiDirac),
    Exponential(ExponentialFit),
    Linear(LinearFit),
}

impl Eos {
    pub fn density(&self, pressure: f64) -> f64 {
        match self {
            Eos::BirchMurnaghan(eos) => eos.density(pressure),
            Eos::RoseVinet(eos) => eos.density(pressure),
            Eos::ThomasFermiDirac(eos) => eos.density(pressure),
            Eos::Exponential(eos) => eos.density(pressure),
            Eos::Linear(eos) => eos.density(pressure),
        }
    }

    pub fn reference_density(&self) -> f64 {
        match self {
            Eos::BirchMurnaghan(eos) => eos.reference_density,
            Eos::RoseVinet(eos) => eos.reference_density,
            Eos::ThomasFermiDirac(eos) => eos.reference_density(),
            Eos::Exponential(eos) => eos.reference_density,
            Eos::Linear(eos) => eos.reference_density,
        }
    }
}

impl From<BirchMurnaghan> for Eos {
    fn from(eos: BirchMurnaghan) -> Self {
        Eos::BirchMurnaghan(eos)
    }
}

impl From<RoseVinet> for Eos {
    fn from(eos: RoseVinet) -> Self {
        Eos::RoseVinet(eos)
    }
}

impl From<ThomasFermiDirac> for Eos {
    fn from(eos: ThomasFermiDirac) -> Self {
        Eos::ThomasFermiDirac(eos)
    }
}

impl From<ExponentialFit> for Eos {
    fn from(eos: ExponentialFit) -> Self {
        Eos::Exponential(eos)
    }
}

impl From<LinearFit> for Eos {
    fn from(eos: LinearFit) -> Self {
        Eos::Linear(eos)
    }
}
