use serde::{Deserialize, Serialize};
use std::ops::{Div, Mul};

/// Volume density in kg/m³.
///
/// Typical uncompressed densities of planet-building materials:
/// - Iron (α): ~7860 kg/m³
/// - Perovskite: ~4100 kg/m³
/// - Ice VII: ~1460 kg/m³
///
/// # Examples
///
/// ```rust
/// use units::Density;
///
/// let iron = Density::from_grams_per_cm3(7.86);
/// assert!((iron.to_kg_per_m3() - 7860.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Density(f64); // Base unit: kg/m³

impl Density {
    pub fn from_kg_per_m3(value: f64) -> Self {
        Self(value)
    }

    /// 1 g/cm³ = 1000 kg/m³
    pub fn from_grams_per_cm3(value: f64) -> Self {
        Self(value * 1000.0)
    }

    pub fn to_kg_per_m3(&self) -> f64 {
        self.0
    }

    pub fn to_grams_per_cm3(&self) -> f64 {
        self.0 / 1000.0
    }
}

impl Mul<f64> for Density {
    type Output = Density;

    fn mul(self, rhs: f64) -> Density {
        Density(self.0 * rhs)
    }
}

/// Ratio of two densities (e.g. compression η = ρ/ρ₀)
impl Div for Density {
    type Output = f64;

    fn div(self, rhs: Density) -> f64 {
        self.0 / rhs.0
    }
}
