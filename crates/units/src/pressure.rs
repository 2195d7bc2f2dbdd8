use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// One standard atmosphere in pascals
pub const STANDARD_ATMOSPHERE_PA: f64 = 101_325.0;

/// Pressure in pascals (N/m²)
///
/// Central pressures of rocky planets sit around 10¹¹ Pa and those of brown
/// dwarfs well above 10¹⁵ Pa, while surface boundary conditions are a few
/// bar at most; `from_gpa` and `from_bar` cover both ends.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Pressure(f64); // Base unit: Pa

impl Pressure {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_pascals(value: f64) -> Self {
        Self(value)
    }

    pub fn from_gpa(value: f64) -> Self {
        Self(value * 1.0e9)
    }

    pub fn from_bar(value: f64) -> Self {
        Self(value * 1.0e5)
    }

    pub fn from_atm(value: f64) -> Self {
        Self(value * STANDARD_ATMOSPHERE_PA)
    }

    /// CGS pressure, 1 dyn/cm² = 0.1 Pa
    pub fn from_dyn_per_cm2(value: f64) -> Self {
        Self(value * 0.1)
    }

    pub fn to_pascals(&self) -> f64 {
        self.0
    }

    pub fn to_gpa(&self) -> f64 {
        self.0 / 1.0e9
    }

    pub fn to_bar(&self) -> f64 {
        self.0 / 1.0e5
    }

    pub fn to_atm(&self) -> f64 {
        self.0 / STANDARD_ATMOSPHERE_PA
    }

    pub fn to_dyn_per_cm2(&self) -> f64 {
        self.0 * 10.0
    }
}

impl Add for Pressure {
    type Output = Pressure;

    fn add(self, rhs: Pressure) -> Pressure {
        Pressure(self.0 + rhs.0)
    }
}

impl Sub for Pressure {
    type Output = Pressure;

    fn sub(self, rhs: Pressure) -> Pressure {
        Pressure(self.0 - rhs.0)
    }
}

impl Mul<f64> for Pressure {
    type Output = Pressure;

    fn mul(self, rhs: f64) -> Pressure {
        Pressure(self.0 * rhs)
    }
}
