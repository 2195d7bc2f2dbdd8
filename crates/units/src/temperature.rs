use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

const CELSIUS_OFFSET: f64 = 273.15;

/// An absolute temperature in Kelvin.
///
/// Interior temperatures are compared against melting curves to decide
/// between conductive and convective heat transport, so only the absolute
/// scale is meaningful here.
///
/// # Examples
///
/// ```rust
/// use units::Temperature;
///
/// let core = Temperature::from_kelvin(5200.0);
/// assert!(core.to_celsius() > 4900.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Temperature(f64); // Base unit: Kelvin

impl Temperature {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_kelvin(value: f64) -> Self {
        Self(value)
    }

    pub fn from_celsius(value: f64) -> Self {
        Self(value + CELSIUS_OFFSET)
    }

    pub fn to_kelvin(&self) -> f64 {
        self.0
    }

    pub fn to_celsius(&self) -> f64 {
        self.0 - CELSIUS_OFFSET
    }
}

impl Add for Temperature {
    type Output = Temperature;

    fn add(self, rhs: Temperature) -> Temperature {
        Temperature(self.0 + rhs.0)
    }
}

impl Sub for Temperature {
    type Output = Temperature;

    fn sub(self, rhs: Temperature) -> Temperature {
        Temperature(self.0 - rhs.0)
    }
}

impl Mul<f64> for Temperature {
    type Output = Temperature;

    fn mul(self, rhs: f64) -> Temperature {
        Temperature(self.0 * rhs)
    }
}
