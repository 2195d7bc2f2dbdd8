use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Mass of the Earth in kilograms (5.972 × 10²⁴ kg)
pub const EARTH_MASS_KG: f64 = 5.972e24;

/// Mass of Jupiter in kilograms (1.898 × 10²⁷ kg)
pub const JUPITER_MASS_KG: f64 = 1.898e27;

/// Mass of the Sun in kilograms (1.98847 × 10³⁰ kg)
pub const SOLAR_MASS_KG: f64 = 1.98847e30;

/// A mass quantity stored in kilograms.
///
/// Layer masses handed to the structure solver are plain kilograms; this type
/// is what the solver hands back so callers can read results in whichever
/// astronomical unit is convenient.
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let earth = Mass::from_earth_masses(1.0);
/// let jupiter = Mass::from_jupiter_masses(1.0);
///
/// assert!(jupiter.to_earth_masses() > 300.0);
/// assert_eq!(earth.to_kg(), units::EARTH_MASS_KG);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: kg

impl Mass {
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// Creates a new `Mass` from a value in kilograms.
    pub fn from_kg(value: f64) -> Self {
        Self(value)
    }

    pub fn from_grams(value: f64) -> Self {
        Self(value / 1000.0)
    }

    /// Creates a new `Mass` from a value in Earth masses.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use units::Mass;
    ///
    /// let super_earth = Mass::from_earth_masses(5.0);
    /// assert!(super_earth.to_kg() > 2.9e25);
    /// ```
    pub fn from_earth_masses(value: f64) -> Self {
        Self(value * EARTH_MASS_KG)
    }

    pub fn from_jupiter_masses(value: f64) -> Self {
        Self(value * JUPITER_MASS_KG)
    }

    pub fn from_solar_masses(value: f64) -> Self {
        Self(value * SOLAR_MASS_KG)
    }

    /// Returns the mass in kilograms.
    pub fn to_kg(&self) -> f64 {
        self.0
    }

    pub fn to_grams(&self) -> f64 {
        self.0 * 1000.0
    }

    pub fn to_earth_masses(&self) -> f64 {
        self.0 / EARTH_MASS_KG
    }

    pub fn to_jupiter_masses(&self) -> f64 {
        self.0 / JUPITER_MASS_KG
    }

    pub fn to_solar_masses(&self) -> f64 {
        self.0 / SOLAR_MASS_KG
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl Sub for Mass {
    type Output = Mass;

    fn sub(self, rhs: Mass) -> Mass {
        Mass(self.0 - rhs.0)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}

impl Div<f64> for Mass {
    type Output = Mass;

    fn div(self, rhs: f64) -> Mass {
        Mass(self.0 / rhs)
    }
}

/// Mass over mass is a dimensionless ratio
impl Div for Mass {
    type Output = f64;

    fn div(self, rhs: Mass) -> f64 {
        self.0 / rhs.0
    }
}

impl Mul<Mass> for f64 {
    type Output = Mass;

    fn mul(self, rhs: Mass) -> Mass {
        rhs * self
    }
}
