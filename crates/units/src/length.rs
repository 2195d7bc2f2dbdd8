use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Mean radius of the Earth in meters
pub const EARTH_RADIUS_M: f64 = 6.371e6;

/// Equatorial radius of Jupiter in meters
pub const JUPITER_RADIUS_M: f64 = 7.1492e7;

/// Nominal solar radius in meters
pub const SOLAR_RADIUS_M: f64 = 6.957e8;

/// A length quantity stored in meters.
///
/// Radii inside a body span nine orders of magnitude, from the first
/// integration step near the center to brown-dwarf surfaces, so the
/// conversions cover kilometres as well as planetary and stellar radii.
///
/// # Examples
///
/// ```rust
/// use units::Length;
///
/// let r = Length::from_earth_radii(1.0);
/// assert_eq!(r.to_km(), 6371.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Length(f64); // Base unit: m

impl Length {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_meters(value: f64) -> Self {
        Self(value)
    }

    pub fn from_km(value: f64) -> Self {
        Self(value * 1000.0)
    }

    pub fn from_earth_radii(value: f64) -> Self {
        Self(value * EARTH_RADIUS_M)
    }

    pub fn from_jupiter_radii(value: f64) -> Self {
        Self(value * JUPITER_RADIUS_M)
    }

    pub fn from_solar_radii(value: f64) -> Self {
        Self(value * SOLAR_RADIUS_M)
    }

    pub fn to_m(&self) -> f64 {
        self.0
    }

    pub fn to_km(&self) -> f64 {
        self.0 / 1000.0
    }

    pub fn to_earth_radii(&self) -> f64 {
        self.0 / EARTH_RADIUS_M
    }

    pub fn to_jupiter_radii(&self) -> f64 {
        self.0 / JUPITER_RADIUS_M
    }

    pub fn to_solar_radii(&self) -> f64 {
        self.0 / SOLAR_RADIUS_M
    }

    pub fn min(self, other: Self) -> Self {
        if self.0 < other.0 {
            self
        } else {
            other
        }
    }

    pub fn max(self, other: Self) -> Self {
        if self.0 > other.0 {
            self
        } else {
            other
        }
    }

    pub fn powi(&self, n: i32) -> f64 {
        self.0.powi(n)
    }
}

impl Add for Length {
    type Output = Length;

    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl Sub for Length {
    type Output = Length;

    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl Mul<f64> for Length {
    type Output = Length;

    fn mul(self, rhs: f64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<f64> for Length {
    type Output = Length;

    fn div(self, rhs: f64) -> Length {
        Length(self.0 / rhs)
    }
}

impl Div for Length {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

impl Mul<Length> for f64 {
    type Output = Length;

    fn mul(self, rhs: Length) -> Length {
        rhs * self
    }
}
