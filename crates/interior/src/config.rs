//! Solver configuration

use numerics::Tolerances;
use serde::{Deserialize, Serialize};
use units::{Length, Pressure, Temperature};

use crate::error::ConfigurationError;

/// Options for a structure solve. All values are SI.
///
/// Missing keys fall back to the defaults when deserializing:
///
/// ```
/// use interior::Configuration;
///
/// let config: Configuration =
///     serde_json::from_str(r#"{ "errorExponent": 4.0, "surfacePressure": 0.0 }"#).unwrap();
///
/// assert_eq!(config.error_exponent, 4.0);
/// assert_eq!(config.initial_pressure, 1e14);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Configuration {
    /// Tolerance exponent: the surface pressure must match to within
    /// `10^-error_exponent` Pa, and the integrator uses the same number as
    /// its relative and absolute tolerance.
    pub error_exponent: f64,
    /// Outer edge of the integration domain (m).
    pub max_radius: f64,
    /// First guess for the central pressure (Pa).
    pub initial_pressure: f64,
    /// Pressure the surface must reach (Pa).
    pub surface_pressure: f64,
    /// Apply the Tolman-Oppenheimer-Volkoff correction to dP/dr.
    pub enable_relativity: bool,
    /// Central temperature (K); the uniform temperature of isothermal models.
    pub initial_temperature: f64,
    /// Heat flux at the center (W/m²).
    pub endogenous_heat_flux: f64,
    /// Specific internal heating (W/kg).
    pub heat_generation_rate: f64,
    /// Central-pressure corrections allowed before giving up.
    pub max_attempts: usize,
    /// Layer, regime and phase transitions allowed within one attempt.
    pub max_transitions: usize,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            error_exponent: 1.8,
            max_radius: Length::from_jupiter_radii(8.0).to_m(),
            initial_pressure: 1e14,
            surface_pressure: Pressure::from_atm(1.0).to_pascals(),
            enable_relativity: false,
            initial_temperature: 0.0,
            endogenous_heat_flux: 0.0,
            heat_generation_rate: 0.0,
            max_attempts: 100,
            max_transitions: 1000,
        }
    }
}

impl Configuration {
    pub fn with_error_exponent(mut self, error_exponent: f64) -> Self {
        self.error_exponent = error_exponent;
        self
    }

    pub fn with_max_radius(mut self, max_radius: Length) -> Self {
        self.max_radius = max_radius.to_m();
        self
    }

    pub fn with_initial_pressure(mut self, pressure: Pressure) -> Self {
        self.initial_pressure = pressure.to_pascals();
        self
    }

    pub fn with_surface_pressure(mut self, pressure: Pressure) -> Self {
        self.surface_pressure = pressure.to_pascals();
        self
    }

    pub fn with_relativity(mut self, enabled: bool) -> Self {
        self.enable_relativity = enabled;
        self
    }

    pub fn with_initial_temperature(mut self, temperature: Temperature) -> Self {
        self.initial_temperature = temperature.to_kelvin();
        self
    }

    pub fn with_endogenous_heat_flux(mut self, heat_flux: f64) -> Self {
        self.endogenous_heat_flux = heat_flux;
        self
    }

    pub fn with_heat_generation_rate(mut self, rate: f64) -> Self {
        self.heat_generation_rate = rate;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_max_transitions(mut self, max_transitions: usize) -> Self {
        self.max_transitions = max_transitions;
        self
    }

    /// Surface pressure convergence tolerance, `10^-error_exponent` Pa.
    pub fn tolerance(&self) -> f64 {
        10f64.powf(-self.error_exponent)
    }

    /// Integrator tolerances derived from the error exponent.
    pub fn tolerances(&self) -> Tolerances {
        Tolerances::from_exponent(self.error_exponent)
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        fn invalid(name: &'static str, reason: &str) -> ConfigurationError {
            ConfigurationError::InvalidParameter {
                name,
                reason: reason.to_string(),
            }
        }

        if !self.error_exponent.is_finite() {
            return Err(invalid("errorExponent", "must be finite"));
        }
        if !(self.max_radius.is_finite() && self.max_radius > 0.0) {
            return Err(invalid("maxRadius", "must be positive and finite"));
        }
        if !(self.initial_pressure.is_finite() && self.initial_pressure > 0.0) {
            return Err(invalid("initialPressure", "must be positive and finite"));
        }
        if !(self.surface_pressure.is_finite() && self.surface_pressure >= 0.0) {
            return Err(invalid("surfacePressure", "must be non-negative and finite"));
        }
        if !(self.initial_temperature.is_finite() && self.initial_temperature >= 0.0) {
            return Err(invalid("initialTemperature", "must be non-negative and finite"));
        }
        if !self.endogenous_heat_flux.is_finite() {
            return Err(invalid("endogenousHeatFlux", "must be finite"));
        }
        if !self.heat_generation_rate.is_finite() {
            return Err(invalid("heatGenerationRate", "must be finite"));
        }
        if self.max_attempts == 0 {
            return Err(invalid("maxAttempts", "at least one attempt is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert_eq!(config.error_exponent, 1.8);
        assert_relative_eq!(config.max_radius, 8.0 * 7.1492e7);
        assert_eq!(config.surface_pressure, 101_325.0);
        assert!(!config.enable_relativity);
        assert_eq!(config.max_attempts, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_tolerance_follows_exponent() {
        let config = Configuration::default().with_error_exponent(3.0);
        assert_relative_eq!(config.tolerance(), 1e-3);
        assert_eq!(config.tolerances(), Tolerances::new(1e-3, 1e-3));
    }

    #[test]
    fn test_builders_take_units() {
        let config = Configuration::default()
            .with_max_radius(Length::from_earth_radii(2.0))
            .with_initial_pressure(Pressure::from_gpa(300.0))
            .with_surface_pressure(Pressure::from_bar(1.0))
            .with_initial_temperature(Temperature::from_celsius(1000.0));

        assert_relative_eq!(config.max_radius, 2.0 * 6.371e6);
        assert_relative_eq!(config.initial_temperature, 1273.15, epsilon = 1e-9);
        assert_relative_eq!(config.initial_pressure, 3.0e11);
        assert_relative_eq!(config.surface_pressure, 1.0e5);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let cases = [
            Configuration::default().with_error_exponent(f64::NAN),
            Configuration::default().with_max_radius(Length::from_meters(-1.0)),
            Configuration::default().with_initial_pressure(Pressure::from_pascals(0.0)),
            Configuration::default().with_surface_pressure(Pressure::from_pascals(-1.0)),
            Configuration::default().with_initial_temperature(Temperature::from_kelvin(-5.0)),
            Configuration::default().with_heat_generation_rate(f64::INFINITY),
            Configuration::default().with_max_attempts(0),
        ];
        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(ConfigurationError::InvalidParameter { .. })
            ));
        }
    }

    #[test]
    fn test_serde_uses_camel_case_and_defaults() {
        let json = serde_json::to_value(Configuration::default()).unwrap();
        assert!(json.get("errorExponent").is_some());
        assert!(json.get("enableRelativity").is_some());

        let config: Configuration =
            serde_json::from_str(r#"{ "enableRelativity": true, "maxAttempts": 7 }"#).unwrap();
        assert!(config.enable_relativity);
        assert_eq!(config.max_attempts, 7);
        assert_eq!(config.error_exponent, 1.8);
    }
}
