//! Error types for interior structure solving

use numerics::IntegrationError;
use thiserror::Error;

/// Problems with the inputs, detected before any integration starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("{masses} layer masses were given for {materials} materials")]
    LengthMismatch { masses: usize, materials: usize },

    #[error("composition has no layers")]
    EmptyComposition,

    #[error("layer {index} has a non-positive or non-finite mass ({mass} kg)")]
    NonPositiveMass { index: usize, mass: f64 },

    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InteriorError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("radius {radius} m lies outside the body (surface at {surface} m)")]
    RadiusOutOfRange { radius: f64, surface: f64 },

    #[error(
        "central pressure did not converge in {attempts} attempts (surface residual {residual} Pa)"
    )]
    DidNotConverge { attempts: usize, residual: f64 },

    #[error("integrated surface pressure is not finite at r = {radius} m")]
    NonFinitePressure { radius: f64 },

    #[error("more than {limit} transitions located in a single attempt")]
    TooManyTransitions { limit: usize },

    #[error(transparent)]
    Integration(#[from] IntegrationError),
}
