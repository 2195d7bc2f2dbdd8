/// Gravitational constant (m³/(kg·s²))
pub const G: f64 = 6.674_30e-11;

/// Speed of light in vacuum (m/s)
pub const C: f64 = 299_792_458.0;

/// Conventional 1 bar surface of a gas giant (Pa)
pub const GAS_GIANT_SURFACE_PRESSURE: f64 = 100_000.0;

/// Pi
pub const PI: f64 = std::f64::consts::PI;
