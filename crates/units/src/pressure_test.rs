use approx::assert_relative_eq;

use crate::pressure::{Pressure, STANDARD_ATMOSPHERE_PA};

#[test]
fn test_pressure_conversions() {
    let core = Pressure::from_gpa(364.0);
    assert_relative_eq!(core.to_pascals(), 3.64e11);
    assert_relative_eq!(core.to_gpa(), 364.0);

    let surface = Pressure::from_atm(1.0);
    assert_relative_eq!(surface.to_pascals(), STANDARD_ATMOSPHERE_PA);
    assert_relative_eq!(surface.to_bar(), 1.01325);
    assert_relative_eq!(Pressure::from_bar(1.01325).to_atm(), 1.0);

    // 1 TPa is 10¹³ dyn/cm², the Thomas-Fermi-Dirac regime
    let tpa = Pressure::from_dyn_per_cm2(1.0e13);
    assert_relative_eq!(tpa.to_gpa(), 1000.0);
    assert_relative_eq!(tpa.to_dyn_per_cm2(), 1.0e13);
}

#[test]
fn test_pressure_arithmetic() {
    let a = Pressure::from_bar(3.0);
    let b = Pressure::from_bar(1.0);

    assert_relative_eq!((a + b).to_bar(), 4.0);
    assert_relative_eq!((a - b).to_bar(), 2.0);
    assert_relative_eq!((b * 10.0).to_bar(), 10.0);
    assert_eq!(Pressure::zero().to_pascals(), 0.0);
}
