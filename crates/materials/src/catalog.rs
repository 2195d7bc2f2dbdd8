//! Published equation-of-state parameters
//!
//! Birch-Murnaghan and Vinet fits, the exponential fits of Seager et al.
//! (2007) and the Thomas-Fermi-Dirac (A, Z) table of Salpeter & Zapolsky
//! (1967). Densities in kg/m³, moduli in Pa.

use crate::eos::{BirchMurnaghan, ExponentialFit, RoseVinet, ThomasFermiDirac};
use crate::substance::Substance;

// Vinet (V) and Birch-Murnaghan (BME) fits: K0, K0', ρ0
pub const GRAPHITE_BME: BirchMurnaghan = BirchMurnaghan::new(33.8e9, 8.90, 2.25e3);
pub const IRON_ALPHA_BME: BirchMurnaghan = BirchMurnaghan::new(162.5e9, 5.50, 7.86e3);
pub const IRON_EPSILON_VINET: RoseVinet = RoseVinet::new(156.2e9, 6.08, 8.30e3);
pub const TROILITE_BME: BirchMurnaghan = BirchMurnaghan::new(35.0e9, 5.00, 4.77e3);
pub const ICE_VII_BME: BirchMurnaghan = BirchMurnaghan::new(23.7e9, 4.15, 1.46e3);
pub const PERICLASE_BME: BirchMurnaghan = BirchMurnaghan::new(177.0e9, 4.00, 3.56e3);
pub const ENSTATITE_BME: BirchMurnaghan = BirchMurnaghan::new(125.0e9, 5.00, 3.22e3);
/// 22MgO.3FeO.25SiO2 perovskite
pub const FE_PEROVSKITE_BME: BirchMurnaghan = BirchMurnaghan::new(266.0e9, 3.90, 4.26e3);
pub const SILICON_CARBIDE_BME: BirchMurnaghan = BirchMurnaghan::new(227.0e9, 4.10, 3.22e3);

// ρ = ρ0 + c Pⁿ fits, valid below 1e16 Pa: ρ0, c, n
pub const IRON_EPSILON_EXPONENTIAL: ExponentialFit = ExponentialFit::new(8300.0, 0.00349, 0.528);
pub const PEROVSKITE_EXPONENTIAL: ExponentialFit = ExponentialFit::new(4100.0, 0.00161, 0.541);
pub const FE_PEROVSKITE_EXPONENTIAL: ExponentialFit = ExponentialFit::new(4260.0, 0.00127, 0.549);
pub const ICE_VII_EXPONENTIAL: ExponentialFit = ExponentialFit::new(1460.0, 0.00311, 0.513);
pub const GRAPHITE_EXPONENTIAL: ExponentialFit = ExponentialFit::new(2250.0, 0.00350, 0.514);
pub const SILICON_CARBIDE_EXPONENTIAL: ExponentialFit = ExponentialFit::new(3220.0, 0.00172, 0.537);

/// Thomas-Fermi-Dirac parameters (A, Z) by element or mineral name.
pub const THOMAS_FERMI_DIRAC: [(&str, ThomasFermiDirac); 36] = [
    ("bismuth", ThomasFermiDirac::new(209.00, 83.00)),
    ("lead", ThomasFermiDirac::new(207.00, 82.00)),
    ("gold", ThomasFermiDirac::new(197.00, 79.00)),
    ("galena", ThomasFermiDirac::new(119.50, 49.00)),
    ("tin", ThomasFermiDirac::new(119.00, 50.00)),
    ("cadmium", ThomasFermiDirac::new(112.00, 48.00)),
    ("silver", ThomasFermiDirac::new(108.00, 47.00)),
    ("zinc", ThomasFermiDirac::new(65.00, 30.00)),
    ("copper", ThomasFermiDirac::new(64.00, 29.00)),
    ("nickel", ThomasFermiDirac::new(59.00, 28.00)),
    ("iron", ThomasFermiDirac::new(56.00, 26.00)),
    ("sphalerite", ThomasFermiDirac::new(48.50, 23.00)),
    ("troilite", ThomasFermiDirac::new(44.00, 21.00)),
    ("pyrite", ThomasFermiDirac::new(38.00, 16.50)),
    ("wustite", ThomasFermiDirac::new(36.00, 17.00)),
    ("oldhamite", ThomasFermiDirac::new(36.00, 18.00)),
    ("magnetite", ThomasFermiDirac::new(33.12, 15.70)),
    ("hematite", ThomasFermiDirac::new(32.00, 15.20)),
    ("fayalite", ThomasFermiDirac::new(29.16, 14.01)),
    ("rutile", ThomasFermiDirac::new(26.66, 12.66)),
    ("andradite", ThomasFermiDirac::new(25.40, 12.50)),
    ("pyrope", ThomasFermiDirac::new(25.01, 12.15)),
    ("grossularite", ThomasFermiDirac::new(22.50, 11.20)),
    ("diopside", ThomasFermiDirac::new(21.60, 10.80)),
    ("anorthite", ThomasFermiDirac::new(21.39, 10.62)),
    ("orthoclase", ThomasFermiDirac::new(21.39, 10.62)),
    ("corundum", ThomasFermiDirac::new(20.40, 10.00)),
    ("spinel", ThomasFermiDirac::new(20.29, 10.00)),
    ("jadeite", ThomasFermiDirac::new(20.20, 10.00)),
    ("albite", ThomasFermiDirac::new(20.16, 10.00)),
    ("quartz", ThomasFermiDirac::new(20.00, 10.00)),
    ("forsterite", ThomasFermiDirac::new(20.00, 10.00)),
    ("enstatite", ThomasFermiDirac::new(20.00, 10.00)),
    ("periclase", ThomasFermiDirac::new(20.00, 10.00)),
    ("spodumene", ThomasFermiDirac::new(18.60, 9.20)),
    ("beryl", ThomasFermiDirac::new(18.52, 9.17)),
];

/// Look up Thomas-Fermi-Dirac parameters, ignoring ASCII case.
pub fn thomas_fermi_dirac(name: &str) -> Option<ThomasFermiDirac> {
    THOMAS_FERMI_DIRAC
        .iter()
        .find(|(entry, _)| entry.eq_ignore_ascii_case(name))
        .map(|(_, eos)| *eos)
}

/// ε-iron core material.
pub fn iron() -> Substance {
    Substance::new("Iron", IRON_EPSILON_VINET)
}

/// Perovskite-dominated lower-mantle silicate.
pub fn silicate() -> Substance {
    Substance::new("Silicate", FE_PEROVSKITE_BME)
}

/// Enstatite at low pressure, perovskite above 25 GPa.
pub fn layered_silicate() -> Substance {
    Substance::new("Silicate", ENSTATITE_BME).with_phase(25.0e9, FE_PEROVSKITE_BME)
}

/// High-pressure water ice.
pub fn water_ice() -> Substance {
    Substance::new("Water", ICE_VII_BME)
}

pub fn graphite() -> Substance {
    Substance::new("Carbon", GRAPHITE_BME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_insensitive() {
        let iron = thomas_fermi_dirac("Iron").unwrap();
        assert_eq!(iron.atomic_weight, 56.0);
        assert_eq!(iron.atomic_number, 26.0);
        assert_eq!(thomas_fermi_dirac("QUARTZ"), thomas_fermi_dirac("quartz"));
        assert!(thomas_fermi_dirac("unobtainium").is_none());
    }

    #[test]
    fn test_table_names_are_unique() {
        for (i, (name, _)) in THOMAS_FERMI_DIRAC.iter().enumerate() {
            for (other, _) in &THOMAS_FERMI_DIRAC[i + 1..] {
                assert_ne!(name, other);
            }
        }
    }

    #[test]
    fn test_presets_order_by_density() {
        use crate::material::Material;

        assert!(iron().base_density() > silicate().base_density());
        assert!(silicate().base_density() > water_ice().base_density());
        assert_eq!(layered_silicate().phases().len(), 2);
    }
}
