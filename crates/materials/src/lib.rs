//! Material models for planetary interiors
//!
//! The structure solver only sees materials through the [`Material`] trait.
//! This crate provides the equations of state it is usually fed with:
//!
//! - [`eos`]: pressure-density relations (Birch-Murnaghan, Rose-Vinet,
//!   Thomas-Fermi-Dirac, exponential and linear fits)
//! - [`catalog`]: published fit parameters for common planetary materials
//! - [`substance`]: named materials with pressure-driven phases and optional
//!   thermal properties

pub mod catalog;
pub mod eos;
pub mod material;
pub mod substance;


pub use eos::{BirchMurnaghan, Eos, ExponentialFit, LinearFit, RoseVinet, ThomasFermiDirac};
pub use material::{Material, PhaseId};
pub use substance::{Phase, SimonGlatzel, Substance, ThermalProperties};
