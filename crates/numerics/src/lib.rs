//! Numerical building blocks for the interior structure solver.
//!
//! - [`dormand_prince`]: an adaptive explicit Runge-Kutta 5(4) engine that
//!   advances one accepted step at a time and records a quartic dense-output
//!   polynomial for every accepted step.
//! - [`root`]: bisection on a bracket (strict and lenient forms) and a Newton
//!   iterator used to invert equations of state.

pub mod dormand_prince;
pub mod root;

#[cfg(test)]
mod root_test;

pub use dormand_prince::{DenseBlock, DormandPrince, IntegrationError, State, Status, Tolerances};
pub use root::{bisect, locate_root, newton, RootError};
