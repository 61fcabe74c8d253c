//! Core types for the perc stochastic lattice simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! epoch counter, lattice coordinates, the reaction coefficients, the
//! density field, and the stepper error type shared by the rest of the
//! workspace.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coeffs;
pub mod error;
pub mod field;
pub mod id;

pub use coeffs::Coefficients;
pub use error::StepError;
pub use field::DensityField;
pub use id::{Coord, EpochId};
