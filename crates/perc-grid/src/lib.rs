//! Lattice topologies for perc simulations.
//!
//! This crate defines the [`Grid`] trait — the spatial abstraction the
//! stepper and engine consume — along with the two concrete lattice
//! backends and the per-axis edge policy.
//!
//! # Backends
//!
//! - [`Lattice1D`]: 1-D chain with a configurable [`EdgeRule`]
//! - [`Lattice2D`]: 2-D 4-connected grid, with independently configurable
//!   edge rules per axis
//!
//! Both backends keep a constant neighbour degree (2 per axis) at every
//! cell: a floating edge resolves an out-of-bounds neighbour to the
//! boundary cell itself, a wrapping edge resolves it modulo the axis
//! length.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod edge;
pub mod error;
pub mod grid;
pub mod lattice1d;
pub mod lattice2d;

#[cfg(test)]
pub(crate) mod compliance;

pub use edge::EdgeRule;
pub use error::GridError;
pub use grid::{AxisDir, Grid};
pub use lattice1d::Lattice1D;
pub use lattice2d::Lattice2D;
