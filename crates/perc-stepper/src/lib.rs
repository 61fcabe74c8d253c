//! Numerical core of the perc simulator: the seeded noise source and the
//! reaction-diffusion-noise stepper.
//!
//! [`NoiseSource`] produces addressable, reproducible random streams — one
//! per epoch — from a single configured seed. [`ReactionDiffusionStepper`]
//! advances a density field by one epoch at a time, using either explicit
//! Euler or 4th-order Runge–Kutta integration of the deterministic terms
//! with the stochastic term applied once per cell per epoch.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod noise;
pub mod stepper;

pub use noise::{NoiseKind, NoiseSource, NoiseStream};
pub use stepper::{IntegrationMethod, ReactionDiffusionStepper, StepperBuilder};
