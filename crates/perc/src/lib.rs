//! Perc: a stochastic contact-process (directed-percolation) simulator on
//! discretized 1-D and 2-D lattices.
//!
//! This is the top-level facade crate re-exporting the public API from all
//! perc sub-crates. For most users, adding `perc` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use perc::prelude::*;
//!
//! let mut sim = Simulation::new(SimConfig {
//!     coefficients: Coefficients {
//!         linear: 1.0,
//!         quadratic: 2.0,
//!         diffusion: 0.1,
//!         noise: 1.0,
//!     },
//!     t_final: 1.0,
//!     dx: 0.5,
//!     dt: 0.01,
//!     seed: 42,
//!     extent: GridExtent::TwoD { rows: 12, cols: 8 },
//!     topology: Topology::Bounded,
//!     boundary: BoundaryRule::Floating,
//!     initial: InitialCondition::RandomUniform,
//!     method: IntegrationMethod::RungeKutta4,
//!     noise_kind: NoiseKind::Gaussian,
//! });
//!
//! sim.initialize().unwrap();
//! assert_eq!(sim.total_epochs(), 101);
//!
//! // Integrate in segments, inspecting intermediate state between them.
//! for _ in 0..4 {
//!     sim.run(25).unwrap();
//!     let snap = sim.snapshot().unwrap();
//!     assert_eq!(snap.density.len(), 12 * 8);
//! }
//! assert_eq!(sim.phase(), Phase::Finished);
//! assert_eq!(sim.ledger().len(), 101);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `perc-core` | Epoch IDs, coefficients, density field, step errors |
//! | [`grid`] | `perc-grid` | Lattice backends and the `Grid` trait |
//! | [`stepper`] | `perc-stepper` | Noise source and the reaction-diffusion stepper |
//! | [`engine`] | `perc-engine` | Simulation lifecycle, configuration, epoch ledger |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and IDs (`perc-core`).
///
/// Contains [`types::Coefficients`], [`types::DensityField`],
/// [`types::EpochId`], and [`types::StepError`].
pub use perc_core as types;

/// Lattice backends (`perc-grid`).
///
/// Provides the [`grid::Grid`] trait and concrete backends
/// [`grid::Lattice1D`] and [`grid::Lattice2D`] with per-axis
/// [`grid::EdgeRule`]s.
pub use perc_grid as grid;

/// Noise source and numerical stepper (`perc-stepper`).
///
/// [`stepper::NoiseSource`] derives per-epoch random streams from the
/// configured seed; [`stepper::ReactionDiffusionStepper`] advances a
/// density field one epoch per call.
pub use perc_stepper as stepper;

/// Simulation lifecycle (`perc-engine`).
///
/// [`engine::Simulation`] is the composition root driving the
/// configure-once, run-in-segments contract.
pub use perc_engine as engine;

/// Common imports for typical perc usage.
///
/// ```rust
/// use perc::prelude::*;
/// ```
pub mod prelude {
    pub use perc_core::{Coefficients, Coord, DensityField, EpochId, StepError};
    pub use perc_engine::{
        BoundaryRule, ConfigError, EpochLedger, EpochRecord, GridExtent, InitialCondition,
        LedgerError, Phase, RunError, RunMetrics, SimConfig, Simulation, Snapshot, Topology,
    };
    pub use perc_grid::{AxisDir, EdgeRule, Grid, GridError, Lattice1D, Lattice2D};
    pub use perc_stepper::{
        IntegrationMethod, NoiseKind, NoiseSource, NoiseStream, ReactionDiffusionStepper,
    };
}
