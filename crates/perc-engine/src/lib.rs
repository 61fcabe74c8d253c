//! Simulation lifecycle for the perc stochastic lattice simulator.
//!
//! [`Simulation`] is the composition root: it owns the lattice, the
//! density field, the stepper, the noise source, and the epoch ledger,
//! and exposes the segmented-run lifecycle consumed by external drivers
//! (`initialize` → repeated `run(n)` with read-only snapshots between
//! segments).

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod ledger;
pub mod metrics;
pub mod sim;

pub use config::{
    BoundaryRule, ConfigError, GridExtent, InitialCondition, SimConfig, Topology,
};
pub use ledger::{EpochLedger, EpochRecord, LedgerError};
pub use metrics::RunMetrics;
pub use sim::{Phase, RunError, Simulation, Snapshot};
