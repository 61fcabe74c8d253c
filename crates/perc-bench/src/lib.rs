//! Benchmark support crate for the perc workspace.
//!
//! Contains no library code of its own; the benchmarks live under
//! `benches/` and exercise the stepper through the public APIs of the
//! sibling crates.

#![deny(missing_docs)]
#![forbid(unsafe_code)]
