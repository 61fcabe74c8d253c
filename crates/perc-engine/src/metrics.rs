//! Per-run performance metrics.

/// Timing data collected by [`Simulation::run`](crate::Simulation::run).
///
/// Populated after each successful `run()` call; consumers read them from
/// the most recent run via
/// [`last_metrics()`](crate::Simulation::last_metrics).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Cumulative number of epochs integrated since initialization.
    pub epochs_run: u64,
    /// Epochs integrated by the most recent `run()` call.
    pub last_run_epochs: u64,
    /// Wall-clock time of the most recent `run()` call, in microseconds.
    pub last_run_us: u64,
    /// Number of cells being advanced each epoch.
    pub cell_count: usize,
}
