//! The [`Simulation`] lifecycle state machine.
//!
//! A simulation is configured once, initialized once, and then advanced in
//! caller-chosen segments: `run(k)` integrates exactly `k` epochs and may
//! be called repeatedly, with read-only [`Snapshot`]s taken between
//! segments. The cumulative epoch index and simulated time are tracked
//! internally, so callers can subdivide a long trajectory arbitrarily
//! without restarting or duplicating work.
//!
//! # Ownership model
//!
//! `Simulation` exclusively owns its density field, noise source, and
//! ledger. All mutating methods take `&mut self`, and
//! [`snapshot()`](Simulation::snapshot) borrows from `self`, so the
//! borrow checker guarantees no snapshot outlives a subsequent mutation.

use perc_core::{DensityField, EpochId};
use perc_grid::Grid;
use perc_stepper::{NoiseSource, ReactionDiffusionStepper};
use smallvec::SmallVec;
use std::error::Error;
use std::fmt;
use std::time::Instant;

use crate::config::{ConfigError, InitialCondition, SimConfig};
use crate::ledger::{EpochLedger, EpochRecord};
use crate::metrics::RunMetrics;

// ── Phase ───────────────────────────────────────────────────────

/// Lifecycle phase of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Constructed but not yet initialized; only `initialize()` is useful.
    Unconfigured,
    /// Initialized: epoch 0 recorded, no integration step taken yet.
    Initialized,
    /// At least one epoch integrated; budget remains.
    Ready,
    /// The final epoch has been reached; further `run()` calls fail.
    Finished,
}

// ── RunError ────────────────────────────────────────────────────

/// Errors from [`Simulation::run`] and [`Simulation::snapshot`].
#[derive(Clone, Debug, PartialEq)]
pub enum RunError {
    /// The simulation has not been initialized.
    NotInitialized,
    /// `run(0)` was requested; a run must advance at least one epoch.
    ZeroEpochs,
    /// The requested epochs exceed the remaining budget.
    BudgetExhausted {
        /// Number of epochs requested.
        requested: u64,
        /// Epochs remaining before the final epoch.
        remaining: u64,
    },
    /// An integration step failed; completed epochs are preserved.
    Step(perc_core::StepError),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInitialized => write!(f, "simulation is not initialized"),
            Self::ZeroEpochs => write!(f, "run must advance at least one epoch"),
            Self::BudgetExhausted {
                requested,
                remaining,
            } => {
                write!(
                    f,
                    "requested {requested} epochs but only {remaining} remain"
                )
            }
            Self::Step(e) => write!(f, "step failed: {e}"),
        }
    }
}

impl Error for RunError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Step(e) => Some(e),
            _ => None,
        }
    }
}

// ── Snapshot ────────────────────────────────────────────────────

/// Read-only view of simulation state between run segments.
///
/// Borrows from the simulation, so it cannot outlive a subsequent
/// mutation; taking a snapshot is side-effect free and may be repeated
/// any number of times.
#[derive(Clone, Debug)]
pub struct Snapshot<'a> {
    /// Current epoch index.
    pub epoch: EpochId,
    /// Current simulated time, `epoch × dt`.
    pub time: f64,
    /// Total epoch count, including epoch 0.
    pub total_epochs: u64,
    /// All recorded epochs so far, in order.
    pub records: &'a [EpochRecord],
    /// Current density field in canonical row-major order.
    pub density: &'a [f64],
    /// Per-axis grid sizes.
    pub extent: SmallVec<[u32; 2]>,
}

impl Snapshot<'_> {
    /// The recorded times, in epoch order.
    pub fn times(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.time).collect()
    }

    /// The recorded mean densities, in epoch order.
    pub fn mean_densities(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.mean_density).collect()
    }
}

// ── Simulation ──────────────────────────────────────────────────

/// Composition root of one stochastic lattice simulation.
///
/// Owns the lattice, density field, stepper, noise source, and epoch
/// ledger. See the [module docs](self) for the lifecycle contract.
///
/// # Example
///
/// ```
/// use perc_core::Coefficients;
/// use perc_engine::{
///     BoundaryRule, GridExtent, InitialCondition, SimConfig, Simulation, Topology,
/// };
/// use perc_stepper::{IntegrationMethod, NoiseKind};
///
/// let mut sim = Simulation::new(SimConfig {
///     coefficients: Coefficients {
///         linear: 1.0,
///         quadratic: 2.0,
///         diffusion: 0.0,
///         noise: 0.0,
///     },
///     t_final: 0.3,
///     dx: 1.0,
///     dt: 0.1,
///     seed: 1,
///     extent: GridExtent::TwoD { rows: 4, cols: 4 },
///     topology: Topology::Bounded,
///     boundary: BoundaryRule::Floating,
///     initial: InitialCondition::ConstantValue(0.5),
///     method: IntegrationMethod::Euler,
///     noise_kind: NoiseKind::Gaussian,
/// });
/// sim.initialize().unwrap();
/// assert_eq!(sim.total_epochs(), 4);
/// sim.run(3).unwrap();
/// let snap = sim.snapshot().unwrap();
/// assert_eq!(snap.records.len(), 4);
/// ```
pub struct Simulation {
    config: SimConfig,
    phase: Phase,
    grid: Option<Box<dyn Grid>>,
    stepper: Option<ReactionDiffusionStepper>,
    noise: NoiseSource,
    field: DensityField,
    ledger: EpochLedger,
    epoch: EpochId,
    total_epochs: u64,
    metrics: RunMetrics,
}

impl Simulation {
    /// Create an unconfigured simulation holding `config`.
    ///
    /// Nothing is validated or allocated until
    /// [`initialize()`](Simulation::initialize).
    pub fn new(config: SimConfig) -> Self {
        let noise = NoiseSource::new(config.seed);
        Self {
            config,
            phase: Phase::Unconfigured,
            grid: None,
            stepper: None,
            noise,
            field: DensityField::zeroed(0),
            ledger: EpochLedger::new(),
            epoch: EpochId(0),
            total_epochs: 0,
            metrics: RunMetrics::default(),
        }
    }

    /// Validate the configuration, build the lattice and stepper, apply
    /// the initial-condition policy, and record epoch 0.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the configuration is invalid or the
    /// simulation is already initialized; nothing is committed on failure
    /// and the phase stays [`Phase::Unconfigured`].
    pub fn initialize(&mut self) -> Result<(), ConfigError> {
        if self.phase != Phase::Unconfigured {
            return Err(ConfigError::AlreadyInitialized);
        }
        self.config.validate()?;

        let grid = self.config.build_grid()?;
        let stepper = ReactionDiffusionStepper::builder()
            .coefficients(self.config.coefficients)
            .dx(self.config.dx)
            .dt(self.config.dt)
            .method(self.config.method)
            .noise_kind(self.config.noise_kind)
            .build(grid.as_ref())
            .map_err(|reason| ConfigError::Stepper { reason })?;

        let mut field = DensityField::zeroed(grid.cell_count());
        match self.config.initial {
            InitialCondition::RandomUniform => {
                let mut stream = self.noise.stream(EpochId(0));
                for v in field.as_mut_slice() {
                    *v = stream.next_uniform();
                }
            }
            InitialCondition::ConstantValue(value) => field.fill(value),
            InitialCondition::SingleSeed { cell, value } => {
                field.as_mut_slice()[cell] = value;
            }
        }

        // All fallible work is done; commit.
        self.total_epochs = self.config.epoch_count();
        self.grid = Some(grid);
        self.stepper = Some(stepper);
        self.field = field;
        self.epoch = EpochId(0);
        self.ledger = EpochLedger::new();
        self.ledger.append(0.0, self.field.mean());
        self.metrics = RunMetrics {
            cell_count: self.field.len(),
            ..RunMetrics::default()
        };
        self.phase = Phase::Initialized;
        Ok(())
    }

    /// Advance the trajectory by exactly `epochs` epochs, appending one
    /// ledger record per completed epoch.
    ///
    /// # Errors
    ///
    /// - [`RunError::NotInitialized`] before `initialize()`.
    /// - [`RunError::ZeroEpochs`] for `epochs == 0`.
    /// - [`RunError::BudgetExhausted`] if the request exceeds the
    ///   remaining budget (including any request once finished); the
    ///   simulation is unchanged.
    /// - [`RunError::Step`] if an integration step fails; epochs completed
    ///   before the failing step are preserved, along with their ledger
    ///   records.
    pub fn run(&mut self, epochs: u64) -> Result<(), RunError> {
        if self.phase == Phase::Unconfigured {
            return Err(RunError::NotInitialized);
        }
        if epochs == 0 {
            return Err(RunError::ZeroEpochs);
        }
        let remaining = (self.total_epochs - 1).saturating_sub(self.epoch.0);
        if epochs > remaining {
            return Err(RunError::BudgetExhausted {
                requested: epochs,
                remaining,
            });
        }

        let started = Instant::now();
        let Self {
            config,
            stepper,
            noise,
            field,
            ledger,
            epoch,
            ..
        } = self;
        let stepper = stepper.as_mut().expect("stepper exists once initialized");
        let mut completed = 0u64;
        let mut failure = None;
        for _ in 0..epochs {
            let next = EpochId(epoch.0 + 1);
            let mut stream = noise.stream(next);
            if let Err(e) = stepper.step(field, &mut stream) {
                failure = Some(e);
                break;
            }
            *epoch = next;
            ledger.append(next.0 as f64 * config.dt, field.mean());
            completed += 1;
        }

        self.metrics.epochs_run += completed;
        self.metrics.last_run_epochs = completed;
        self.metrics.last_run_us = started.elapsed().as_micros() as u64;
        if self.epoch.0 > 0 {
            self.phase = if self.epoch.0 == self.total_epochs - 1 {
                Phase::Finished
            } else {
                Phase::Ready
            };
        }
        match failure {
            Some(e) => Err(RunError::Step(e)),
            None => Ok(()),
        }
    }

    /// Take a read-only snapshot of the current state.
    ///
    /// Repeatable and side-effect free; valid any number of times between
    /// (or instead of) `run()` calls.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::NotInitialized`] before `initialize()`.
    pub fn snapshot(&self) -> Result<Snapshot<'_>, RunError> {
        if self.phase == Phase::Unconfigured {
            return Err(RunError::NotInitialized);
        }
        let grid = self.grid.as_ref().expect("grid exists once initialized");
        Ok(Snapshot {
            epoch: self.epoch,
            time: self.current_time(),
            total_epochs: self.total_epochs,
            records: self.ledger.all(),
            density: self.field.as_slice(),
            extent: grid.extent(),
        })
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current epoch index (0 after initialization).
    pub fn current_epoch(&self) -> EpochId {
        self.epoch
    }

    /// Current simulated time, `epoch × dt`.
    pub fn current_time(&self) -> f64 {
        self.epoch.0 as f64 * self.config.dt
    }

    /// Total epoch count, including epoch 0. Zero until initialized.
    pub fn total_epochs(&self) -> u64 {
        self.total_epochs
    }

    /// The epoch ledger.
    pub fn ledger(&self) -> &EpochLedger {
        &self.ledger
    }

    /// Current density field in canonical row-major order. Empty until
    /// initialized.
    pub fn density(&self) -> &[f64] {
        self.field.as_slice()
    }

    /// The lattice, once initialized.
    pub fn grid(&self) -> Option<&dyn Grid> {
        self.grid.as_deref()
    }

    /// The configuration this simulation was built from.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The reproducibility seed.
    pub fn seed(&self) -> u64 {
        self.noise.seed()
    }

    /// Metrics from the most recent `run()` call.
    pub fn last_metrics(&self) -> &RunMetrics {
        &self.metrics
    }
}

impl fmt::Debug for Simulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("phase", &self.phase)
            .field("epoch", &self.epoch)
            .field("total_epochs", &self.total_epochs)
            .field("cells", &self.field.len())
            .field("seed", &self.noise.seed())
            .finish()
    }
}
