//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is the input for constructing a
//! [`Simulation`](crate::Simulation). [`validate()`](SimConfig::validate)
//! checks all structural invariants before any state is built;
//! `initialize()` calls it and commits nothing on failure.

use perc_core::Coefficients;
use perc_grid::{EdgeRule, Grid, GridError, Lattice1D, Lattice2D};
use perc_stepper::{IntegrationMethod, NoiseKind};
use std::error::Error;
use std::fmt;

/// Tolerance absorbing floating-point representation error when deriving
/// the epoch count from `t_final / dt`.
const TIME_EPSILON: f64 = 1e-9;

// ── Configuration enums ────────────────────────────────────────────

/// Grid dimensionality and per-axis extent.
///
/// Dimensionality is carried by the variant, so an extent tuple of the
/// wrong length is unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridExtent {
    /// A 1-D chain of `len` cells.
    OneD(u32),
    /// A 2-D grid of `rows × cols` cells.
    TwoD {
        /// Number of rows.
        rows: u32,
        /// Number of columns.
        cols: u32,
    },
}

impl GridExtent {
    /// Number of spatial dimensions.
    pub fn ndim(&self) -> usize {
        match self {
            Self::OneD(_) => 1,
            Self::TwoD { .. } => 2,
        }
    }

    /// Total cell count (product of the per-axis sizes).
    pub fn cell_count(&self) -> usize {
        match self {
            Self::OneD(len) => *len as usize,
            Self::TwoD { rows, cols } => (*rows as usize) * (*cols as usize),
        }
    }
}

/// Whole-grid adjacency rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Topology {
    /// Index arithmetic stops at the domain edges; how a missing
    /// neighbour is synthesized is governed by [`BoundaryRule`].
    #[default]
    Bounded,
    /// Index arithmetic wraps modulo the extent on every axis.
    Periodic,
}

/// Boundary condition at domain edges, meaningful only when bounded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BoundaryRule {
    /// Zero-flux edge: a missing neighbour is treated as equal to the
    /// edge cell itself, so no diffusive flux crosses the boundary.
    #[default]
    Floating,
}

/// Policy populating the density field at initialization.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum InitialCondition {
    /// Independent uniform draws in `[0, 1)` per cell, from the epoch-0
    /// random stream.
    #[default]
    RandomUniform,
    /// Every cell set to the same value.
    ConstantValue(f64),
    /// All cells zero except one seeded cell.
    SingleSeed {
        /// Flat (row-major) index of the seeded cell.
        cell: usize,
        /// Density planted in the seeded cell.
        value: f64,
    },
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`] or `initialize()`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// `dx` is non-finite or <= 0.
    InvalidSpacing {
        /// The invalid value.
        dx: f64,
    },
    /// `dt` is non-finite or <= 0.
    InvalidTimeStep {
        /// The invalid value.
        dt: f64,
    },
    /// `t_final` is non-finite or <= 0.
    InvalidFinalTime {
        /// The invalid value.
        t_final: f64,
    },
    /// The derived epoch count is <= 1 (nothing to integrate).
    EpochBudgetTooSmall {
        /// The derived count.
        epochs: u64,
    },
    /// A coefficient failed validation.
    Coefficients {
        /// Description of the failure.
        reason: String,
    },
    /// Lattice construction failed.
    Grid(GridError),
    /// Stepper construction failed.
    Stepper {
        /// Description of the failure.
        reason: String,
    },
    /// `dt` exceeds the explicit stability bound of the diffusion stencil.
    TimeStepExceedsStability {
        /// The configured time step.
        dt: f64,
        /// The maximum stable time step.
        max_dt: f64,
    },
    /// The single-seed cell index is outside the grid.
    SeedCellOutOfRange {
        /// The configured cell index.
        cell: usize,
        /// Total cell count of the grid.
        cell_count: usize,
    },
    /// An initial density value is non-finite or negative.
    InvalidInitialValue {
        /// The invalid value.
        value: f64,
    },
    /// `initialize()` was called on an already-initialized simulation.
    AlreadyInitialized,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSpacing { dx } => {
                write!(f, "dx must be finite and > 0, got {dx}")
            }
            Self::InvalidTimeStep { dt } => {
                write!(f, "dt must be finite and > 0, got {dt}")
            }
            Self::InvalidFinalTime { t_final } => {
                write!(f, "t_final must be finite and > 0, got {t_final}")
            }
            Self::EpochBudgetTooSmall { epochs } => {
                write!(f, "derived epoch count {epochs} leaves nothing to integrate")
            }
            Self::Coefficients { reason } => write!(f, "coefficients: {reason}"),
            Self::Grid(e) => write!(f, "grid: {e}"),
            Self::Stepper { reason } => write!(f, "stepper: {reason}"),
            Self::TimeStepExceedsStability { dt, max_dt } => {
                write!(f, "dt {dt} exceeds diffusion stability bound {max_dt}")
            }
            Self::SeedCellOutOfRange { cell, cell_count } => {
                write!(f, "seed cell {cell} out of range for {cell_count} cells")
            }
            Self::InvalidInitialValue { value } => {
                write!(f, "initial density must be finite and >= 0, got {value}")
            }
            Self::AlreadyInitialized => write!(f, "simulation is already initialized"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for ConfigError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for one simulation.
///
/// All fields are plain data; nothing is built until
/// [`Simulation::initialize()`](crate::Simulation::initialize).
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Reaction, diffusion, and noise coefficients.
    pub coefficients: Coefficients,
    /// Trajectory end time; the epoch count is derived from it.
    pub t_final: f64,
    /// Cell spacing.
    pub dx: f64,
    /// Time step.
    pub dt: f64,
    /// Seed of the deterministic random source; the full
    /// reproducibility key.
    pub seed: u64,
    /// Grid dimensionality and per-axis sizes.
    pub extent: GridExtent,
    /// Whole-grid adjacency rule.
    pub topology: Topology,
    /// Boundary condition at domain edges (bounded topology only).
    pub boundary: BoundaryRule,
    /// Initial-condition policy.
    pub initial: InitialCondition,
    /// Time integration scheme.
    pub method: IntegrationMethod,
    /// Distribution of the per-cell noise variate.
    pub noise_kind: NoiseKind,
}

impl SimConfig {
    /// Total number of epochs, including epoch 0 (the initial condition):
    /// `floor(t_final / dt) + 1`, with a small tolerance absorbing
    /// floating-point representation error in the quotient.
    ///
    /// Meaningful only for a validated configuration.
    pub fn epoch_count(&self) -> u64 {
        (self.t_final / self.dt + TIME_EPSILON).floor() as u64 + 1
    }

    /// The edge rule the configured topology and boundary condition
    /// resolve to.
    pub fn edge_rule(&self) -> EdgeRule {
        match self.topology {
            Topology::Periodic => EdgeRule::Wrap,
            Topology::Bounded => match self.boundary {
                BoundaryRule::Floating => EdgeRule::Floating,
            },
        }
    }

    /// Build the configured lattice.
    pub fn build_grid(&self) -> Result<Box<dyn Grid>, GridError> {
        let edge = self.edge_rule();
        match self.extent {
            GridExtent::OneD(len) => Ok(Box::new(Lattice1D::new(len, edge)?)),
            GridExtent::TwoD { rows, cols } => Ok(Box::new(Lattice2D::new(rows, cols, edge)?)),
        }
    }

    /// Validate all structural invariants.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Discretization.
        if !self.dx.is_finite() || self.dx <= 0.0 {
            return Err(ConfigError::InvalidSpacing { dx: self.dx });
        }
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidTimeStep { dt: self.dt });
        }
        if !self.t_final.is_finite() || self.t_final <= 0.0 {
            return Err(ConfigError::InvalidFinalTime {
                t_final: self.t_final,
            });
        }
        // 2. Coefficients.
        self.coefficients
            .validate()
            .map_err(|reason| ConfigError::Coefficients { reason })?;
        // 3. The grid must be constructible.
        let grid = self.build_grid()?;
        // 4. At least one epoch beyond the initial condition.
        let epochs = self.epoch_count();
        if epochs <= 1 {
            return Err(ConfigError::EpochBudgetTooSmall { epochs });
        }
        // 5. Explicit stability bound of the diffusion stencil.
        if self.coefficients.diffusion > 0.0 {
            let max_dt =
                (self.dx * self.dx) / (grid.degree() as f64 * self.coefficients.diffusion);
            if self.dt > max_dt {
                return Err(ConfigError::TimeStepExceedsStability {
                    dt: self.dt,
                    max_dt,
                });
            }
        }
        // 6. Initial condition.
        match self.initial {
            InitialCondition::RandomUniform => {}
            InitialCondition::ConstantValue(value) => {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidInitialValue { value });
                }
            }
            InitialCondition::SingleSeed { cell, value } => {
                if !value.is_finite() || value < 0.0 {
                    return Err(ConfigError::InvalidInitialValue { value });
                }
                if cell >= grid.cell_count() {
                    return Err(ConfigError::SeedCellOutOfRange {
                        cell,
                        cell_count: grid.cell_count(),
                    });
                }
            }
        }
        Ok(())
    }
}
