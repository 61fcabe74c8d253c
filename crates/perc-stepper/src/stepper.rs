//! The reaction-diffusion-noise stepper.
//!
//! Advances a [`DensityField`] by exactly one epoch per call. The per-cell
//! update is the sum of three terms:
//!
//! - reaction: `linear·ρ − quadratic·ρ²`
//! - diffusion: `(diffusion / dx²) · (Σ neighbour ρ − degree·ρ)` over the
//!   lattice's flat neighbour table
//! - noise: `noise·ξ`, one fresh variate per cell per epoch
//!
//! Constructed via the builder pattern: [`ReactionDiffusionStepper::builder`].

use crate::noise::{NoiseKind, NoiseStream};
use perc_core::{Coefficients, DensityField, StepError};
use perc_grid::Grid;
use smallvec::SmallVec;

/// Time integration scheme for the deterministic terms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntegrationMethod {
    /// Single evaluation per cell: `ρ' = ρ + dt·(f(ρ) + noise·ξ)`.
    Euler,
    /// Four staged evaluations of the deterministic terms combined with
    /// the standard RK4 weights; noise applied once at the final
    /// combination so the stochastic term is not correlated across stages.
    #[default]
    RungeKutta4,
}

/// Advances a density field one epoch at a time.
///
/// The stepper snapshots the lattice's neighbour table at build time and
/// owns all scratch buffers, so stepping performs no allocation. Reads
/// come from the frozen prior-epoch field; the update is computed into a
/// separate buffer and committed by swap only after every cell has been
/// checked finite, so a failing step leaves the field untouched.
///
/// # Construction
///
/// ```
/// use perc_core::Coefficients;
/// use perc_grid::{EdgeRule, Lattice2D};
/// use perc_stepper::ReactionDiffusionStepper;
///
/// let grid = Lattice2D::new(8, 8, EdgeRule::Wrap).unwrap();
/// let stepper = ReactionDiffusionStepper::builder()
///     .coefficients(Coefficients {
///         linear: 1.0,
///         quadratic: 2.0,
///         diffusion: 0.1,
///         noise: 0.0,
///     })
///     .dx(0.5)
///     .dt(0.01)
///     .build(&grid)
///     .unwrap();
/// assert!(stepper.max_dt().unwrap() > 0.01);
/// ```
#[derive(Debug)]
pub struct ReactionDiffusionStepper {
    coeffs: Coefficients,
    dt: f64,
    // diffusion / dx^2, the coefficient actually applied to the stencil
    diffusion_scaled: f64,
    method: IntegrationMethod,
    noise_kind: NoiseKind,
    neighbours: Vec<SmallVec<[usize; 4]>>,
    degree: usize,
    next: Vec<f64>,
    k1: Vec<f64>,
    k2: Vec<f64>,
    k3: Vec<f64>,
    aux_old: Vec<f64>,
    aux_new: Vec<f64>,
}

/// Builder for [`ReactionDiffusionStepper`].
///
/// Required fields: `coefficients`, `dx`, and `dt`.
pub struct StepperBuilder {
    coefficients: Option<Coefficients>,
    dx: Option<f64>,
    dt: Option<f64>,
    method: IntegrationMethod,
    noise_kind: NoiseKind,
}

impl ReactionDiffusionStepper {
    /// Create a new builder for configuring a stepper.
    pub fn builder() -> StepperBuilder {
        StepperBuilder {
            coefficients: None,
            dx: None,
            dt: None,
            method: IntegrationMethod::default(),
            noise_kind: NoiseKind::default(),
        }
    }

    /// The configured time step.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// The configured integration method.
    pub fn method(&self) -> IntegrationMethod {
        self.method
    }

    /// Maximum stable timestep for the explicit diffusion stencil:
    /// `1 / (degree · diffusion / dx²)`. `None` when diffusion is zero.
    pub fn max_dt(&self) -> Option<f64> {
        if self.diffusion_scaled > 0.0 {
            Some(1.0 / (self.degree as f64 * self.diffusion_scaled))
        } else {
            None
        }
    }

    /// Advance `field` by exactly one epoch, drawing per-cell noise from
    /// `stream` in canonical cell order.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::NonFiniteInput`] if the field is non-finite on
    /// entry, or [`StepError::NonFiniteOutput`] if the update produces a
    /// non-finite value. In both cases the field is left untouched.
    pub fn step(
        &mut self,
        field: &mut DensityField,
        stream: &mut NoiseStream,
    ) -> Result<(), StepError> {
        debug_assert_eq!(field.len(), self.neighbours.len());
        if let Some(cell) = field.first_non_finite() {
            return Err(StepError::NonFiniteInput { cell });
        }
        match self.method {
            IntegrationMethod::Euler => self.compute_euler(field, stream)?,
            IntegrationMethod::RungeKutta4 => self.compute_rk4(field, stream)?,
        }
        // Commit: the new epoch is complete and finite.
        field.swap_buffer(&mut self.next);
        Ok(())
    }

    /// Deterministic right-hand side (reaction + diffusion) at cell `i`.
    fn deterministic_rhs(&self, i: usize, field: &[f64]) -> f64 {
        let rho = field[i];
        let nbs = &self.neighbours[i];
        let mut neighbour_sum = 0.0;
        for &j in nbs.iter() {
            neighbour_sum += field[j];
        }
        let diffusion = self.diffusion_scaled * (neighbour_sum - nbs.len() as f64 * rho);
        self.coeffs.linear * rho - self.coeffs.quadratic * rho * rho + diffusion
    }

    /// Finalize one cell: add noise, enforce the absorbing state, check
    /// finiteness, and stage the value in the next-epoch buffer.
    fn commit_cell(
        &mut self,
        i: usize,
        deterministic: f64,
        stream: &mut NoiseStream,
    ) -> Result<(), StepError> {
        let xi = stream.next_noise(self.noise_kind);
        let value = deterministic + self.dt * self.coeffs.noise * xi;
        if !value.is_finite() {
            return Err(StepError::NonFiniteOutput { cell: i });
        }
        // Absorbing-state convention of the contact process: densities
        // never go negative.
        self.next[i] = value.max(0.0);
        Ok(())
    }

    fn compute_euler(
        &mut self,
        field: &DensityField,
        stream: &mut NoiseStream,
    ) -> Result<(), StepError> {
        let n = field.len();
        for i in 0..n {
            let rho = field.as_slice()[i];
            let f = self.deterministic_rhs(i, field.as_slice());
            self.commit_cell(i, rho + self.dt * f, stream)?;
        }
        Ok(())
    }

    fn compute_rk4(
        &mut self,
        field: &DensityField,
        stream: &mut NoiseStream,
    ) -> Result<(), StepError> {
        let n = field.len();
        let dtm = 0.5 * self.dt;
        let dts = self.dt / 6.0;

        // Stage 1: k1 = f(ρ), first half-step auxiliary field.
        for i in 0..n {
            let k = self.deterministic_rhs(i, field.as_slice());
            self.k1[i] = k;
            self.aux_old[i] = field.as_slice()[i] + dtm * k;
        }
        // Stage 2: k2 = f(ρ + dt/2·k1), second half-step auxiliary field.
        for i in 0..n {
            let k = self.deterministic_rhs(i, &self.aux_old);
            self.k2[i] = k;
            self.aux_new[i] = field.as_slice()[i] + dtm * k;
        }
        // Swapping buffer contents is O(1), better than copying.
        std::mem::swap(&mut self.aux_old, &mut self.aux_new);
        // Stage 3: k3 = f(ρ + dt/2·k2), full-step auxiliary field.
        for i in 0..n {
            let k = self.deterministic_rhs(i, &self.aux_old);
            self.k3[i] = k;
            self.aux_new[i] = field.as_slice()[i] + self.dt * k;
        }
        std::mem::swap(&mut self.aux_old, &mut self.aux_new);
        // Stage 4 and the stochastic term, in the same loop.
        for i in 0..n {
            let k4 = self.deterministic_rhs(i, &self.aux_old);
            let combined = field.as_slice()[i]
                + dts * (self.k1[i] + 2.0 * (self.k2[i] + self.k3[i]) + k4);
            self.commit_cell(i, combined, stream)?;
        }
        Ok(())
    }
}

impl StepperBuilder {
    /// Set the reaction/diffusion/noise coefficients.
    pub fn coefficients(mut self, coefficients: Coefficients) -> Self {
        self.coefficients = Some(coefficients);
        self
    }

    /// Set the cell spacing `dx`. Must be finite and > 0.
    pub fn dx(mut self, dx: f64) -> Self {
        self.dx = Some(dx);
        self
    }

    /// Set the time step `dt`. Must be finite and > 0.
    pub fn dt(mut self, dt: f64) -> Self {
        self.dt = Some(dt);
        self
    }

    /// Set the integration method (default: 4th-order Runge–Kutta).
    pub fn method(mut self, method: IntegrationMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the noise distribution (default: Gaussian).
    pub fn noise_kind(mut self, kind: NoiseKind) -> Self {
        self.noise_kind = kind;
        self
    }

    /// Build the stepper against `grid`, snapshotting its neighbour table
    /// and allocating all scratch buffers.
    ///
    /// # Errors
    ///
    /// Returns `Err` if:
    /// - `coefficients`, `dx`, or `dt` is not set
    /// - `dx` or `dt` is non-finite or <= 0
    /// - the coefficients fail [`Coefficients::validate`]
    pub fn build(self, grid: &dyn Grid) -> Result<ReactionDiffusionStepper, String> {
        let coeffs = self
            .coefficients
            .ok_or_else(|| "coefficients are required".to_string())?;
        let dx = self.dx.ok_or_else(|| "dx is required".to_string())?;
        let dt = self.dt.ok_or_else(|| "dt is required".to_string())?;

        if !dx.is_finite() || dx <= 0.0 {
            return Err(format!("dx must be finite and > 0, got {dx}"));
        }
        if !dt.is_finite() || dt <= 0.0 {
            return Err(format!("dt must be finite and > 0, got {dt}"));
        }
        coeffs.validate()?;

        let n = grid.cell_count();
        Ok(ReactionDiffusionStepper {
            coeffs,
            dt,
            diffusion_scaled: coeffs.diffusion / (dx * dx),
            method: self.method,
            noise_kind: self.noise_kind,
            neighbours: grid.neighbour_table(),
            degree: grid.degree(),
            next: vec![0.0; n],
            k1: vec![0.0; n],
            k2: vec![0.0; n],
            k3: vec![0.0; n],
            aux_old: vec![0.0; n],
            aux_new: vec![0.0; n],
        })
    }
}
