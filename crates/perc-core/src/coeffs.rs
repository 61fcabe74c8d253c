//! Reaction, diffusion, and noise coefficients for the lattice Langevin
//! equation.

/// Coefficients of the contact-process Langevin equation
/// `∂ρ/∂t = linear·ρ − quadratic·ρ² + diffusion·∇²ρ + noise·ξ`.
///
/// `linear` and `quadratic` may take either sign (a negative `linear` rate
/// models net local death); `diffusion` and `noise` are amplitudes and must
/// be non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    /// Linear growth rate of the reaction term.
    pub linear: f64,
    /// Quadratic self-limitation rate of the reaction term.
    pub quadratic: f64,
    /// Diffusion coefficient, `>= 0`.
    pub diffusion: f64,
    /// Noise amplitude, `>= 0`.
    pub noise: f64,
}

impl Coefficients {
    /// Validate all coefficients.
    ///
    /// # Errors
    ///
    /// Returns `Err` if any coefficient is non-finite, or if `diffusion`
    /// or `noise` is negative.
    pub fn validate(&self) -> Result<(), String> {
        if !self.linear.is_finite() {
            return Err(format!("linear must be finite, got {}", self.linear));
        }
        if !self.quadratic.is_finite() {
            return Err(format!("quadratic must be finite, got {}", self.quadratic));
        }
        if !self.diffusion.is_finite() || self.diffusion < 0.0 {
            return Err(format!(
                "diffusion must be finite and >= 0, got {}",
                self.diffusion
            ));
        }
        if !self.noise.is_finite() || self.noise < 0.0 {
            return Err(format!(
                "noise must be finite and >= 0, got {}",
                self.noise
            ));
        }
        Ok(())
    }
}
