//! Error type for a single integration step.

use std::error::Error;
use std::fmt;

/// Failure of one integration step.
///
/// A step either commits a full epoch or nothing: both variants are raised
/// before the density field is mutated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepError {
    /// A cell of the input field was NaN or infinite on entry.
    NonFiniteInput {
        /// Flat index of the first offending cell.
        cell: usize,
    },
    /// The update produced a NaN or infinite value.
    NonFiniteOutput {
        /// Flat index of the first offending cell.
        cell: usize,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteInput { cell } => {
                write!(f, "non-finite density at cell {cell} on step entry")
            }
            Self::NonFiniteOutput { cell } => {
                write!(f, "step produced non-finite density at cell {cell}")
            }
        }
    }
}

impl Error for StepError {}
