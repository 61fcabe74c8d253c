//! Error types for lattice construction and neighbour queries.

use perc_core::Coord;
use std::error::Error;
use std::fmt;

/// Errors arising from lattice construction or coordinate queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Attempted to construct a lattice with a zero-length axis.
    EmptyAxis {
        /// Name of the offending axis.
        axis: &'static str,
    },
    /// An axis length does not fit in `i32` coordinate arithmetic.
    AxisTooLarge {
        /// Name of the offending axis.
        axis: &'static str,
        /// The configured length.
        len: u32,
        /// The maximum allowed length.
        max: u32,
    },
    /// A coordinate is outside the bounds of the lattice.
    CoordOutOfBounds {
        /// The offending coordinate.
        coord: Coord,
        /// Human-readable description of the valid range.
        bounds: String,
    },
    /// An axis index exceeds the lattice dimensionality.
    AxisOutOfRange {
        /// The requested axis.
        axis: usize,
        /// Number of axes the lattice has.
        ndim: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyAxis { axis } => {
                write!(f, "axis '{axis}' must have at least one cell")
            }
            Self::AxisTooLarge { axis, len, max } => {
                write!(f, "axis '{axis}' length {len} exceeds maximum {max}")
            }
            Self::CoordOutOfBounds { coord, bounds } => {
                write!(f, "coordinate {coord:?} out of bounds: {bounds}")
            }
            Self::AxisOutOfRange { axis, ndim } => {
                write!(f, "axis {axis} out of range for a {ndim}-D lattice")
            }
        }
    }
}

impl Error for GridError {}
