//! The epoch counter and the [`Coord`] type alias.

use smallvec::SmallVec;
use std::fmt;

/// Monotonically increasing epoch counter.
///
/// Epoch 0 is the initial condition; each integration step advances the
/// counter by exactly one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EpochId(pub u64);

impl fmt::Display for EpochId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EpochId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// A coordinate on the simulation lattice.
///
/// Uses `SmallVec<[i32; 2]>` so both supported dimensionalities (1-D and
/// 2-D) stay on the stack.
pub type Coord = SmallVec<[i32; 2]>;
