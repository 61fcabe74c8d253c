//! 1-D chain lattice with configurable edge rule.

use crate::edge::EdgeRule;
use crate::error::GridError;
use crate::grid::{AxisDir, Grid};
use perc_core::Coord;
use smallvec::{smallvec, SmallVec};

/// A one-dimensional chain of cells.
///
/// Each cell has coordinate `[i]` where `0 <= i < len`; the flat index is
/// `i` itself. Every cell has exactly two neighbour slots (left, right);
/// how the end cells fill theirs is controlled by [`EdgeRule`].
///
/// # Examples
///
/// ```
/// use perc_grid::{EdgeRule, Grid, Lattice1D};
///
/// let chain = Lattice1D::new(5, EdgeRule::Floating).unwrap();
/// assert_eq!(chain.ndim(), 1);
/// assert_eq!(chain.cell_count(), 5);
/// assert_eq!(chain.degree(), 2);
///
/// // Interior cell.
/// assert_eq!(chain.neighbours_flat(2).as_slice(), &[1, 3]);
/// // Floating left end: the missing neighbour is the cell itself.
/// assert_eq!(chain.neighbours_flat(0).as_slice(), &[0, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Lattice1D {
    len: u32,
    edge: EdgeRule,
}

impl Lattice1D {
    /// Maximum length: coordinates use `i32`, so `len` must fit.
    pub const MAX_LEN: u32 = i32::MAX as u32;

    /// Create a chain of `len` cells with the given edge rule.
    ///
    /// # Errors
    ///
    /// Returns `Err(GridError::EmptyAxis)` if `len == 0`, or
    /// `Err(GridError::AxisTooLarge)` if `len > i32::MAX`.
    pub fn new(len: u32, edge: EdgeRule) -> Result<Self, GridError> {
        if len == 0 {
            return Err(GridError::EmptyAxis { axis: "len" });
        }
        if len > Self::MAX_LEN {
            return Err(GridError::AxisTooLarge {
                axis: "len",
                len,
                max: Self::MAX_LEN,
            });
        }
        Ok(Self { len, edge })
    }

    /// Number of cells.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Always returns `false` — construction rejects `len == 0`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Check that `coord` is a valid 1-D coordinate of this chain.
    fn check_coord(&self, coord: &Coord) -> Result<i32, GridError> {
        if coord.len() != 1 {
            return Err(GridError::CoordOutOfBounds {
                coord: coord.clone(),
                bounds: format!("expected 1-D coordinate, got {}-D", coord.len()),
            });
        }
        let i = coord[0];
        if i < 0 || i >= self.len as i32 {
            return Err(GridError::CoordOutOfBounds {
                coord: coord.clone(),
                bounds: format!("[0, {})", self.len),
            });
        }
        Ok(i)
    }
}

impl Grid for Lattice1D {
    fn ndim(&self) -> usize {
        1
    }

    fn extent(&self) -> SmallVec<[u32; 2]> {
        smallvec![self.len]
    }

    fn cell_count(&self) -> usize {
        self.len as usize
    }

    fn edge_rule(&self, axis: usize) -> Result<EdgeRule, GridError> {
        if axis != 0 {
            return Err(GridError::AxisOutOfRange { axis, ndim: 1 });
        }
        Ok(self.edge)
    }

    fn neighbour(&self, coord: &Coord, axis: usize, dir: AxisDir) -> Result<Coord, GridError> {
        if axis != 0 {
            return Err(GridError::AxisOutOfRange { axis, ndim: 1 });
        }
        let i = self.check_coord(coord)?;
        let step = match dir {
            AxisDir::Minus => -1,
            AxisDir::Plus => 1,
        };
        let n = self.edge.resolve(i + step, self.len as i32);
        Ok(smallvec![n])
    }

    fn neighbours_flat(&self, cell: usize) -> SmallVec<[usize; 4]> {
        let i = cell as i32;
        let n = self.len as i32;
        let left = self.edge.resolve(i - 1, n);
        let right = self.edge.resolve(i + 1, n);
        smallvec![left as usize, right as usize]
    }

    fn rank(&self, coord: &Coord) -> Option<usize> {
        self.check_coord(coord).ok().map(|i| i as usize)
    }

    fn coord_of(&self, rank: usize) -> Coord {
        debug_assert!(rank < self.cell_count());
        smallvec![rank as i32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn c(i: i32) -> Coord {
        smallvec![i]
    }

    // ── Neighbour tests ─────────────────────────────────────────

    #[test]
    fn neighbours_floating_interior() {
        let s = Lattice1D::new(5, EdgeRule::Floating).unwrap();
        assert_eq!(s.neighbours_flat(2).as_slice(), &[1, 3]);
    }

    #[test]
    fn neighbours_floating_ends_self_loop() {
        let s = Lattice1D::new(5, EdgeRule::Floating).unwrap();
        assert_eq!(s.neighbours_flat(0).as_slice(), &[0, 1]);
        assert_eq!(s.neighbours_flat(4).as_slice(), &[3, 4]);
    }

    #[test]
    fn neighbours_wrap_ends() {
        let s = Lattice1D::new(5, EdgeRule::Wrap).unwrap();
        assert_eq!(s.neighbours_flat(0).as_slice(), &[4, 1]);
        assert_eq!(s.neighbours_flat(4).as_slice(), &[3, 0]);
    }

    #[test]
    fn neighbours_single_cell() {
        let s = Lattice1D::new(1, EdgeRule::Floating).unwrap();
        assert_eq!(s.neighbours_flat(0).as_slice(), &[0, 0]);
        let s = Lattice1D::new(1, EdgeRule::Wrap).unwrap();
        assert_eq!(s.neighbours_flat(0).as_slice(), &[0, 0]);
    }

    // ── Axis neighbour contract ─────────────────────────────────

    #[test]
    fn neighbour_axis_api_matches_flat() {
        for edge in [EdgeRule::Floating, EdgeRule::Wrap] {
            let s = Lattice1D::new(7, edge).unwrap();
            for i in 0..7 {
                let flat = s.neighbours_flat(i as usize);
                let minus = s.neighbour(&c(i), 0, AxisDir::Minus).unwrap();
                let plus = s.neighbour(&c(i), 0, AxisDir::Plus).unwrap();
                assert_eq!(minus[0] as usize, flat[0]);
                assert_eq!(plus[0] as usize, flat[1]);
            }
        }
    }

    #[test]
    fn neighbour_rejects_bad_axis_and_coord() {
        let s = Lattice1D::new(5, EdgeRule::Wrap).unwrap();
        assert!(matches!(
            s.neighbour(&c(0), 1, AxisDir::Plus),
            Err(GridError::AxisOutOfRange { .. })
        ));
        assert!(matches!(
            s.neighbour(&c(5), 0, AxisDir::Plus),
            Err(GridError::CoordOutOfBounds { .. })
        ));
        assert!(matches!(
            s.neighbour(&smallvec![0, 0], 0, AxisDir::Plus),
            Err(GridError::CoordOutOfBounds { .. })
        ));
    }

    // ── Rank / coord roundtrip ──────────────────────────────────

    #[test]
    fn rank_roundtrip() {
        let s = Lattice1D::new(5, EdgeRule::Floating).unwrap();
        for i in 0..5 {
            assert_eq!(s.rank(&s.coord_of(i)), Some(i));
        }
        assert_eq!(s.rank(&c(-1)), None);
        assert_eq!(s.rank(&c(5)), None);
    }

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn edge_rule_accessor() {
        let s = Lattice1D::new(5, EdgeRule::Wrap).unwrap();
        assert_eq!(s.edge_rule(0), Ok(EdgeRule::Wrap));
        assert!(matches!(
            s.edge_rule(1),
            Err(GridError::AxisOutOfRange { .. })
        ));
    }

    #[test]
    fn new_zero_len_returns_error() {
        assert!(matches!(
            Lattice1D::new(0, EdgeRule::Floating),
            Err(GridError::EmptyAxis { .. })
        ));
    }

    #[test]
    fn new_rejects_len_exceeding_i32_max() {
        assert!(matches!(
            Lattice1D::new(i32::MAX as u32 + 1, EdgeRule::Wrap),
            Err(GridError::AxisTooLarge { .. })
        ));
        assert!(Lattice1D::new(i32::MAX as u32, EdgeRule::Wrap).is_ok());
    }

    // ── Compliance suites ───────────────────────────────────────

    #[test]
    fn compliance_floating() {
        let s = Lattice1D::new(20, EdgeRule::Floating).unwrap();
        compliance::run_full_compliance(&s);
    }

    #[test]
    fn compliance_wrap() {
        let s = Lattice1D::new(20, EdgeRule::Wrap).unwrap();
        compliance::run_full_compliance(&s);
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_edge() -> impl Strategy<Value = EdgeRule> {
        prop_oneof![Just(EdgeRule::Floating), Just(EdgeRule::Wrap)]
    }

    proptest! {
        #[test]
        fn neighbours_always_in_bounds(
            len in 1u32..64,
            edge in arb_edge(),
            i in 0u32..64,
        ) {
            let i = (i % len) as usize;
            let s = Lattice1D::new(len, edge).unwrap();
            for nb in s.neighbours_flat(i) {
                prop_assert!(nb < s.cell_count());
            }
        }

        #[test]
        fn neighbours_symmetric_with_multiplicity(
            len in 1u32..64,
            edge in arb_edge(),
            i in 0u32..64,
        ) {
            let i = (i % len) as usize;
            let s = Lattice1D::new(len, edge).unwrap();
            for nb in s.neighbours_flat(i) {
                let back = s.neighbours_flat(nb);
                prop_assert!(
                    back.contains(&i),
                    "neighbour symmetry violated: {nb} in N({i}) but {i} not in N({nb})",
                );
            }
        }
    }
}
