//! 2-D 4-connected grid lattice with per-axis edge rules.

use crate::edge::EdgeRule;
use crate::error::GridError;
use crate::grid::{AxisDir, Grid};
use perc_core::Coord;
use smallvec::{smallvec, SmallVec};

/// A two-dimensional grid with 4-connected neighbourhood (N/S/W/E).
///
/// Each cell has coordinate `[row, col]` where `0 <= row < rows` and
/// `0 <= col < cols`; the flat index is `row * cols + col` (row-major over
/// axes — the documented order of density snapshots).
///
/// The edge rule is configurable per axis, so besides the fully floating
/// plane and the fully periodic torus the lattice also expresses mixed
/// topologies (a cylinder wraps one axis and floats the other).
///
/// # Examples
///
/// ```
/// use perc_grid::{EdgeRule, Grid, Lattice2D};
///
/// let plane = Lattice2D::new(4, 4, EdgeRule::Floating).unwrap();
/// assert_eq!(plane.cell_count(), 16);
/// assert_eq!(plane.degree(), 4);
///
/// // A floating corner lists itself once per clamped axis.
/// assert_eq!(plane.neighbours_flat(0).as_slice(), &[0, 4, 0, 1]);
///
/// // A torus wraps both axes.
/// let torus = Lattice2D::new(4, 4, EdgeRule::Wrap).unwrap();
/// assert_eq!(torus.neighbours_flat(0).as_slice(), &[12, 4, 3, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Lattice2D {
    rows: u32,
    cols: u32,
    row_rule: EdgeRule,
    col_rule: EdgeRule,
}

impl Lattice2D {
    /// Maximum dimension size: coordinates use `i32`, so each axis must fit.
    pub const MAX_DIM: u32 = i32::MAX as u32;

    /// Create a `rows × cols` grid with the same edge rule on both axes.
    ///
    /// # Errors
    ///
    /// Returns `Err(GridError::EmptyAxis)` if either dimension is 0, or
    /// `Err(GridError::AxisTooLarge)` if either exceeds `i32::MAX`.
    pub fn new(rows: u32, cols: u32, edge: EdgeRule) -> Result<Self, GridError> {
        Self::with_axis_rules(rows, cols, edge, edge)
    }

    /// Create a `rows × cols` grid with independent edge rules per axis.
    ///
    /// `row_rule` governs lookups that leave the grid along the row axis
    /// (top/bottom edges), `col_rule` along the column axis (left/right
    /// edges). Wrapping one axis and floating the other yields a cylinder.
    pub fn with_axis_rules(
        rows: u32,
        cols: u32,
        row_rule: EdgeRule,
        col_rule: EdgeRule,
    ) -> Result<Self, GridError> {
        if rows == 0 {
            return Err(GridError::EmptyAxis { axis: "rows" });
        }
        if cols == 0 {
            return Err(GridError::EmptyAxis { axis: "cols" });
        }
        if rows > Self::MAX_DIM {
            return Err(GridError::AxisTooLarge {
                axis: "rows",
                len: rows,
                max: Self::MAX_DIM,
            });
        }
        if cols > Self::MAX_DIM {
            return Err(GridError::AxisTooLarge {
                axis: "cols",
                len: cols,
                max: Self::MAX_DIM,
            });
        }
        Ok(Self {
            rows,
            cols,
            row_rule,
            col_rule,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Check that `coord` is a valid `[row, col]` coordinate of this grid.
    fn check_coord(&self, coord: &Coord) -> Result<(i32, i32), GridError> {
        if coord.len() != 2 {
            return Err(GridError::CoordOutOfBounds {
                coord: coord.clone(),
                bounds: format!("expected 2-D coordinate, got {}-D", coord.len()),
            });
        }
        let (r, c) = (coord[0], coord[1]);
        if r < 0 || r >= self.rows as i32 || c < 0 || c >= self.cols as i32 {
            return Err(GridError::CoordOutOfBounds {
                coord: coord.clone(),
                bounds: format!("[0, {}) x [0, {})", self.rows, self.cols),
            });
        }
        Ok((r, c))
    }
}

impl Grid for Lattice2D {
    fn ndim(&self) -> usize {
        2
    }

    fn extent(&self) -> SmallVec<[u32; 2]> {
        smallvec![self.rows, self.cols]
    }

    fn cell_count(&self) -> usize {
        (self.rows as usize) * (self.cols as usize)
    }

    fn edge_rule(&self, axis: usize) -> Result<EdgeRule, GridError> {
        match axis {
            0 => Ok(self.row_rule),
            1 => Ok(self.col_rule),
            _ => Err(GridError::AxisOutOfRange { axis, ndim: 2 }),
        }
    }

    fn neighbour(&self, coord: &Coord, axis: usize, dir: AxisDir) -> Result<Coord, GridError> {
        let (r, c) = self.check_coord(coord)?;
        let step = match dir {
            AxisDir::Minus => -1,
            AxisDir::Plus => 1,
        };
        match axis {
            0 => {
                let nr = self.row_rule.resolve(r + step, self.rows as i32);
                Ok(smallvec![nr, c])
            }
            1 => {
                let nc = self.col_rule.resolve(c + step, self.cols as i32);
                Ok(smallvec![r, nc])
            }
            _ => Err(GridError::AxisOutOfRange { axis, ndim: 2 }),
        }
    }

    fn neighbours_flat(&self, cell: usize) -> SmallVec<[usize; 4]> {
        let cols = self.cols as usize;
        let r = (cell / cols) as i32;
        let c = (cell % cols) as i32;
        let rows_i = self.rows as i32;
        let cols_i = self.cols as i32;

        let up = self.row_rule.resolve(r - 1, rows_i);
        let down = self.row_rule.resolve(r + 1, rows_i);
        let left = self.col_rule.resolve(c - 1, cols_i);
        let right = self.col_rule.resolve(c + 1, cols_i);

        smallvec![
            up as usize * cols + c as usize,
            down as usize * cols + c as usize,
            r as usize * cols + left as usize,
            r as usize * cols + right as usize,
        ]
    }

    fn rank(&self, coord: &Coord) -> Option<usize> {
        self.check_coord(coord)
            .ok()
            .map(|(r, c)| r as usize * self.cols as usize + c as usize)
    }

    fn coord_of(&self, rank: usize) -> Coord {
        debug_assert!(rank < self.cell_count());
        let cols = self.cols as usize;
        smallvec![(rank / cols) as i32, (rank % cols) as i32]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use proptest::prelude::*;

    fn c(r: i32, col: i32) -> Coord {
        smallvec![r, col]
    }

    // ── Neighbour tests ─────────────────────────────────────────

    #[test]
    fn neighbours_interior() {
        let s = Lattice2D::new(3, 3, EdgeRule::Floating).unwrap();
        // Center cell (1,1) = flat 4: up=1, down=7, left=3, right=5.
        assert_eq!(s.neighbours_flat(4).as_slice(), &[1, 7, 3, 5]);
    }

    #[test]
    fn neighbours_floating_corner_self_loops() {
        let s = Lattice2D::new(3, 3, EdgeRule::Floating).unwrap();
        // Corner (0,0): up clamps to itself, left clamps to itself.
        assert_eq!(s.neighbours_flat(0).as_slice(), &[0, 3, 0, 1]);
        // Corner (2,2) = flat 8: down clamps, right clamps.
        assert_eq!(s.neighbours_flat(8).as_slice(), &[5, 8, 7, 8]);
    }

    #[test]
    fn neighbours_wrap_corner() {
        let s = Lattice2D::new(3, 3, EdgeRule::Wrap).unwrap();
        // Corner (0,0): up wraps to (2,0)=6, left wraps to (0,2)=2.
        assert_eq!(s.neighbours_flat(0).as_slice(), &[6, 3, 2, 1]);
    }

    #[test]
    fn neighbours_cylinder_mixed_rules() {
        // Wrap columns, float rows: a cylinder around the column axis.
        let s = Lattice2D::with_axis_rules(3, 4, EdgeRule::Floating, EdgeRule::Wrap).unwrap();
        // Cell (0,0): up floats to itself, left wraps to (0,3)=3.
        assert_eq!(s.neighbours_flat(0).as_slice(), &[0, 4, 3, 1]);
        // Cell (2,3) = flat 11: down floats to itself, right wraps to (2,0)=8.
        assert_eq!(s.neighbours_flat(11).as_slice(), &[7, 11, 10, 8]);
    }

    // ── Axis neighbour contract ─────────────────────────────────

    #[test]
    fn neighbour_axis_api_matches_flat() {
        let s = Lattice2D::with_axis_rules(4, 5, EdgeRule::Wrap, EdgeRule::Floating).unwrap();
        for cell in 0..s.cell_count() {
            let coord = s.coord_of(cell);
            let flat = s.neighbours_flat(cell);
            let lookups = [
                (0, AxisDir::Minus),
                (0, AxisDir::Plus),
                (1, AxisDir::Minus),
                (1, AxisDir::Plus),
            ];
            for (slot, (axis, dir)) in lookups.into_iter().enumerate() {
                let nb = s.neighbour(&coord, axis, dir).unwrap();
                assert_eq!(s.rank(&nb), Some(flat[slot]));
            }
        }
    }

    #[test]
    fn neighbour_rejects_bad_inputs() {
        let s = Lattice2D::new(3, 3, EdgeRule::Wrap).unwrap();
        assert!(matches!(
            s.neighbour(&c(0, 0), 2, AxisDir::Plus),
            Err(GridError::AxisOutOfRange { .. })
        ));
        assert!(matches!(
            s.neighbour(&c(3, 0), 0, AxisDir::Plus),
            Err(GridError::CoordOutOfBounds { .. })
        ));
        assert!(matches!(
            s.neighbour(&smallvec![1], 0, AxisDir::Plus),
            Err(GridError::CoordOutOfBounds { .. })
        ));
    }

    // ── Rank / coord roundtrip ──────────────────────────────────

    #[test]
    fn rank_is_row_major() {
        let s = Lattice2D::new(3, 4, EdgeRule::Floating).unwrap();
        assert_eq!(s.rank(&c(0, 0)), Some(0));
        assert_eq!(s.rank(&c(0, 3)), Some(3));
        assert_eq!(s.rank(&c(1, 0)), Some(4));
        assert_eq!(s.rank(&c(2, 3)), Some(11));
        assert_eq!(s.rank(&c(3, 0)), None);
    }

    #[test]
    fn rank_roundtrip() {
        let s = Lattice2D::new(3, 4, EdgeRule::Wrap).unwrap();
        for rank in 0..s.cell_count() {
            assert_eq!(s.rank(&s.coord_of(rank)), Some(rank));
        }
    }

    // ── Constructor tests ───────────────────────────────────────

    #[test]
    fn edge_rule_accessor_is_per_axis() {
        let s = Lattice2D::with_axis_rules(3, 4, EdgeRule::Floating, EdgeRule::Wrap).unwrap();
        assert_eq!(s.edge_rule(0), Ok(EdgeRule::Floating));
        assert_eq!(s.edge_rule(1), Ok(EdgeRule::Wrap));
        assert!(matches!(
            s.edge_rule(2),
            Err(GridError::AxisOutOfRange { .. })
        ));
    }

    #[test]
    fn new_rejects_empty_axes() {
        assert!(matches!(
            Lattice2D::new(0, 3, EdgeRule::Floating),
            Err(GridError::EmptyAxis { axis: "rows" })
        ));
        assert!(matches!(
            Lattice2D::new(3, 0, EdgeRule::Floating),
            Err(GridError::EmptyAxis { axis: "cols" })
        ));
    }

    #[test]
    fn new_rejects_oversized_axes() {
        assert!(matches!(
            Lattice2D::new(i32::MAX as u32 + 1, 3, EdgeRule::Wrap),
            Err(GridError::AxisTooLarge { axis: "rows", .. })
        ));
    }

    // ── Compliance suites ───────────────────────────────────────

    #[test]
    fn compliance_floating() {
        let s = Lattice2D::new(5, 7, EdgeRule::Floating).unwrap();
        compliance::run_full_compliance(&s);
    }

    #[test]
    fn compliance_wrap() {
        let s = Lattice2D::new(5, 7, EdgeRule::Wrap).unwrap();
        compliance::run_full_compliance(&s);
    }

    #[test]
    fn compliance_cylinder() {
        let s = Lattice2D::with_axis_rules(5, 7, EdgeRule::Wrap, EdgeRule::Floating).unwrap();
        compliance::run_full_compliance(&s);
    }

    // ── Property tests ──────────────────────────────────────────

    fn arb_edge() -> impl Strategy<Value = EdgeRule> {
        prop_oneof![Just(EdgeRule::Floating), Just(EdgeRule::Wrap)]
    }

    proptest! {
        #[test]
        fn neighbours_always_in_bounds(
            rows in 1u32..16,
            cols in 1u32..16,
            row_rule in arb_edge(),
            col_rule in arb_edge(),
            cell in 0usize..256,
        ) {
            let s = Lattice2D::with_axis_rules(rows, cols, row_rule, col_rule).unwrap();
            let cell = cell % s.cell_count();
            for nb in s.neighbours_flat(cell) {
                prop_assert!(nb < s.cell_count());
            }
        }

        #[test]
        fn neighbours_symmetric_with_multiplicity(
            rows in 1u32..16,
            cols in 1u32..16,
            row_rule in arb_edge(),
            col_rule in arb_edge(),
            cell in 0usize..256,
        ) {
            let s = Lattice2D::with_axis_rules(rows, cols, row_rule, col_rule).unwrap();
            let cell = cell % s.cell_count();
            for nb in s.neighbours_flat(cell) {
                let back = s.neighbours_flat(nb);
                prop_assert!(back.contains(&cell));
            }
        }
    }
}
