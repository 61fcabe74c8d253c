//! Shared invariant checks run against every lattice backend.
//!
//! Each backend's test module calls [`run_full_compliance`] on a few
//! representative instances, so the [`Grid`] contract is enforced in one
//! place instead of being re-stated per backend.

use crate::grid::{AxisDir, Grid};

/// Run the full compliance suite against a lattice.
///
/// Panics (via `assert!`) on the first violated invariant.
pub(crate) fn run_full_compliance(grid: &dyn Grid) {
    check_neighbours_in_bounds(grid);
    check_degree_constant(grid);
    check_symmetry_with_multiplicity(grid);
    check_laplacian_conservation(grid);
    check_rank_roundtrip(grid);
    check_axis_api_consistency(grid);
}

/// Neighbour lookups never resolve outside `[0, cell_count)`.
fn check_neighbours_in_bounds(grid: &dyn Grid) {
    for cell in 0..grid.cell_count() {
        for nb in grid.neighbours_flat(cell) {
            assert!(
                nb < grid.cell_count(),
                "neighbour {nb} of cell {cell} out of bounds"
            );
        }
    }
}

/// Every cell has exactly `degree()` neighbour slots.
fn check_degree_constant(grid: &dyn Grid) {
    for cell in 0..grid.cell_count() {
        assert_eq!(
            grid.neighbours_flat(cell).len(),
            grid.degree(),
            "cell {cell} does not have the full neighbour degree"
        );
    }
}

/// If `j` appears in `N(i)` then `i` appears in `N(j)`.
fn check_symmetry_with_multiplicity(grid: &dyn Grid) {
    for cell in 0..grid.cell_count() {
        for nb in grid.neighbours_flat(cell) {
            assert!(
                grid.neighbours_flat(nb).contains(&cell),
                "neighbour symmetry violated between cells {cell} and {nb}"
            );
        }
    }
}

/// Summed over the lattice, each cell appears in exactly `degree()`
/// neighbour slots. This is the property that makes the discrete Laplacian
/// conserve the field sum under both edge rules.
fn check_laplacian_conservation(grid: &dyn Grid) {
    let mut appearances = vec![0usize; grid.cell_count()];
    for cell in 0..grid.cell_count() {
        for nb in grid.neighbours_flat(cell) {
            appearances[nb] += 1;
        }
    }
    for (cell, &count) in appearances.iter().enumerate() {
        assert_eq!(
            count,
            grid.degree(),
            "cell {cell} appears in {count} neighbour slots"
        );
    }
}

/// `rank` and `coord_of` are inverse over the canonical ordering.
fn check_rank_roundtrip(grid: &dyn Grid) {
    for rank in 0..grid.cell_count() {
        let coord = grid.coord_of(rank);
        assert_eq!(
            grid.rank(&coord),
            Some(rank),
            "rank roundtrip failed at {rank}"
        );
    }
}

/// The per-axis `neighbour()` contract agrees with `neighbours_flat()`:
/// slot `2 * axis + dir` of the flat list is the same cell.
fn check_axis_api_consistency(grid: &dyn Grid) {
    for cell in 0..grid.cell_count() {
        let coord = grid.coord_of(cell);
        let flat = grid.neighbours_flat(cell);
        for axis in 0..grid.ndim() {
            for (offset, dir) in [(0, AxisDir::Minus), (1, AxisDir::Plus)] {
                let nb = grid
                    .neighbour(&coord, axis, dir)
                    .expect("valid coord and axis");
                assert_eq!(
                    grid.rank(&nb),
                    Some(flat[2 * axis + offset]),
                    "axis API disagrees with flat neighbours at cell {cell}, axis {axis}"
                );
            }
        }
    }
}
