//! The core [`Grid`] trait.

use crate::edge::EdgeRule;
use crate::error::GridError;
use perc_core::Coord;
use smallvec::SmallVec;

/// Direction of a neighbour lookup along one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisDir {
    /// Towards smaller coordinates.
    Minus,
    /// Towards larger coordinates.
    Plus,
}

/// Central spatial abstraction for perc simulations.
///
/// The stepper and engine consume lattices as `dyn Grid`; the concrete
/// backends ([`Lattice1D`](crate::Lattice1D), [`Lattice2D`](crate::Lattice2D))
/// implement it to define their topology.
///
/// # Invariants
///
/// - neighbour lookups never resolve outside `[0, cell_count())`;
/// - every cell has exactly [`degree`](Grid::degree) neighbour slots,
///   counting multiplicity (a floating edge cell lists itself);
/// - the neighbour relation is symmetric counting multiplicity, so the
///   discrete Laplacian built from [`neighbours_flat`](Grid::neighbours_flat)
///   conserves the field sum under both edge rules.
pub trait Grid: Send + Sync + 'static {
    /// Number of spatial dimensions (1 or 2).
    fn ndim(&self) -> usize;

    /// Per-axis cell counts, ordered by axis.
    fn extent(&self) -> SmallVec<[u32; 2]>;

    /// Total number of cells.
    fn cell_count(&self) -> usize;

    /// Number of neighbour slots per cell: 2 per axis.
    fn degree(&self) -> usize {
        2 * self.ndim()
    }

    /// Edge rule applied along `axis`.
    fn edge_rule(&self, axis: usize) -> Result<EdgeRule, GridError>;

    /// The neighbour of `coord` one step along `axis` in direction `dir`.
    ///
    /// For a wrapping axis the result wraps modulo the axis length; for a
    /// floating axis a lookup past the edge returns `coord` itself.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `coord` is not a valid coordinate of this lattice
    /// or `axis >= ndim()`.
    fn neighbour(&self, coord: &Coord, axis: usize, dir: AxisDir) -> Result<Coord, GridError>;

    /// Flat indices of all neighbours of the cell at flat index `cell`,
    /// ordered `(axis 0 minus, axis 0 plus, axis 1 minus, axis 1 plus)`.
    fn neighbours_flat(&self, cell: usize) -> SmallVec<[usize; 4]>;

    /// Position of `coord` in the canonical row-major ordering.
    fn rank(&self, coord: &Coord) -> Option<usize>;

    /// Coordinate at position `rank` of the canonical row-major ordering.
    ///
    /// # Panics
    ///
    /// May panic if `rank >= cell_count()`.
    fn coord_of(&self, rank: usize) -> Coord;

    /// Precompute the full neighbour table, indexed by flat cell index.
    ///
    /// The stepper snapshots this once at build time so the per-epoch
    /// inner loop performs no topology queries.
    fn neighbour_table(&self) -> Vec<SmallVec<[usize; 4]>> {
        (0..self.cell_count())
            .map(|i| self.neighbours_flat(i))
            .collect()
    }
}
