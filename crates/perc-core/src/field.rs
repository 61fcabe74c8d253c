//! The per-cell density field.

/// Dense per-cell scalar densities, one `f64` per lattice cell.
///
/// The field is allocated once at initialization time and never resized.
/// Cells are stored in canonical (row-major) order; the owning simulation
/// mutates the field exclusively through the stepper, which commits a full
/// epoch at a time via [`swap_buffer`](DensityField::swap_buffer).
#[derive(Clone, Debug, PartialEq)]
pub struct DensityField {
    cells: Vec<f64>,
}

impl DensityField {
    /// Create a field of `cell_count` cells, all zero.
    pub fn zeroed(cell_count: usize) -> Self {
        Self {
            cells: vec![0.0; cell_count],
        }
    }

    /// Create a field from existing per-cell values.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { cells: values }
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the field has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read-only view of the cell values in canonical order.
    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    /// Mutable view of the cell values in canonical order.
    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.cells
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f64) {
        self.cells.fill(value);
    }

    /// Arithmetic mean of all cell densities. Returns 0.0 for an empty field.
    pub fn mean(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.cells.iter().sum::<f64>() / self.cells.len() as f64
    }

    /// Index of the first non-finite cell value, if any.
    pub fn first_non_finite(&self) -> Option<usize> {
        self.cells.iter().position(|v| !v.is_finite())
    }

    /// Swap the cell storage with `buffer` in O(1).
    ///
    /// This is the commit point of the read-old/write-new double-buffer
    /// discipline: the stepper computes a full epoch into its own buffer
    /// and swaps it in only once every cell has been checked.
    pub fn swap_buffer(&mut self, buffer: &mut Vec<f64>) {
        debug_assert_eq!(self.cells.len(), buffer.len());
        std::mem::swap(&mut self.cells, buffer);
    }
}
