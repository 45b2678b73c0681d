use crate::{vec2f, FT, V2};

/// Regular sampling grid covering the viewport, used for vector-field
/// visualization. Independent of particle density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldGrid {
    pub rows: usize,
    pub cols: usize,
    pub cell_width: FT,
    pub cell_height: FT,
}

/// Derives the grid from the viewport and a desired column count.
///
/// The row count is `ceil(desired_columns * height / width)` so the grid always
/// covers the full vertical extent; cells are therefore not exactly square.
/// This geometry must be computed once per configuration and passed unchanged
/// into both engine construction and gradient marshaling.
///
/// The viewport dimensions come from the host window and must be positive;
/// the validated configuration parameters do not include them.
pub fn sampling_grid(viewport_width: FT, viewport_height: FT, desired_columns: usize) -> FieldGrid {
    debug_assert!(
        viewport_width > 0. && viewport_height > 0.,
        "viewport must be positive, got {}x{}",
        viewport_width,
        viewport_height
    );

    let rows = (desired_columns as FT * viewport_height / viewport_width).ceil() as usize;
    FieldGrid {
        rows,
        cols: desired_columns,
        cell_width: viewport_width / desired_columns as FT,
        cell_height: viewport_height / rows as FT,
    }
}

impl FieldGrid {
    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Center of cell `(row, col)` in viewport coordinates. Vectors are
    /// sampled at cell centers, not corners.
    pub fn cell_center(&self, row: usize, col: usize) -> V2 {
        vec2f(
            (col as FT + 0.5) * self.cell_width,
            (row as FT + 0.5) * self.cell_height,
        )
    }
}
