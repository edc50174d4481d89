//! Common fixtures for isoline tests.

use field_common::{FieldConfig, GridPoint, GridSpec};

/// Configuration with the given grid size and the default bands and
/// threshold (`min=-2`, `change=0`, `max=2`, `threshold=0`).
pub fn small_config(width: u32, height: u32) -> FieldConfig {
    FieldConfig {
        grid_width: width,
        grid_height: height,
        ..FieldConfig::default()
    }
}

/// Uncolored grid points at the viewport positions of `grid`.
pub fn grid_points(grid: GridSpec) -> Vec<GridPoint> {
    let mut points = Vec::with_capacity(grid.vertex_count());
    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            points.push(GridPoint::new(grid.position(row, col), [0.0; 4]));
        }
    }
    points
}

/// Grid sizes used by extraction tests, from a single cell to a typical
/// display resolution.
pub const GRID_SIZES: [(u32, u32); 5] = [(1, 1), (2, 2), (3, 5), (16, 9), (100, 100)];
