//! Regular grid layout over the `[-1, 1] x [-1, 1]` viewport square.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Dimensions of a regular grid, counted in cells.
///
/// A grid of `width x height` cells has `(width + 1) x (height + 1)`
/// vertices stored in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Number of cells along X
    pub width: u32,
    /// Number of cells along Y
    pub height: u32,
}

impl GridSpec {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Vertices per row.
    pub fn columns(&self) -> u32 {
        self.width + 1
    }

    /// Number of vertex rows.
    pub fn rows(&self) -> u32 {
        self.height + 1
    }

    /// Total number of grid vertices.
    pub fn vertex_count(&self) -> usize {
        (self.width as usize + 1) * (self.height as usize + 1)
    }

    /// Whether every vertex index fits in a `u32` index buffer.
    pub fn fits_u32_indices(&self) -> bool {
        (self.width as u64 + 1) * (self.height as u64 + 1) <= u32::MAX as u64
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Two triangles per cell.
    pub fn triangle_count(&self) -> usize {
        self.cell_count() * 2
    }

    /// Get the 1D vertex index for a 2D grid position.
    pub fn flat_index(&self, row: u32, col: u32) -> u32 {
        row * self.columns() + col
    }

    /// Viewport position of the vertex at `(row, col)`.
    pub fn position(&self, row: u32, col: u32) -> [f32; 2] {
        [
            -1.0 + 2.0 * col as f32 / self.width as f32,
            -1.0 + 2.0 * row as f32 / self.height as f32,
        ]
    }

    /// Check if the grid has no cells.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A colored grid vertex, laid out for direct upload as vertex data.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GridPoint {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl GridPoint {
    pub fn new(position: [f32; 2], color: [f32; 4]) -> Self {
        Self { position, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts() {
        let grid = GridSpec::new(4, 3);
        assert_eq!(grid.columns(), 5);
        assert_eq!(grid.rows(), 4);
        assert_eq!(grid.vertex_count(), 20);
        assert_eq!(grid.cell_count(), 12);
        assert_eq!(grid.triangle_count(), 24);
    }

    #[test]
    fn test_flat_index_row_major() {
        let grid = GridSpec::new(4, 3);
        assert_eq!(grid.flat_index(0, 0), 0);
        assert_eq!(grid.flat_index(0, 4), 4);
        assert_eq!(grid.flat_index(1, 0), 5);
        assert_eq!(grid.flat_index(3, 4), 19);
    }

    #[test]
    fn test_position_corners() {
        let grid = GridSpec::new(2, 2);
        assert_eq!(grid.position(0, 0), [-1.0, -1.0]);
        assert_eq!(grid.position(1, 1), [0.0, 0.0]);
        assert_eq!(grid.position(2, 2), [1.0, 1.0]);
        assert_eq!(grid.position(0, 2), [1.0, -1.0]);
    }

    #[test]
    fn test_u32_index_capacity() {
        assert!(GridSpec::new(500, 500).fits_u32_indices());
        // 65536 * 65536 vertices is one more than u32::MAX
        assert!(!GridSpec::new(65535, 65535).fits_u32_indices());
        assert!(!GridSpec::new(u32::MAX, 1).fits_u32_indices());
    }

    #[test]
    fn test_grid_point_layout() {
        assert_eq!(std::mem::size_of::<GridPoint>(), 24);
        let points = [GridPoint::new([1.0, 2.0], [0.0, 0.0, 1.0, 1.0])];
        let bytes: &[u8] = bytemuck::cast_slice(&points);
        assert_eq!(bytes.len(), 24);
    }
}
