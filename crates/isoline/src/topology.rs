//! Fixed triangulation of the vertex grid.
//!
//! The triangle list depends only on the grid dimensions, so it is built
//! once and shared read-only by every frame.

use field_common::GridSpec;
use tracing::debug;

/// Triangle index triples for a rectangular grid, two per cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTopology {
    grid: GridSpec,
    triangles: Vec<[u32; 3]>,
}

impl GridTopology {
    /// Triangulate a `width x height` cell grid.
    ///
    /// For each cell the corners are
    /// - `lti = row * (W + 1) + col`
    /// - `lbi = row * (W + 1) + col + 1`
    /// - `rti = (row + 1) * (W + 1) + col`
    /// - `rbi = (row + 1) * (W + 1) + col + 1`
    ///
    /// and the emitted triangles are `(lti, lbi, rti)` then `(rti, lbi, rbi)`.
    pub fn build(grid: GridSpec) -> Self {
        let mut triangles = Vec::with_capacity(grid.triangle_count());

        for row in 0..grid.height {
            for col in 0..grid.width {
                let lti = grid.flat_index(row, col);
                let rti = grid.flat_index(row + 1, col);
                let lbi = grid.flat_index(row, col + 1);
                let rbi = grid.flat_index(row + 1, col + 1);

                triangles.push([lti, lbi, rti]);
                triangles.push([rti, lbi, rbi]);
            }
        }

        debug!(
            width = grid.width,
            height = grid.height,
            triangles = triangles.len(),
            "Built grid topology"
        );

        Self { grid, triangles }
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles
    }

    /// Flat index list for a filled-triangle draw.
    pub fn indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.triangles)
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_cell() {
        let topology = GridTopology::build(GridSpec::new(1, 1));
        assert_eq!(topology.triangles(), &[[0, 1, 2], [2, 1, 3]]);
        assert_eq!(topology.indices(), &[0, 1, 2, 2, 1, 3]);
    }

    #[test]
    fn test_empty_grid() {
        let topology = GridTopology::build(GridSpec::new(0, 5));
        assert_eq!(topology.triangle_count(), 0);
        assert!(topology.indices().is_empty());
    }
}
