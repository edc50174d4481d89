//! Isoline extraction using marching triangles.
//!
//! Each triangle of the grid topology is classified by which of its corners
//! lie above the threshold. A triangle with one corner on the other side
//! from the remaining two is crossed by exactly one segment, whose endpoints
//! lie on the two edges touching that corner. Crossing points are memoized
//! per grid edge so the two triangles sharing an edge emit the same vertex.

use std::collections::HashMap;

use field_common::{FieldError, FieldResult, GridPoint};
use tracing::debug;

use crate::field::ScalarField;
use crate::topology::GridTopology;

/// Field differences smaller than this are treated as a flat edge.
pub const CROSSING_EPSILON: f32 = 1e-6;

/// Order-independent identifier of a grid edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    low: u32,
    high: u32,
}

impl EdgeKey {
    /// Canonicalize the vertex pair as `(min, max)`.
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            low: a.min(b),
            high: a.max(b),
        }
    }

    pub fn low(&self) -> u32 {
        self.low
    }

    pub fn high(&self) -> u32 {
        self.high
    }
}

/// A crossing point on a grid edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourVertex {
    /// Position in the dense vertex buffer
    pub index: u32,
    pub position: [f32; 2],
}

/// Per-frame memo of crossing points keyed by grid edge.
///
/// Holds at most one entry per edge. Indices are assigned in first-seen
/// order starting at 0.
#[derive(Debug, Default)]
pub struct ContourPointTable {
    entries: HashMap<EdgeKey, ContourVertex>,
    next_index: u32,
}

impl ContourPointTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the vertex index for `key`, computing its position on first use.
    ///
    /// The boolean is `true` when the entry was created by this call.
    pub fn lookup_or_insert<F>(&mut self, key: EdgeKey, compute: F) -> (u32, bool)
    where
        F: FnOnce() -> [f32; 2],
    {
        if let Some(existing) = self.entries.get(&key) {
            return (existing.index, false);
        }

        let index = self.next_index;
        self.next_index += 1;
        self.entries.insert(
            key,
            ContourVertex {
                index,
                position: compute(),
            },
        );
        (index, true)
    }

    pub fn get(&self, key: &EdgeKey) -> Option<&ContourVertex> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &EdgeKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Flatten into a dense buffer where entry `i` holds the vertex with index `i`.
    pub fn into_vertices(self) -> Vec<[f32; 2]> {
        let mut vertices = vec![[0.0f32; 2]; self.entries.len()];
        for vertex in self.entries.into_values() {
            vertices[vertex.index as usize] = vertex.position;
        }
        vertices
    }
}

/// How the isoline passes through a single triangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleCase {
    /// All corners on the same side of the threshold.
    NoCrossing,
    /// One corner differs from the other two. Positions refer to the
    /// triangle's corner slots (0, 1, 2).
    Minority { minority: usize, others: [usize; 2] },
}

impl TriangleCase {
    /// Classify corner values against `threshold` (above = `value > threshold`).
    pub fn classify(values: [f32; 3], threshold: f32) -> Self {
        let above = values.map(|v| v > threshold);

        match above {
            [a, b, c] if a == b && b == c => TriangleCase::NoCrossing,
            [a, b, _] if a == b => TriangleCase::Minority {
                minority: 2,
                others: [0, 1],
            },
            [a, _, c] if a == c => TriangleCase::Minority {
                minority: 1,
                others: [0, 2],
            },
            _ => TriangleCase::Minority {
                minority: 0,
                others: [1, 2],
            },
        }
    }
}

/// Point on the segment `pa -> pb` where the linearly interpolated field
/// equals `threshold`.
///
/// When the endpoint values are equal within [`CROSSING_EPSILON`], or the
/// fraction is not finite, the result snaps to `pa`.
pub fn crossing_point(pa: [f32; 2], pb: [f32; 2], va: f32, vb: f32, threshold: f32) -> [f32; 2] {
    if (vb - va).abs() < CROSSING_EPSILON {
        return pa;
    }

    let t = (threshold - va) / (vb - va);
    if !t.is_finite() {
        return pa;
    }
    let t = t.clamp(0.0, 1.0);

    [pa[0] + t * (pb[0] - pa[0]), pa[1] + t * (pb[1] - pa[1])]
}

/// Extracted isoline for one frame, ready for a line-list draw.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContourGeometry {
    /// Crossing points, dense and index-ordered
    pub vertices: Vec<[f32; 2]>,
    /// Segment endpoint pairs into `vertices`
    pub indices: Vec<u32>,
}

impl ContourGeometry {
    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate segments as pairs of endpoint positions.
    pub fn segments(&self) -> impl Iterator<Item = ([f32; 2], [f32; 2])> + '_ {
        self.indices.chunks_exact(2).map(move |pair| {
            (
                self.vertices[pair[0] as usize],
                self.vertices[pair[1] as usize],
            )
        })
    }
}

/// Extract the isoline of `field` at `threshold` for the given frame time.
///
/// The field is evaluated once per grid vertex before marching.
pub fn extract_contour<F: ScalarField + ?Sized>(
    points: &[GridPoint],
    topology: &GridTopology,
    field: &F,
    time: f32,
    threshold: f32,
) -> FieldResult<ContourGeometry> {
    let values: Vec<f32> = points
        .iter()
        .map(|p| field.value(p.position[0], p.position[1], time))
        .collect();

    extract_contour_from_values(points, &values, topology, threshold)
}

/// Extract the isoline from precomputed per-vertex field values.
///
/// `points` and `values` must both hold one entry per vertex of the
/// topology's grid. Triangles touching a NaN or infinite sample are skipped.
pub fn extract_contour_from_values(
    points: &[GridPoint],
    values: &[f32],
    topology: &GridTopology,
    threshold: f32,
) -> FieldResult<ContourGeometry> {
    let expected = topology.grid().vertex_count();
    if points.len() != expected {
        return Err(FieldError::BufferMismatch {
            expected,
            actual: points.len(),
        });
    }
    if values.len() != expected {
        return Err(FieldError::BufferMismatch {
            expected,
            actual: values.len(),
        });
    }

    let mut table = ContourPointTable::new();
    let mut indices = Vec::new();
    let mut skipped = 0usize;

    for triangle in topology.triangles() {
        let corner_values = triangle.map(|i| values[i as usize]);
        if corner_values.iter().any(|v| !v.is_finite()) {
            skipped += 1;
            continue;
        }

        let (minority, others) = match TriangleCase::classify(corner_values, threshold) {
            TriangleCase::NoCrossing => continue,
            TriangleCase::Minority { minority, others } => (minority, others),
        };

        let m = triangle[minority];
        for other in others {
            let (index, _) =
                edge_crossing(&mut table, points, values, m, triangle[other], threshold);
            indices.push(index);
        }
    }

    let geometry = ContourGeometry {
        vertices: table.into_vertices(),
        indices,
    };

    debug!(
        threshold,
        vertices = geometry.vertices.len(),
        segments = geometry.segment_count(),
        skipped_triangles = skipped,
        "Extracted contour"
    );

    Ok(geometry)
}

/// Memoized crossing on the grid edge `(a, b)`.
///
/// Interpolation always runs from the lower vertex index to the higher one
/// so the stored point does not depend on which triangle reached it first.
fn edge_crossing(
    table: &mut ContourPointTable,
    points: &[GridPoint],
    values: &[f32],
    a: u32,
    b: u32,
    threshold: f32,
) -> (u32, bool) {
    let key = EdgeKey::new(a, b);
    table.lookup_or_insert(key, || {
        let (lo, hi) = (key.low() as usize, key.high() as usize);
        crossing_point(
            points[lo].position,
            points[hi].position,
            values[lo],
            values[hi],
            threshold,
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_canonical() {
        assert_eq!(EdgeKey::new(7, 3), EdgeKey::new(3, 7));
        let key = EdgeKey::new(9, 2);
        assert_eq!((key.low(), key.high()), (2, 9));
    }

    #[test]
    fn test_lookup_or_insert_memoizes() {
        let mut table = ContourPointTable::new();

        let (first, created) = table.lookup_or_insert(EdgeKey::new(1, 2), || [0.5, 0.5]);
        assert_eq!((first, created), (0, true));

        let (again, created) = table.lookup_or_insert(EdgeKey::new(2, 1), || {
            panic!("position must not be recomputed")
        });
        assert_eq!((again, created), (0, false));

        let (second, created) = table.lookup_or_insert(EdgeKey::new(2, 3), || [1.0, 0.0]);
        assert_eq!((second, created), (1, true));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_into_vertices_dense_order() {
        let mut table = ContourPointTable::new();
        table.lookup_or_insert(EdgeKey::new(10, 11), || [1.0, 1.0]);
        table.lookup_or_insert(EdgeKey::new(0, 1), || [2.0, 2.0]);
        table.lookup_or_insert(EdgeKey::new(5, 6), || [3.0, 3.0]);

        assert_eq!(
            table.into_vertices(),
            vec![[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]
        );
    }

    #[test]
    fn test_classify_cases() {
        assert_eq!(TriangleCase::classify([1.0, 2.0, 3.0], 0.0), TriangleCase::NoCrossing);
        assert_eq!(TriangleCase::classify([-1.0, -2.0, 0.0], 0.0), TriangleCase::NoCrossing);
        assert_eq!(
            TriangleCase::classify([1.0, -1.0, -1.0], 0.0),
            TriangleCase::Minority { minority: 0, others: [1, 2] }
        );
        assert_eq!(
            TriangleCase::classify([-1.0, 1.0, -1.0], 0.0),
            TriangleCase::Minority { minority: 1, others: [0, 2] }
        );
        assert_eq!(
            TriangleCase::classify([1.0, 1.0, -1.0], 0.0),
            TriangleCase::Minority { minority: 2, others: [0, 1] }
        );
    }

    #[test]
    fn test_crossing_point_midpoint() {
        let p = crossing_point([0.0, 0.0], [1.0, 0.0], 1.0, -1.0, 0.0);
        assert_eq!(p, [0.5, 0.0]);
    }

    #[test]
    fn test_crossing_point_overflowing_fraction_snaps_to_first() {
        let p = crossing_point([0.0, 0.0], [1.0, 0.0], -f32::MAX, f32::MAX, f32::MAX);
        assert!(p.iter().all(|c| c.is_finite()));
    }

    #[test]
    fn test_crossing_point_flat_edge_snaps_to_first() {
        let p = crossing_point([0.25, 0.5], [1.0, 1.0], 0.0, 0.0, 0.0);
        assert_eq!(p, [0.25, 0.5]);
    }
}
