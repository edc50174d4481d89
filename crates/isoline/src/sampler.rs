//! Field sampling over the grid vertices.

use field_common::{GridPoint, GridSpec};
use tracing::warn;

use crate::color::ColorBands;
use crate::field::ScalarField;

/// One frame's worth of samples, in row-major vertex order.
#[derive(Debug, Clone, Default)]
pub struct SampledGrid {
    /// Colored vertices ready for upload
    pub points: Vec<GridPoint>,
    /// Raw field value at each vertex
    pub values: Vec<f32>,
    /// Number of samples that were NaN or infinite
    pub non_finite: usize,
}

impl SampledGrid {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Evaluates a field at every grid vertex and colors the samples.
#[derive(Debug, Clone, Copy)]
pub struct FieldSampler {
    grid: GridSpec,
    bands: ColorBands,
}

impl FieldSampler {
    pub fn new(grid: GridSpec, bands: ColorBands) -> Self {
        Self { grid, bands }
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn bands(&self) -> ColorBands {
        self.bands
    }

    /// Sample `field` at `time`. Deterministic for a given field and time.
    pub fn sample<F: ScalarField + ?Sized>(&self, field: &F, time: f32) -> SampledGrid {
        let count = self.grid.vertex_count();
        let mut points = Vec::with_capacity(count);
        let mut values = Vec::with_capacity(count);
        let mut non_finite = 0;

        for row in 0..self.grid.rows() {
            for col in 0..self.grid.columns() {
                let position = self.grid.position(row, col);
                let value = field.value(position[0], position[1], time);
                if !value.is_finite() {
                    non_finite += 1;
                }

                points.push(GridPoint::new(position, self.bands.color_for(value)));
                values.push(value);
            }
        }

        if non_finite > 0 {
            warn!(
                non_finite,
                total = count,
                time,
                "Field produced non-finite samples"
            );
        }

        SampledGrid {
            points,
            values,
            non_finite,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_length_and_order() {
        let grid = GridSpec::new(3, 2);
        let sampler = FieldSampler::new(grid, ColorBands::new(-2.0, 2.0, 0.0));
        let sampled = sampler.sample(&|x: f32, _y: f32, _t: f32| x, 0.0);

        assert_eq!(sampled.len(), 12);
        assert_eq!(sampled.values.len(), 12);
        // Second vertex of the first row
        assert_eq!(sampled.points[1].position, grid.position(0, 1));
        // First vertex of the second row
        assert_eq!(sampled.points[4].position, [-1.0, 0.0]);
    }

    #[test]
    fn test_non_finite_counted() {
        let sampler = FieldSampler::new(GridSpec::new(1, 1), ColorBands::new(-1.0, 1.0, 0.0));
        let sampled = sampler.sample(
            &|x: f32, _y: f32, _t: f32| if x < 0.0 { f32::NAN } else { 0.5 },
            0.0,
        );
        assert_eq!(sampled.non_finite, 2);
    }
}
