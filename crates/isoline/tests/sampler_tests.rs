//! Tests for field sampling and color banding.

use field_common::GridSpec;
use isoline::color::TRANSPARENT;
use isoline::{ColorBands, FieldSampler, WaveField};
use test_utils::{sample_values, vertical_line_field, GRID_SIZES};

fn default_bands() -> ColorBands {
    ColorBands::new(-2.0, 2.0, 0.0)
}

// ============================================================================
// Layout tests
// ============================================================================

#[test]
fn test_sample_length() {
    for (width, height) in GRID_SIZES {
        let grid = GridSpec::new(width, height);
        let sampled = FieldSampler::new(grid, default_bands()).sample(&WaveField, 0.5);
        assert_eq!(sampled.len(), ((width + 1) * (height + 1)) as usize);
        assert_eq!(sampled.values.len(), sampled.len());
    }
}

#[test]
fn test_positions_follow_formula() {
    let grid = GridSpec::new(4, 2);
    let sampled = FieldSampler::new(grid, default_bands()).sample(&WaveField, 0.0);

    for row in 0..=2u32 {
        for col in 0..=4u32 {
            let point = sampled.points[(row * 5 + col) as usize];
            assert_eq!(
                point.position,
                [-1.0 + 2.0 * col as f32 / 4.0, -1.0 + 2.0 * row as f32 / 2.0]
            );
        }
    }
}

#[test]
fn test_values_match_field() {
    let grid = GridSpec::new(7, 5);
    let sampled = FieldSampler::new(grid, default_bands()).sample(&vertical_line_field, 0.0);
    assert_eq!(sampled.values, sample_values(grid, vertical_line_field, 0.0));
    assert_eq!(sampled.non_finite, 0);
}

#[test]
fn test_sampling_deterministic() {
    let sampler = FieldSampler::new(GridSpec::new(30, 30), default_bands());
    let a = sampler.sample(&WaveField, 2.5);
    let b = sampler.sample(&WaveField, 2.5);
    assert_eq!(a.points, b.points);
    assert_eq!(a.values, b.values);
}

#[test]
fn test_sampling_depends_on_time() {
    let sampler = FieldSampler::new(GridSpec::new(10, 10), default_bands());
    let a = sampler.sample(&WaveField, 0.0);
    let b = sampler.sample(&WaveField, 1.0);
    assert_ne!(a.values, b.values);
}

// ============================================================================
// Color policy tests
// ============================================================================

#[test]
fn test_colors_follow_bands() {
    // Single row of three vertices at x = -1, 0, 1
    let grid = GridSpec::new(2, 1);
    let field = |x: f32, _y: f32, _t: f32| 2.0 * x;
    let sampled = FieldSampler::new(grid, default_bands()).sample(&field, 0.0);

    assert_eq!(sampled.points[0].color, [0.0, 0.0, 1.0, 1.0]);
    assert_eq!(sampled.points[1].color, [1.0, 1.0, 1.0, 1.0]);
    assert_eq!(sampled.points[2].color, [1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_band_boundary_independent_of_threshold() {
    let bands = ColorBands::new(-1.0, 3.0, 1.0);
    // 0.5 is below change_value, so it is blue even though it is above zero
    let color = bands.color_for(0.5);
    assert_eq!(color, [0.75, 0.75, 1.0, 1.0]);
    assert_eq!(bands.color_for(2.0), [1.0, 0.5, 0.5, 1.0]);
}

#[test]
fn test_out_of_range_saturates() {
    let grid = GridSpec::new(2, 2);
    let field = |x: f32, _y: f32, _t: f32| 100.0 * x;
    let sampled = FieldSampler::new(grid, default_bands()).sample(&field, 0.0);

    assert_eq!(sampled.points[0].color, [0.0, 0.0, 1.0, 1.0]);
    assert_eq!(sampled.points[2].color, [1.0, 0.0, 0.0, 1.0]);
}

#[test]
fn test_non_finite_samples_flagged() {
    let grid = GridSpec::new(2, 2);
    let field = |x: f32, y: f32, _t: f32| {
        if x > 0.5 && y > 0.5 {
            f32::NAN
        } else if x < -0.5 && y < -0.5 {
            f32::INFINITY
        } else {
            0.0
        }
    };
    let sampled = FieldSampler::new(grid, default_bands()).sample(&field, 0.0);

    assert_eq!(sampled.non_finite, 2);
    assert_eq!(sampled.points[8].color, TRANSPARENT);
    assert_eq!(sampled.points[0].color, [1.0, 0.0, 0.0, 1.0]);
}
