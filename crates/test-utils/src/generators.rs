//! Synthetic scalar fields and value grids.
//!
//! Fields are plain functions so they can be handed straight to the
//! sampler and extractor. Value generators produce row-major vectors with
//! one entry per grid vertex.

use field_common::GridSpec;

/// `f(x, y, t) = x - 0.5`. Its isoline at 0 is the vertical line `x = 0.5`.
pub fn vertical_line_field(x: f32, _y: f32, _t: f32) -> f32 {
    x - 0.5
}

/// `f(x, y, t) = y`. Its isoline at 0 is the horizontal line `y = 0`.
pub fn horizontal_line_field(_x: f32, y: f32, _t: f32) -> f32 {
    y
}

/// Distance from the origin. Its isoline at `r` is a circle of radius `r`.
pub fn distance_field(x: f32, y: f32, _t: f32) -> f32 {
    (x * x + y * y).sqrt()
}

/// Ramp along X whose zero crossing sits at `x = t`.
pub fn moving_line_field(x: f32, _y: f32, t: f32) -> f32 {
    x - t
}

/// Evaluate `field` at every vertex of `grid` in row-major order.
pub fn sample_values<F>(grid: GridSpec, field: F, time: f32) -> Vec<f32>
where
    F: Fn(f32, f32, f32) -> f32,
{
    let mut data = Vec::with_capacity(grid.vertex_count());
    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            let [x, y] = grid.position(row, col);
            data.push(field(x, y, time));
        }
    }
    data
}

/// Alternating `+1` / `-1` per vertex, which crosses every edge that is
/// not a diagonal.
pub fn create_checkerboard_values(grid: GridSpec) -> Vec<f32> {
    let mut data = Vec::with_capacity(grid.vertex_count());
    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            data.push(if (row + col) % 2 == 0 { 1.0 } else { -1.0 });
        }
    }
    data
}

/// Deterministic pseudo-random values in `[-1, 1)`.
pub fn create_noise_values(grid: GridSpec, seed: u32) -> Vec<f32> {
    let mut data = Vec::with_capacity(grid.vertex_count());
    for row in 0..grid.rows() {
        for col in 0..grid.columns() {
            let hash = simple_hash(col, row, seed);
            data.push((hash % 20000) as f32 / 10000.0 - 1.0);
        }
    }
    data
}

/// Creates a value grid filled with a constant.
pub fn create_constant_values(grid: GridSpec, value: f32) -> Vec<f32> {
    vec![value; grid.vertex_count()]
}

/// Simple deterministic hash for reproducible test data.
fn simple_hash(x: u32, y: u32, seed: u32) -> u32 {
    let mut h = seed;
    h = h.wrapping_mul(31).wrapping_add(x);
    h = h.wrapping_mul(31).wrapping_add(y);
    h ^= h >> 16;
    h = h.wrapping_mul(0x85ebca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2ae35);
    h ^= h >> 16;
    h
}
