//! Shared test utilities for the isoline workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic scalar field generators
//! - Small grid and configuration fixtures
//! - Approximate floating-point assertions
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, small_config};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of `[x, y]` positions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_point_approx_eq;
///
/// assert_point_approx_eq!([0.5001, -1.0], [0.5, -1.0], 0.001);
/// ```
#[macro_export]
macro_rules! assert_point_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: [f32; 2] = $left;
        let right: [f32; 2] = $right;
        $crate::assert_approx_eq!(left[0], right[0], $epsilon);
        $crate::assert_approx_eq!(left[1], right[1], $epsilon);
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_assert_point_approx_eq_passes() {
        assert_point_approx_eq!([1.0001, 2.0001], [1.0, 2.0], 0.001);
    }
}
