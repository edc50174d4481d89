//! Scalar field visualization with a single animated isoline.
//!
//! Implements the per-frame pipeline:
//! - Field sampling with two-band coloring
//! - Grid triangulation (built once)
//! - Isoline extraction (marching triangles with shared-edge dedup)
//! - Frame driving and a headless canvas renderer

pub mod canvas;
pub mod color;
pub mod contour;
pub mod field;
pub mod frame;
pub mod sampler;
pub mod topology;

pub use color::ColorBands;
pub use contour::{extract_contour, extract_contour_from_values, ContourGeometry, EdgeKey};
pub use field::{FieldKind, ScalarField, WaveField};
pub use frame::{Frame, FrameBuffers, FrameDriver, FramePlatform, FrameSink, PlatformTick};
pub use sampler::{FieldSampler, SampledGrid};
pub use topology::GridTopology;
