//! Common types shared by the isoline crates: grid layout, configuration
//! and errors.

pub mod config;
pub mod error;
pub mod grid;

pub use config::FieldConfig;
pub use error::{FieldError, FieldResult};
pub use grid::{GridPoint, GridSpec};
