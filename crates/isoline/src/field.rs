//! Scalar fields `f(x, y, t) -> value` sampled by the frame pipeline.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use field_common::{FieldError, FieldResult};
use serde::{Deserialize, Serialize};

/// A time-varying scalar field over the viewport square.
///
/// Implementations must be pure: the pipeline may evaluate the same
/// `(x, y, t)` more than once per frame.
pub trait ScalarField {
    fn value(&self, x: f32, y: f32, t: f32) -> f32;
}

impl<F> ScalarField for F
where
    F: Fn(f32, f32, f32) -> f32,
{
    fn value(&self, x: f32, y: f32, t: f32) -> f32 {
        self(x, y, t)
    }
}

/// Travelling wave: `sin(2πx + t) + cos(3πy·sin t)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveField;

impl ScalarField for WaveField {
    fn value(&self, x: f32, y: f32, t: f32) -> f32 {
        (2.0 * PI * x + t).sin() + (PI * y * t.sin() * 3.0).cos()
    }
}

/// Linear ramp along X whose zero crossing sweeps left and right.
#[derive(Debug, Clone, Copy, Default)]
pub struct RampField;

impl ScalarField for RampField {
    fn value(&self, x: f32, _y: f32, t: f32) -> f32 {
        x - 0.5 * t.sin()
    }
}

/// Cone centred at the origin that pulses with time.
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialField;

impl ScalarField for RadialField {
    fn value(&self, x: f32, y: f32, t: f32) -> f32 {
        let r = (x * x + y * y).sqrt();
        1.5 - 2.0 * r + 0.5 * t.sin()
    }
}

/// Built-in fields selectable by name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    #[default]
    Wave,
    RampX,
    Radial,
}

impl ScalarField for FieldKind {
    fn value(&self, x: f32, y: f32, t: f32) -> f32 {
        match self {
            FieldKind::Wave => WaveField.value(x, y, t),
            FieldKind::RampX => RampField.value(x, y, t),
            FieldKind::Radial => RadialField.value(x, y, t),
        }
    }
}

impl FieldKind {
    pub fn name(self) -> &'static str {
        match self {
            FieldKind::Wave => "wave",
            FieldKind::RampX => "ramp-x",
            FieldKind::Radial => "radial",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldKind {
    type Err = FieldError;

    fn from_str(s: &str) -> FieldResult<Self> {
        match s.to_lowercase().as_str() {
            "wave" => Ok(FieldKind::Wave),
            "ramp-x" | "ramp_x" | "ramp" => Ok(FieldKind::RampX),
            "radial" => Ok(FieldKind::Radial),
            other => Err(FieldError::invalid_config(
                "field",
                format!("unknown field '{}' (expected wave, ramp-x or radial)", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_is_field() {
        let field = |x: f32, y: f32, t: f32| x + y + t;
        assert_eq!(field.value(1.0, 2.0, 3.0), 6.0);
    }

    #[test]
    fn test_wave_at_origin() {
        // sin(0) + cos(0)
        assert!((WaveField.value(0.0, 0.0, 0.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_field_kind_parse() {
        assert_eq!("wave".parse::<FieldKind>().unwrap(), FieldKind::Wave);
        assert_eq!("Ramp-X".parse::<FieldKind>().unwrap(), FieldKind::RampX);
        assert_eq!("radial".parse::<FieldKind>().unwrap(), FieldKind::Radial);
        assert!("spiral".parse::<FieldKind>().is_err());
    }

    #[test]
    fn test_field_kind_dispatch() {
        assert_eq!(FieldKind::RampX.value(0.25, 0.0, 0.0), 0.25);
        assert_eq!(FieldKind::Radial.value(0.0, 0.0, 0.0), 1.5);
    }
}
