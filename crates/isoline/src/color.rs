//! Two-band color mapping for sampled field values.
//!
//! Values above `change_value` fade from white toward red, values at or
//! below it fade toward blue. Both bands saturate at the configured
//! `max_value` / `min_value` bounds.

use field_common::FieldConfig;

/// Fully transparent color used for samples that are not a number.
pub const TRANSPARENT: [f32; 4] = [0.0, 0.0, 0.0, 0.0];

/// Saturation bounds and band boundary for the color policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorBands {
    pub min_value: f32,
    pub max_value: f32,
    pub change_value: f32,
}

impl ColorBands {
    pub fn new(min_value: f32, max_value: f32, change_value: f32) -> Self {
        Self {
            min_value,
            max_value,
            change_value,
        }
    }

    pub fn from_config(config: &FieldConfig) -> Self {
        Self::new(config.min_value, config.max_value, config.change_value)
    }

    /// Map a field value to an RGBA color in `[0, 1]`.
    pub fn color_for(&self, value: f32) -> [f32; 4] {
        if value.is_nan() {
            return TRANSPARENT;
        }

        if value > self.change_value {
            let rv = ((value - self.change_value) / (self.max_value - self.change_value))
                .clamp(0.0, 1.0);
            [1.0, 1.0 - rv, 1.0 - rv, 1.0]
        } else {
            let bv = ((self.change_value - value) / (self.change_value - self.min_value))
                .clamp(0.0, 1.0);
            [1.0 - bv, 1.0 - bv, 1.0, 1.0]
        }
    }
}

impl Default for ColorBands {
    fn default() -> Self {
        Self::from_config(&FieldConfig::default())
    }
}

impl From<&FieldConfig> for ColorBands {
    fn from(config: &FieldConfig) -> Self {
        Self::from_config(config)
    }
}

/// Quantize a float color to 8-bit RGBA.
pub fn to_rgba8(color: [f32; 4]) -> [u8; 4] {
    color.map(|c| (c.clamp(0.0, 1.0) * 255.0).round() as u8)
}

/// Mean of several colors, used to flat-shade a triangle.
pub fn average_color(colors: &[[f32; 4]]) -> [f32; 4] {
    if colors.is_empty() {
        return TRANSPARENT;
    }

    let mut sum = [0.0f32; 4];
    for color in colors {
        for (acc, c) in sum.iter_mut().zip(color) {
            *acc += c;
        }
    }
    let n = colors.len() as f32;
    sum.map(|c| c / n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands() -> ColorBands {
        ColorBands::new(-2.0, 2.0, 0.0)
    }

    #[test]
    fn test_change_value_is_white() {
        assert_eq!(bands().color_for(0.0), [1.0, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_halfway_red() {
        assert_eq!(bands().color_for(1.0), [1.0, 0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_halfway_blue() {
        assert_eq!(bands().color_for(-1.0), [0.5, 0.5, 1.0, 1.0]);
    }

    #[test]
    fn test_saturation_clamps() {
        assert_eq!(bands().color_for(10.0), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(bands().color_for(-10.0), [0.0, 0.0, 1.0, 1.0]);
        assert_eq!(bands().color_for(f32::INFINITY), [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(bands().color_for(f32::NEG_INFINITY), [0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_nan_is_transparent() {
        assert_eq!(bands().color_for(f32::NAN), TRANSPARENT);
    }

    #[test]
    fn test_to_rgba8() {
        assert_eq!(to_rgba8([1.0, 0.5, 0.0, 1.0]), [255, 128, 0, 255]);
        assert_eq!(to_rgba8([2.0, -1.0, 0.0, 1.0]), [255, 0, 0, 255]);
    }

    #[test]
    fn test_average_color() {
        let avg = average_color(&[[1.0, 0.0, 0.0, 1.0], [0.0, 0.0, 1.0, 1.0]]);
        assert_eq!(avg, [0.5, 0.0, 0.5, 1.0]);
        assert_eq!(average_color(&[]), TRANSPARENT);
    }
}
