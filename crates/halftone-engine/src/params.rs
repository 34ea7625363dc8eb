//! Halftone parameter record.
//!
//! [`HalftoneParams`] carries every knob of a generation pass. Fields are
//! independent; the engine does not clamp or reconcile them. Keeping
//! `threshold_min <= threshold_max` and sane ranges is the caller's job.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ParseNameError;
use crate::matrix::DitherPattern;

/// Shape drawn for each surviving grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    /// Filled disc
    Circle,
    /// Filled axis-aligned square
    #[default]
    Square,
    /// A character from a dark-to-light glyph ramp
    Ascii,
}

impl ShapeType {
    pub const ALL: [ShapeType; 3] = [ShapeType::Circle, ShapeType::Square, ShapeType::Ascii];

    /// Fixed size multiplier that evens out visual density across shapes.
    ///
    /// A square of half-side `s` covers more area than a disc of radius `s`,
    /// and glyphs leave most of their box empty.
    #[inline]
    pub fn scale_factor(self) -> f64 {
        match self {
            ShapeType::Circle => 1.0,
            ShapeType::Square => 0.75,
            ShapeType::Ascii => 1.2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeType::Circle => "circle",
            ShapeType::Square => "square",
            ShapeType::Ascii => "ascii",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShapeType::ALL
            .into_iter()
            .find(|shape| shape.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError {
                kind: "shape",
                name: s.to_string(),
            })
    }
}

/// Configuration for one generation pass.
///
/// # Defaults
///
/// - cell size 8 px, shape size 1.0, squares on a Bayer 8x8 matrix
/// - black-to-red ramp on white
/// - full threshold range, neutral contrast/brightness, no blur
/// - posterize 256 (disabled), grid rotated 45°
///
/// # Example
///
/// ```
/// use halftone_engine::{DitherPattern, HalftoneParams, ShapeType};
///
/// let params = HalftoneParams::new()
///     .cell_size(12.0)
///     .shape(ShapeType::Circle)
///     .pattern(DitherPattern::Variable)
///     .angle(0.0);
///
/// assert_eq!(params.cell_size, 12.0);
/// assert_eq!(params.posterize, 256);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalftoneParams {
    /// Grid spacing in pixels.
    pub cell_size: f64,
    /// Multiplier applied on top of the per-shape scale factor.
    pub shape_size: f64,
    pub shape: ShapeType,
    pub pattern: DitherPattern,
    /// Fill color for dark regions (hex).
    pub color_a: String,
    /// Fill color for light regions (hex).
    pub color_b: String,
    /// Solid background fill (hex).
    pub background: String,
    /// Cells whose darkness falls outside `threshold_min..=threshold_max`
    /// are not drawn.
    pub threshold_min: f64,
    pub threshold_max: f64,
    /// Brightness multiplier applied after the offset.
    pub contrast: f64,
    /// Brightness offset on the 0..255 scale, roughly -100..100.
    pub brightness: f64,
    /// Gaussian pre-blur radius in pixels; 0 disables.
    pub blur: f64,
    /// Number of brightness levels, 2..=256; 256 disables quantization.
    pub posterize: u32,
    /// Grid rotation in degrees.
    pub angle: f64,
}

impl Default for HalftoneParams {
    fn default() -> Self {
        Self {
            cell_size: 8.0,
            shape_size: 1.0,
            shape: ShapeType::Square,
            pattern: DitherPattern::Bayer8,
            color_a: "#000000".to_string(),
            color_b: "#ff0000".to_string(),
            background: "#ffffff".to_string(),
            threshold_min: 0.0,
            threshold_max: 1.0,
            contrast: 1.0,
            brightness: 0.0,
            blur: 0.0,
            posterize: 256,
            angle: 45.0,
        }
    }
}

impl HalftoneParams {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn cell_size(mut self, px: f64) -> Self {
        self.cell_size = px;
        self
    }

    #[inline]
    pub fn shape_size(mut self, multiplier: f64) -> Self {
        self.shape_size = multiplier;
        self
    }

    #[inline]
    pub fn shape(mut self, shape: ShapeType) -> Self {
        self.shape = shape;
        self
    }

    #[inline]
    pub fn pattern(mut self, pattern: DitherPattern) -> Self {
        self.pattern = pattern;
        self
    }

    /// Set the dark (`a`) and light (`b`) ends of the color ramp.
    #[inline]
    pub fn colors(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.color_a = a.into();
        self.color_b = b.into();
        self
    }

    #[inline]
    pub fn background(mut self, color: impl Into<String>) -> Self {
        self.background = color.into();
        self
    }

    #[inline]
    pub fn threshold(mut self, min: f64, max: f64) -> Self {
        self.threshold_min = min;
        self.threshold_max = max;
        self
    }

    #[inline]
    pub fn contrast(mut self, factor: f64) -> Self {
        self.contrast = factor;
        self
    }

    #[inline]
    pub fn brightness(mut self, offset: f64) -> Self {
        self.brightness = offset;
        self
    }

    #[inline]
    pub fn blur(mut self, radius: f64) -> Self {
        self.blur = radius;
        self
    }

    #[inline]
    pub fn posterize(mut self, levels: u32) -> Self {
        self.posterize = levels;
        self
    }

    #[inline]
    pub fn angle(mut self, degrees: f64) -> Self {
        self.angle = degrees;
        self
    }

    /// Uniform shape size used by dithered patterns, before darkness scaling.
    #[inline]
    pub fn base_dot_size(&self) -> f64 {
        (self.cell_size / 2.0) * self.shape.scale_factor() * self.shape_size
    }
}
