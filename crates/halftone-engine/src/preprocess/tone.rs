//! Brightness / contrast / posterize transform.

use crate::params::HalftoneParams;

/// Result of tone-mapping one cell.
///
/// `normalized + darkness == 1` up to floating-point rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Adjusted brightness in [0, 1]; 0 = black.
    pub normalized: f64,
    /// `1 - normalized`; drives shape size and matrix comparison.
    pub darkness: f64,
}

/// Maps a mean cell luminance (0..255) to a [`Tone`].
#[derive(Debug, Clone, Copy)]
pub struct ToneMapper {
    brightness: f64,
    contrast: f64,
    /// `Some(levels - 1)` when quantization is active.
    posterize_steps: Option<f64>,
}

impl ToneMapper {
    pub fn new(brightness: f64, contrast: f64, posterize: u32) -> Self {
        let posterize_steps = (posterize < 256).then(|| posterize.saturating_sub(1) as f64);
        Self {
            brightness,
            contrast,
            posterize_steps,
        }
    }

    pub fn from_params(params: &HalftoneParams) -> Self {
        Self::new(params.brightness, params.contrast, params.posterize)
    }

    /// Apply offset, then gain (each clamped to 0..255), normalize,
    /// optionally quantize to `posterize` levels, and invert.
    pub fn map(&self, avg_brightness: f64) -> Tone {
        let b = (avg_brightness + self.brightness).clamp(0.0, 255.0);
        let b = (b * self.contrast).clamp(0.0, 255.0);
        let mut normalized = b / 255.0;

        if let Some(steps) = self.posterize_steps {
            normalized = (normalized * steps).round() / steps;
        }

        Tone {
            normalized,
            darkness: 1.0 - normalized,
        }
    }
}
