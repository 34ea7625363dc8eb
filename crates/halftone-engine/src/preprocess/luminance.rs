//! Per-pixel luminance map and per-cell window sampling.

use super::blur::gaussian_blur;
use crate::image::SourceImage;

/// Side length of the sampling window for a grid spacing.
///
/// The window covers 70% of the cell so neighbouring samples overlap less
/// on rotated grids.
#[inline]
pub fn sample_window(cell_size: f64) -> u32 {
    let w = (cell_size * 0.7).ceil();
    if w.is_finite() && w > 0.0 {
        w as u32
    } else {
        0
    }
}

/// Plain-average luminance of every source pixel, optionally blurred.
///
/// Luminance is `(R + G + B) / 3`, not a perceptual weighting. Alpha is
/// ignored.
#[derive(Debug, Clone)]
pub struct LuminanceMap {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl LuminanceMap {
    /// Build the map from a source image, blurring with `blur` px if positive.
    pub fn from_image(image: &SourceImage, blur: f64) -> Self {
        let width = image.width() as usize;
        let height = image.height() as usize;
        let mut values: Vec<f32> = image
            .data()
            .chunks_exact(4)
            .map(|px| (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0)
            .collect();

        if blur > 0.0 {
            gaussian_blur(&mut values, width, height, blur);
        }

        Self {
            width,
            height,
            values,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Luminance at an integer pixel, `None` outside the map.
    #[inline]
    pub fn get(&self, x: i64, y: i64) -> Option<f32> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        Some(self.values[y as usize * self.width + x as usize])
    }

    /// Mean luminance of a `window`-sided square centered at `(cx, cy)`.
    ///
    /// Offsets run from `-window/2` in unit steps while below `window/2`,
    /// and each sample coordinate is floored. For odd windows the offsets
    /// are half-integers, which shifts the window by up to one pixel.
    ///
    /// Returns `None` when no sample lands inside the image.
    pub fn sample_cell(&self, cx: f64, cy: f64, window: u32) -> Option<f64> {
        let half = window as f64 / 2.0;
        let mut sum = 0f64;
        let mut count = 0u32;

        for j in 0..window {
            let sy = (cy - half + j as f64).floor() as i64;
            if sy < 0 || sy >= self.height as i64 {
                continue;
            }
            for i in 0..window {
                let sx = (cx - half + i as f64).floor() as i64;
                if let Some(v) = self.get(sx, sy) {
                    sum += v as f64;
                    count += 1;
                }
            }
        }

        if count == 0 {
            None
        } else {
            Some(sum / count as f64)
        }
    }
}
