//! Luminance extraction and tone mapping.
//!
//! The pipeline per generation pass:
//!
//! 1. **Luminance map** - plain RGB mean per pixel, computed once
//! 2. **Pre-blur** (optional) - separable Gaussian over the map
//! 3. **Cell sampling** - mean luminance in a square window per grid cell
//! 4. **Tone mapping** - brightness, contrast, posterize, then darkness
//!
//! The source image is never modified; the map is a scratch buffer the
//! size of the image and is dropped at the end of the pass.

mod blur;
mod luminance;
mod tone;

pub use blur::gaussian_blur;
pub use luminance::{sample_window, LuminanceMap};
pub use tone::{Tone, ToneMapper};
