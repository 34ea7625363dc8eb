//! halftone-engine: halftone, dot-screen and ASCII rendering of raster images
//!
//! The engine turns an RGBA image into a pattern of shapes laid on a rotated
//! grid. Each grid cell samples the image brightness, runs it through a tone
//! curve, and is then either drawn at a size proportional to its darkness or
//! gated by an ordered-dither threshold matrix and drawn at a uniform size.
//!
//! # Quick Start
//!
//! ```
//! use halftone_engine::{DitherPattern, HalftoneEngine, HalftoneParams, ShapeType, SourceImage};
//!
//! let image = SourceImage::solid(64, 48, [128, 128, 128, 255]);
//! let mut engine = HalftoneEngine::new(image);
//!
//! let params = HalftoneParams::new()
//!     .cell_size(6.0)
//!     .shape(ShapeType::Circle)
//!     .pattern(DitherPattern::Bayer4);
//! let stats = engine.generate(&params);
//!
//! assert_eq!(
//!     stats.visited,
//!     stats.drawn + stats.skipped_empty + stats.skipped_range + stats.skipped_matrix
//! );
//! ```
//!
//! # Layers
//!
//! An engine owns three buffers the size of its image:
//!
//! - **background** - solid fill with the configured background color
//! - **overlay** - transparent canvas holding the drawn shapes
//! - **erase mask** - accumulated brush strokes, subtracted from the overlay
//!
//! The erase mask outlives parameter changes: every [`HalftoneEngine::generate`]
//! redraws the overlay from scratch and then cuts the mask out of it again.
//! Only [`HalftoneEngine::clear_erase_mask`] or loading a new image empties it.
//!
//! # Generation pass
//!
//! 1. Fill the background, clear the overlay
//! 2. Build a per-pixel luminance map, Gaussian-blurred if `blur > 0`
//! 3. Walk the rotated grid ([`GridWalker`]) and sample each cell
//! 4. Tone-map: brightness offset, contrast, posterize, invert to darkness
//! 5. Gate on the threshold range, then on the dither matrix
//! 6. Pick the color between `color_a` (dark) and `color_b` (light)
//! 7. Draw the shape, then subtract the erase mask
//!
//! Steps 2 to 6 are exposed on their own as the [`Placements`] iterator.
//!
//! # Errors
//!
//! Rendering itself does not fail. Malformed colors fall back to black,
//! cells with nothing to sample are skipped, and a zero-sized image turns
//! every operation into a no-op. [`EngineError`] only arises when wrapping a
//! pixel buffer of the wrong length.

pub mod color;
mod engine;
pub mod error;
pub mod grid;
mod image;
pub mod mask;
pub mod matrix;
mod params;
pub mod policy;
pub mod preprocess;
pub mod render;


pub use color::{interpolate, Rgb};
pub use engine::{GenerateStats, HalftoneEngine, Layers, Placement, Placements};
pub use error::{EngineError, ParseColorError, ParseNameError};
pub use grid::{GridCell, GridWalker};
pub use image::SourceImage;
pub use mask::EraseMask;
pub use matrix::{matrix_for, DitherMatrix, DitherPattern};
pub use params::{HalftoneParams, ShapeType};
pub use render::ShapeRenderer;

/// Re-exported so callers can read layers without naming the crate.
pub use tiny_skia::Pixmap;
