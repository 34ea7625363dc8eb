//! Shape rasterization.
//!
//! Three closed shape kinds, dispatched by [`ShapeType`](crate::ShapeType):
//!
//! - **circle** - filled disc, radius = size
//! - **square** - filled square, side = 2 * size
//! - **ascii** - a glyph from a dense-to-sparse ramp, chosen by darkness
//!
//! Shapes are anti-aliased by the rasterizer and composited source-over.

mod glyph;
mod shape;

pub use glyph::{gradient_char, ASCII_GRADIENT};
pub use shape::ShapeRenderer;
