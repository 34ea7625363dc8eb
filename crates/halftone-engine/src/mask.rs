//! Persistent erase mask.
//!
//! The mask is an image-sized layer where opaque pixels mean "erased here".
//! Brush circles are rasterized without anti-aliasing, so coverage is
//! all-or-nothing per pixel and painting the same circle twice leaves the
//! mask unchanged.

use tiny_skia::{
    BlendMode, Color, FillRule, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Transform,
};

#[derive(Debug, Clone, PartialEq)]
pub struct EraseMask {
    pixmap: Pixmap,
}

impl EraseMask {
    /// An empty mask; `None` for a zero-sized canvas.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        Some(Self {
            pixmap: Pixmap::new(width, height)?,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Mark a filled circle as erased.
    ///
    /// Returns the brush path so the caller can subtract the same area from
    /// a live layer. Non-positive or non-finite radii do nothing.
    pub fn erase(&mut self, x: f64, y: f64, radius: f64) -> Option<Path> {
        let path = brush(x, y, radius)?;
        let mut paint = Paint::default();
        paint.set_color(Color::WHITE);
        paint.anti_alias = false;
        self.pixmap.fill_path(
            &path,
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );
        Some(path)
    }

    /// Forget every erase stroke.
    pub fn clear(&mut self) {
        self.pixmap.fill(Color::TRANSPARENT);
    }

    pub fn is_empty(&self) -> bool {
        self.pixmap.pixels().iter().all(|px| px.alpha() == 0)
    }

    /// True if the pixel at `(x, y)` has been erased.
    pub fn covers(&self, x: u32, y: u32) -> bool {
        self.pixmap.pixel(x, y).is_some_and(|px| px.alpha() > 0)
    }

    /// Number of erased pixels.
    pub fn coverage(&self) -> usize {
        self.pixmap.pixels().iter().filter(|px| px.alpha() > 0).count()
    }

    /// Subtract the mask from `layer` (destination-out).
    pub fn apply_to(&self, layer: &mut Pixmap) {
        layer.draw_pixmap(
            0,
            0,
            self.pixmap.as_ref(),
            &PixmapPaint {
                blend_mode: BlendMode::DestinationOut,
                ..PixmapPaint::default()
            },
            Transform::identity(),
            None,
        );
    }

    /// Raw mask layer.
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }
}

/// Subtract a brush path from `layer`, using the mask's coverage rules.
pub(crate) fn cut(layer: &mut Pixmap, path: &Path) {
    let mut paint = Paint::default();
    paint.set_color(Color::WHITE);
    paint.anti_alias = false;
    paint.blend_mode = BlendMode::DestinationOut;
    layer.fill_path(path, &paint, FillRule::Winding, Transform::identity(), None);
}

fn brush(x: f64, y: f64, radius: f64) -> Option<Path> {
    if !(radius.is_finite() && radius > 0.0 && x.is_finite() && y.is_finite()) {
        return None;
    }
    PathBuilder::from_circle(x as f32, y as f32, radius as f32)
}
