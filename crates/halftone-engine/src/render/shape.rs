use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};

use super::glyph::{glyph_rows, gradient_char, lit_pixels, GLYPH_HEIGHT, GLYPH_WIDTH};
use crate::color::Rgb;
use crate::params::ShapeType;

/// Rasterizes one shape per cell onto a layer.
///
/// The shape type and grid spacing are fixed for a generation pass, so they
/// live on the renderer; per-cell inputs are passed to [`draw`](Self::draw).
pub struct ShapeRenderer {
    shape: ShapeType,
    cell_size: f64,
    paint: Paint<'static>,
}

impl ShapeRenderer {
    pub fn new(shape: ShapeType, cell_size: f64) -> Self {
        let mut paint = Paint::default();
        paint.anti_alias = true;
        Self {
            shape,
            cell_size,
            paint,
        }
    }

    /// Draw a shape for the cell whose top-left corner is `(x, y)`.
    ///
    /// The shape is centered at `(x + cell_size / 2, y + cell_size / 2)`.
    /// `size` is the disc radius, the square's half-side, or the basis of
    /// the glyph height. Zero or invalid sizes draw nothing.
    pub fn draw(
        &mut self,
        layer: &mut Pixmap,
        x: f64,
        y: f64,
        size: f64,
        darkness: f64,
        color: Rgb,
    ) {
        if !(size.is_finite() && size > 0.0) {
            return;
        }
        let cx = (x + self.cell_size / 2.0) as f32;
        let cy = (y + self.cell_size / 2.0) as f32;
        self.paint.set_color(color.to_skia(255));

        match self.shape {
            ShapeType::Circle => {
                if let Some(path) = PathBuilder::from_circle(cx, cy, size as f32) {
                    layer.fill_path(
                        &path,
                        &self.paint,
                        FillRule::Winding,
                        Transform::identity(),
                        None,
                    );
                }
            }
            ShapeType::Square => {
                let side = (size * 2.0) as f32;
                if let Some(rect) = Rect::from_xywh(cx - side / 2.0, cy - side / 2.0, side, side) {
                    layer.fill_rect(rect, &self.paint, Transform::identity(), None);
                }
            }
            ShapeType::Ascii => {
                let font_size = (size * 2.0).min(self.cell_size * 2.0);
                self.draw_glyph(layer, cx, cy, font_size as f32, gradient_char(darkness));
            }
        }
    }

    /// Glyph pixels are `font_size / 10` wide, so a 5x7 glyph spans half the
    /// font size horizontally and 70% vertically, centered on `(cx, cy)`.
    fn draw_glyph(&self, layer: &mut Pixmap, cx: f32, cy: f32, font_size: f32, ch: char) {
        let Some(rows) = glyph_rows(ch) else {
            return;
        };
        let unit = font_size * 0.1;
        let left = cx - unit * GLYPH_WIDTH as f32 / 2.0;
        let top = cy - unit * GLYPH_HEIGHT as f32 / 2.0;

        let mut pb = PathBuilder::new();
        for (col, row) in lit_pixels(rows) {
            if let Some(rect) =
                Rect::from_xywh(left + col as f32 * unit, top + row as f32 * unit, unit, unit)
            {
                pb.push_rect(rect);
            }
        }
        if let Some(path) = pb.finish() {
            layer.fill_path(
                &path,
                &self.paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alpha(p: &Pixmap, x: u32, y: u32) -> u8 {
        p.pixel(x, y).unwrap().alpha()
    }

    fn ink(p: &Pixmap) -> usize {
        p.pixels().iter().filter(|px| px.alpha() > 0).count()
    }

    #[test]
    fn test_square_is_centered_in_cell() {
        let mut layer = Pixmap::new(10, 10).unwrap();
        let mut r = ShapeRenderer::new(ShapeType::Square, 10.0);
        r.draw(&mut layer, 0.0, 0.0, 3.75, 1.0, Rgb::new(10, 20, 30));

        let center = layer.pixel(5, 5).unwrap().demultiply();
        assert_eq!(
            (center.red(), center.green(), center.blue(), center.alpha()),
            (10, 20, 30, 255)
        );
        // 1.25..8.75: pixels 2..=7 fully covered, 0 and 9 untouched
        assert_eq!(alpha(&layer, 2, 2), 255);
        assert_eq!(alpha(&layer, 7, 7), 255);
        assert_eq!(alpha(&layer, 0, 0), 0);
        assert_eq!(alpha(&layer, 9, 5), 0);
    }

    #[test]
    fn test_circle_radius() {
        let mut layer = Pixmap::new(20, 20).unwrap();
        let mut r = ShapeRenderer::new(ShapeType::Circle, 20.0);
        r.draw(&mut layer, 0.0, 0.0, 5.0, 1.0, Rgb::BLACK);
        assert_eq!(alpha(&layer, 10, 10), 255);
        assert_eq!(alpha(&layer, 10, 6), 255);
        // Corner of the bounding square lies outside the disc
        assert_eq!(alpha(&layer, 5, 5), 0);
        assert_eq!(alpha(&layer, 10, 17), 0);
    }

    #[test]
    fn test_zero_size_draws_nothing() {
        let mut layer = Pixmap::new(10, 10).unwrap();
        for shape in ShapeType::ALL {
            let mut r = ShapeRenderer::new(shape, 10.0);
            r.draw(&mut layer, 0.0, 0.0, 0.0, 0.5, Rgb::BLACK);
            r.draw(&mut layer, 0.0, 0.0, f64::NAN, 0.5, Rgb::BLACK);
        }
        assert_eq!(ink(&layer), 0);
    }

    #[test]
    fn test_ascii_glyph_depends_on_darkness() {
        let draw = |darkness| {
            let mut layer = Pixmap::new(40, 40).unwrap();
            let mut r = ShapeRenderer::new(ShapeType::Ascii, 20.0);
            r.draw(&mut layer, 0.0, 0.0, 10.0, darkness, Rgb::BLACK);
            ink(&layer)
        };
        let dense = draw(0.0); // '@'
        let sparse = draw(0.85); // ':'
        assert!(dense > sparse, "{dense} <= {sparse}");
        assert!(sparse > 0);
        assert_eq!(draw(1.0), 0); // ' '
    }

    #[test]
    fn test_ascii_font_size_is_capped() {
        let mut small = Pixmap::new(60, 60).unwrap();
        let mut big = Pixmap::new(60, 60).unwrap();
        let mut r = ShapeRenderer::new(ShapeType::Ascii, 4.0);
        // Both sizes exceed the cap of 2 * cell_size, so output is identical
        r.draw(&mut small, 26.0, 26.0, 20.0, 0.0, Rgb::BLACK);
        r.draw(&mut big, 26.0, 26.0, 200.0, 0.0, Rgb::BLACK);
        assert_eq!(small.data(), big.data());
    }
}
