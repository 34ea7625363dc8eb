//! Rotated grid enumeration.
//!
//! The grid is rigid: it is laid out around the canvas center, rotated as a
//! whole, and every candidate position outside the canvas is dropped. The
//! square of indices walked is large enough to cover the canvas at any
//! angle, so some iterations are always wasted.

/// Upper bound on `extent` so index arithmetic stays in range for tiny cells.
const MAX_EXTENT: f64 = i32::MAX as f64;

/// One candidate cell center on the rotated grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Unrotated column index (may be negative)
    pub grid_x: i64,
    /// Unrotated row index (may be negative)
    pub grid_y: i64,
    /// Rotated center, canvas pixel coordinates
    pub x: f64,
    pub y: f64,
}

/// Lazy iterator over the in-bounds cell centers of a rotated grid.
///
/// Walks `grid_y` in the outer loop and `grid_x` in the inner loop, both
/// over `-extent..extent` with `extent = ceil(diagonal / cell_size) + 1`.
///
/// A non-positive or non-finite `cell_size`, or an empty canvas, yields
/// nothing.
#[derive(Debug, Clone)]
pub struct GridWalker {
    width: f64,
    height: f64,
    cell_size: f64,
    cos: f64,
    sin: f64,
    extent: i64,
    grid_x: i64,
    grid_y: i64,
}

impl GridWalker {
    pub fn new(width: u32, height: u32, cell_size: f64, angle_degrees: f64) -> Self {
        let (w, h) = (width as f64, height as f64);
        let usable = cell_size.is_finite() && cell_size > 0.0 && width > 0 && height > 0;
        let extent = if usable {
            let diagonal = (w * w + h * h).sqrt();
            (diagonal / cell_size).ceil().min(MAX_EXTENT) as i64 + 1
        } else {
            0
        };
        let (sin, cos) = angle_degrees.to_radians().sin_cos();

        Self {
            width: w,
            height: h,
            cell_size,
            cos,
            sin,
            extent,
            grid_x: -extent,
            grid_y: -extent,
        }
    }

    /// Number of index pairs in the full square walk, before clipping.
    pub fn candidate_count(&self) -> u64 {
        let side = (2 * self.extent) as u64;
        side.saturating_mul(side)
    }

    fn project(&self, grid_x: i64, grid_y: i64) -> (f64, f64) {
        let lx = grid_x as f64 * self.cell_size;
        let ly = grid_y as f64 * self.cell_size;
        (
            lx * self.cos - ly * self.sin + self.width / 2.0,
            lx * self.sin + ly * self.cos + self.height / 2.0,
        )
    }
}

impl Iterator for GridWalker {
    type Item = GridCell;

    fn next(&mut self) -> Option<GridCell> {
        while self.grid_y < self.extent {
            let (gx, gy) = (self.grid_x, self.grid_y);
            self.grid_x += 1;
            if self.grid_x >= self.extent {
                self.grid_x = -self.extent;
                self.grid_y += 1;
            }

            let (x, y) = self.project(gx, gy);
            if x < 0.0 || x >= self.width || y < 0.0 || y >= self.height {
                continue;
            }
            return Some(GridCell {
                grid_x: gx,
                grid_y: gy,
                x,
                y,
            });
        }
        None
    }
}
