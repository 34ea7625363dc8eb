//! Per-cell draw/skip and sizing decision.

use crate::matrix::{matrix_for, DitherMatrix};
use crate::params::HalftoneParams;

/// Outcome of gating one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decision {
    /// Draw a shape of this size (radius / half-side in px).
    Draw(f64),
    /// Darkness fell outside `threshold_min..=threshold_max`.
    OutOfRange,
    /// Darkness was below the dither matrix threshold for this cell.
    BelowMatrix,
}

/// Decides whether and how large to draw each cell.
///
/// In variable mode the size scales with darkness and every in-range cell is
/// drawn, even at size zero. In dithered mode the matrix decides presence and
/// all drawn shapes share one size.
#[derive(Debug, Clone, Copy)]
pub struct GatePolicy {
    threshold_min: f64,
    threshold_max: f64,
    base_size: f64,
    matrix: Option<&'static DitherMatrix>,
}

impl GatePolicy {
    pub fn new(params: &HalftoneParams) -> Self {
        Self {
            threshold_min: params.threshold_min,
            threshold_max: params.threshold_max,
            base_size: params.base_dot_size(),
            matrix: matrix_for(params.pattern),
        }
    }

    /// The matrix in use, `None` in variable mode.
    pub fn matrix(&self) -> Option<&'static DitherMatrix> {
        self.matrix
    }

    pub fn decide(&self, grid_x: i64, grid_y: i64, darkness: f64) -> Decision {
        // Written as a negated range check so NaN darkness is gated out too
        if !(darkness >= self.threshold_min && darkness <= self.threshold_max) {
            return Decision::OutOfRange;
        }

        match self.matrix {
            None => Decision::Draw(darkness * self.base_size),
            Some(m) => {
                if darkness < m.threshold_at(grid_x, grid_y) {
                    Decision::BelowMatrix
                } else {
                    Decision::Draw(self.base_size)
                }
            }
        }
    }
}
