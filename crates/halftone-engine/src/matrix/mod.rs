//! Ordered-dither threshold matrices.
//!
//! A [`DitherMatrix`] is a square, periodic grid of thresholds in [0, 1).
//! It is tiled across the halftone grid by grid index (not pixel position),
//! so a rotated grid rotates the pattern with it.
//!
//! The library is built once on first use; lookups afterwards are plain
//! borrows of static data.
//!
//! # Example
//!
//! ```
//! use halftone_engine::matrix::{matrix_for, DitherPattern};
//!
//! assert!(matrix_for(DitherPattern::Variable).is_none());
//!
//! let bayer = matrix_for(DitherPattern::Bayer2).unwrap();
//! assert_eq!(bayer.size(), 2);
//! assert_eq!(bayer.get(1, 0), 0.75);
//! ```

mod tables;

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::ParseNameError;
use tables::*;

/// Which threshold pattern drives the draw/skip decision.
///
/// [`DitherPattern::Variable`] is a sentinel: no matrix is consulted and
/// shapes are sized continuously by darkness instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DitherPattern {
    /// Continuous size mode (no matrix)
    Variable,
    /// 2x2 Bayer, coarse blocks
    Bayer2,
    /// 4x4 Bayer
    Bayer4,
    /// 8x8 Bayer, the finest ordered pattern
    #[default]
    Bayer8,
    /// 6x6 clustered-dot screen
    Clustered,
    /// 4x4 horizontal scanlines
    Horizontal,
    /// 4x4 vertical scanlines
    Vertical,
    /// 4x4 diagonal stripes
    Diagonal,
    /// 4x4 checkerboard
    Checkerboard,
    /// 5x5 radial pattern
    Circular,
}

impl DitherPattern {
    /// Every pattern, in presentation order.
    pub const ALL: [DitherPattern; 10] = [
        DitherPattern::Variable,
        DitherPattern::Bayer2,
        DitherPattern::Bayer4,
        DitherPattern::Bayer8,
        DitherPattern::Clustered,
        DitherPattern::Horizontal,
        DitherPattern::Vertical,
        DitherPattern::Diagonal,
        DitherPattern::Checkerboard,
        DitherPattern::Circular,
    ];

    /// The canonical lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            DitherPattern::Variable => "variable",
            DitherPattern::Bayer2 => "bayer2",
            DitherPattern::Bayer4 => "bayer4",
            DitherPattern::Bayer8 => "bayer8",
            DitherPattern::Clustered => "clustered",
            DitherPattern::Horizontal => "horizontal",
            DitherPattern::Vertical => "vertical",
            DitherPattern::Diagonal => "diagonal",
            DitherPattern::Checkerboard => "checkerboard",
            DitherPattern::Circular => "circular",
        }
    }

    /// True for the size-varying sentinel.
    #[inline]
    pub fn is_variable(self) -> bool {
        self == DitherPattern::Variable
    }
}

impl fmt::Display for DitherPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DitherPattern {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DitherPattern::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseNameError {
                kind: "pattern",
                name: s.to_string(),
            })
    }
}

/// A square threshold matrix with values pre-normalized to [0, 1).
#[derive(Debug, Clone, PartialEq)]
pub struct DitherMatrix {
    size: usize,
    /// Row-major thresholds, `size * size` entries.
    values: Vec<f64>,
}

impl DitherMatrix {
    fn from_table<const N: usize>(table: &[[u8; N]; N], divisor: f64) -> Self {
        let values = table
            .iter()
            .flat_map(|row| row.iter().map(move |&v| v as f64 / divisor))
            .collect();
        Self { size: N, values }
    }

    /// Side length of the matrix.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Threshold at `(row, col)` inside the base tile.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside `0..size`.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.size && col < self.size, "matrix index out of range");
        self.values[row * self.size + col]
    }

    /// Threshold for a grid cell, tiling the matrix over all integers.
    ///
    /// Negative indices wrap to non-negative ones, so the grid left of and
    /// above the rotation center continues the same pattern.
    #[inline]
    pub fn threshold_at(&self, grid_x: i64, grid_y: i64) -> f64 {
        let n = self.size as i64;
        let col = grid_x.rem_euclid(n) as usize;
        let row = grid_y.rem_euclid(n) as usize;
        self.values[row * self.size + col]
    }

    /// All thresholds, row-major.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

struct MatrixLibrary {
    bayer2: DitherMatrix,
    bayer4: DitherMatrix,
    bayer8: DitherMatrix,
    clustered: DitherMatrix,
    horizontal: DitherMatrix,
    vertical: DitherMatrix,
    diagonal: DitherMatrix,
    checkerboard: DitherMatrix,
    circular: DitherMatrix,
}

impl MatrixLibrary {
    fn build() -> Self {
        Self {
            bayer2: DitherMatrix::from_table(&BAYER_2, BAYER_2_DIVISOR),
            bayer4: DitherMatrix::from_table(&BAYER_4, BAYER_4_DIVISOR),
            bayer8: DitherMatrix::from_table(&BAYER_8, BAYER_8_DIVISOR),
            clustered: DitherMatrix::from_table(&CLUSTERED_6, CLUSTERED_6_DIVISOR),
            horizontal: DitherMatrix::from_table(&HORIZONTAL_4, LINES_4_DIVISOR),
            vertical: DitherMatrix::from_table(&VERTICAL_4, LINES_4_DIVISOR),
            diagonal: DitherMatrix::from_table(&DIAGONAL_4, LINES_4_DIVISOR),
            checkerboard: DitherMatrix::from_table(&CHECKERBOARD_4, CHECKERBOARD_4_DIVISOR),
            circular: DitherMatrix::from_table(&CIRCULAR_5, CIRCULAR_5_DIVISOR),
        }
    }
}

static LIBRARY: OnceLock<MatrixLibrary> = OnceLock::new();

/// Look up the matrix for a pattern; `None` for [`DitherPattern::Variable`].
pub fn matrix_for(pattern: DitherPattern) -> Option<&'static DitherMatrix> {
    let lib = LIBRARY.get_or_init(MatrixLibrary::build);
    match pattern {
        DitherPattern::Variable => None,
        DitherPattern::Bayer2 => Some(&lib.bayer2),
        DitherPattern::Bayer4 => Some(&lib.bayer4),
        DitherPattern::Bayer8 => Some(&lib.bayer8),
        DitherPattern::Clustered => Some(&lib.clustered),
        DitherPattern::Horizontal => Some(&lib.horizontal),
        DitherPattern::Vertical => Some(&lib.vertical),
        DitherPattern::Diagonal => Some(&lib.diagonal),
        DitherPattern::Checkerboard => Some(&lib.checkerboard),
        DitherPattern::Circular => Some(&lib.circular),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn matrices() -> impl Iterator<Item = (DitherPattern, &'static DitherMatrix)> {
        DitherPattern::ALL
            .into_iter()
            .filter_map(|p| matrix_for(p).map(|m| (p, m)))
    }

    #[test]
    fn test_variable_has_no_matrix() {
        assert!(matrix_for(DitherPattern::Variable).is_none());
        assert_eq!(matrices().count(), 9);
    }

    #[test]
    fn test_matrix_sizes() {
        let size = |p| matrix_for(p).unwrap().size();
        assert_eq!(size(DitherPattern::Bayer2), 2);
        assert_eq!(size(DitherPattern::Bayer4), 4);
        assert_eq!(size(DitherPattern::Bayer8), 8);
        assert_eq!(size(DitherPattern::Clustered), 6);
        assert_eq!(size(DitherPattern::Horizontal), 4);
        assert_eq!(size(DitherPattern::Vertical), 4);
        assert_eq!(size(DitherPattern::Diagonal), 4);
        assert_eq!(size(DitherPattern::Checkerboard), 4);
        assert_eq!(size(DitherPattern::Circular), 5);
    }

    #[test]
    fn test_all_values_in_unit_interval() {
        for (pattern, m) in matrices() {
            assert_eq!(m.values().len(), m.size() * m.size());
            for &v in m.values() {
                assert!((0.0..1.0).contains(&v), "{pattern}: {v} outside [0,1)");
            }
        }
    }

    #[test]
    fn test_tiling_is_periodic() {
        for (pattern, m) in matrices() {
            let base: BTreeSet<u64> = m.values().iter().map(|v| v.to_bits()).collect();
            let n = m.size() as i64;
            let mut tiled = BTreeSet::new();
            for y in -2 * n - 1..2 * n + 1 {
                for x in -2 * n - 1..2 * n + 1 {
                    let v = m.threshold_at(x, y);
                    assert_eq!(v, m.threshold_at(x + n, y), "{pattern} x-period");
                    assert_eq!(v, m.threshold_at(x, y - n), "{pattern} y-period");
                    tiled.insert(v.to_bits());
                }
            }
            assert_eq!(base, tiled, "{pattern}: tiled value set differs");
        }
    }

    #[test]
    fn test_negative_indices_wrap() {
        let m = matrix_for(DitherPattern::Bayer4).unwrap();
        assert_eq!(m.threshold_at(-1, 0), m.get(0, 3));
        assert_eq!(m.threshold_at(0, -1), m.get(3, 0));
        assert_eq!(m.threshold_at(-4, -4), m.get(0, 0));
    }

    #[test]
    fn test_checkerboard_values() {
        let m = matrix_for(DitherPattern::Checkerboard).unwrap();
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(0, 1), 0.5);
        assert_eq!(m.get(1, 0), 0.5);
        assert_eq!(m.get(1, 1), 0.0);
    }

    #[test]
    fn test_bayer8_extremes() {
        let m = matrix_for(DitherPattern::Bayer8).unwrap();
        assert_eq!(m.get(0, 0), 0.0);
        assert_eq!(m.get(3, 4), 62.0 / 64.0);
        assert_eq!(m.get(7, 0), 63.0 / 64.0);
    }

    #[test]
    fn test_pattern_names_round_trip() {
        for p in DitherPattern::ALL {
            assert_eq!(p.to_string().parse::<DitherPattern>(), Ok(p));
        }
        assert_eq!("BAYER4".parse::<DitherPattern>(), Ok(DitherPattern::Bayer4));
        assert!("bayer3".parse::<DitherPattern>().is_err());
    }

    #[test]
    fn test_pattern_serde_names() {
        let p: DitherPattern = serde_yaml::from_str("checkerboard").unwrap();
        assert_eq!(p, DitherPattern::Checkerboard);
        let p: DitherPattern = serde_yaml::from_str("bayer2").unwrap();
        assert_eq!(p, DitherPattern::Bayer2);
    }
}
