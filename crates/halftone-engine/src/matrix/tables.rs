//! Raw integer threshold tables and their divisors.
//!
//! Each table is divided by its divisor once when the library is built.
//! Every divisor is strictly greater than the table's largest entry, so all
//! normalized thresholds fall in [0, 1).

pub(super) const BAYER_2: [[u8; 2]; 2] = [[0, 2], [3, 1]];
pub(super) const BAYER_2_DIVISOR: f64 = 4.0;

pub(super) const BAYER_4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];
pub(super) const BAYER_4_DIVISOR: f64 = 16.0;

pub(super) const BAYER_8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];
pub(super) const BAYER_8_DIVISOR: f64 = 64.0;

/// Clustered-dot screen, the classic newspaper look.
pub(super) const CLUSTERED_6: [[u8; 6]; 6] = [
    [24, 17, 13, 14, 18, 25],
    [16, 8, 4, 5, 9, 19],
    [12, 3, 0, 1, 6, 15],
    [11, 2, 1, 0, 7, 20],
    [23, 10, 6, 5, 11, 21],
    [31, 22, 15, 14, 26, 32],
];
pub(super) const CLUSTERED_6_DIVISOR: f64 = 36.0;

pub(super) const HORIZONTAL_4: [[u8; 4]; 4] = [
    [0, 0, 0, 0],
    [2, 2, 2, 2],
    [1, 1, 1, 1],
    [3, 3, 3, 3],
];

pub(super) const VERTICAL_4: [[u8; 4]; 4] = [
    [0, 1, 2, 3],
    [0, 1, 2, 3],
    [0, 1, 2, 3],
    [0, 1, 2, 3],
];

pub(super) const DIAGONAL_4: [[u8; 4]; 4] = [
    [0, 1, 2, 3],
    [1, 2, 3, 0],
    [2, 3, 0, 1],
    [3, 0, 1, 2],
];

/// Shared by the three line patterns.
pub(super) const LINES_4_DIVISOR: f64 = 4.0;

pub(super) const CHECKERBOARD_4: [[u8; 4]; 4] = [
    [0, 1, 0, 1],
    [1, 0, 1, 0],
    [0, 1, 0, 1],
    [1, 0, 1, 0],
];
pub(super) const CHECKERBOARD_4_DIVISOR: f64 = 2.0;

pub(super) const CIRCULAR_5: [[u8; 5]; 5] = [
    [4, 3, 2, 3, 4],
    [3, 1, 0, 1, 3],
    [2, 0, 0, 0, 2],
    [3, 1, 0, 1, 3],
    [4, 3, 2, 3, 4],
];
pub(super) const CIRCULAR_5_DIVISOR: f64 = 5.0;
