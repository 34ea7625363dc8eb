//! Color parsing and interpolation.
//!
//! Colors arrive as hex strings from the parameter record and are blended
//! linearly in plain 8-bit RGB. There is no gamma handling here; the
//! halftone palette is a stylistic two-color ramp, not a color-managed one.
//!
//! # Example
//!
//! ```
//! use halftone_engine::color::{interpolate, Rgb};
//!
//! let mid = interpolate("#000000", "#ff0000", 0.5);
//! assert_eq!(mid, Rgb::new(128, 0, 0));
//! ```

mod rgb;

pub use rgb::{interpolate, Rgb};
