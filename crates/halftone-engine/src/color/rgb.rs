//! 8-bit RGB color type with strict hex parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseColorError;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Black, the fallback for malformed color strings.
    pub const BLACK: Self = Self { r: 0, g: 0, b: 0 };

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color, falling back to black on malformed input.
    ///
    /// ```
    /// use halftone_engine::color::Rgb;
    ///
    /// assert_eq!(Rgb::parse_or_black("#ff8000"), Rgb::new(255, 128, 0));
    /// assert_eq!(Rgb::parse_or_black("orange"), Rgb::BLACK);
    /// ```
    pub fn parse_or_black(s: &str) -> Self {
        s.parse().unwrap_or(Self::BLACK)
    }

    /// Linear blend toward `other`.
    ///
    /// Each channel is `round(a + (b - a) * t)` with halves rounded up.
    /// `t` is not clamped; the result is saturated to 0..=255 only so that
    /// out-of-range `t` cannot wrap.
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let mix = |a: u8, b: u8| -> u8 {
            let a = a as f64;
            let v = a + (b as f64 - a) * t;
            (v + 0.5).floor().clamp(0.0, 255.0) as u8
        };
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    /// Convert to a tiny-skia color with the given alpha.
    #[inline]
    pub fn to_skia(self, alpha: u8) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, alpha)
    }
}

/// Interpolate between two hex colors.
///
/// Malformed inputs are treated as black rather than raising an error.
/// `t = 0` yields exactly `color_a`, `t = 1` exactly `color_b`.
pub fn interpolate(color_a: &str, color_b: &str, t: f64) -> Rgb {
    Rgb::parse_or_black(color_a).lerp(Rgb::parse_or_black(color_b), t)
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive).
    ///
    /// Shorthand `#RGB`, surrounding whitespace and signs are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.strip_prefix('#').unwrap_or(s);

        if let Some(c) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(c));
        }
        if digits.len() != 6 {
            return Err(ParseColorError::InvalidLength);
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ParseColorError::InvalidLength)
        };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
