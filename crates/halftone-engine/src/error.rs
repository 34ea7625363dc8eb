//! Error types for the halftone engine.
//!
//! The engine itself almost never fails: malformed colors fall back to black
//! and empty sample windows are skipped. Errors only surface when a caller
//! hands over data that cannot be interpreted at all.

use std::fmt;

/// Error type for parsing hex color strings.
///
/// Only the strict `#RRGGBB` / `RRGGBB` grammar is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// Hex string does not have exactly 6 digits after stripping '#'
    InvalidLength,
    /// A character that is not an ASCII hex digit
    InvalidDigit(char),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength => {
                write!(f, "invalid hex color length (expected 6 digits)")
            }
            ParseColorError::InvalidDigit(c) => {
                write!(f, "invalid hex digit: {:?}", c)
            }
        }
    }
}

impl std::error::Error for ParseColorError {}

/// Error returned when a shape or pattern name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNameError {
    /// What kind of name was being parsed ("shape", "pattern")
    pub kind: &'static str,
    /// The rejected input
    pub name: String,
}

impl fmt::Display for ParseNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {}: {:?}", self.kind, self.name)
    }
}

impl std::error::Error for ParseNameError {}

/// Unified error type for the engine's public API.
#[derive(Debug)]
pub enum EngineError {
    /// Pixel buffer length does not match `width * height * 4`
    BufferSize {
        /// Expected byte count
        expected: usize,
        /// Byte count actually supplied
        actual: usize,
    },
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::BufferSize { expected, actual } => write!(
                f,
                "pixel buffer has {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for EngineError {}
