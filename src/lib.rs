//! Halftone - rotated-grid halftone renderer
//!
//! Job files, PNG I/O and watch mode around the `halftone-engine` crate.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
