//! Upload guards applied before an image reaches the engine.
//!
//! A generation pass is synchronous and walks every grid cell, so its cost
//! is bounded by capping the input size here.

use crate::error::RenderError;

/// Maximum accepted file size: 10 MiB
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Maximum accepted width and height in pixels
pub const MAX_DIMENSION: u32 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadLimits {
    pub max_file_size: u64,
    pub max_width: u32,
    pub max_height: u32,
}

impl Default for UploadLimits {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            max_width: MAX_DIMENSION,
            max_height: MAX_DIMENSION,
        }
    }
}

impl UploadLimits {
    pub fn check_file_size(&self, size: u64) -> Result<(), RenderError> {
        if size > self.max_file_size {
            return Err(RenderError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    pub fn check_dimensions(&self, width: u32, height: u32) -> Result<(), RenderError> {
        if width > self.max_width || height > self.max_height {
            return Err(RenderError::UnsupportedDimensions {
                width,
                height,
                max_width: self.max_width,
                max_height: self.max_height,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let limits = UploadLimits::default();
        assert_eq!(limits.max_file_size, 10_485_760);
        assert_eq!((limits.max_width, limits.max_height), (4096, 4096));
    }

    #[test]
    fn test_file_size_boundary() {
        let limits = UploadLimits::default();
        assert!(limits.check_file_size(MAX_FILE_SIZE).is_ok());
        assert!(matches!(
            limits.check_file_size(MAX_FILE_SIZE + 1),
            Err(RenderError::FileTooLarge { .. })
        ));
    }

    #[test]
    fn test_dimension_boundary() {
        let limits = UploadLimits::default();
        assert!(limits.check_dimensions(4096, 4096).is_ok());
        assert!(limits.check_dimensions(0, 0).is_ok());
        assert!(limits.check_dimensions(4097, 10).is_err());
        assert!(limits.check_dimensions(10, 4097).is_err());
    }
}
