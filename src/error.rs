use halftone_engine::EngineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("File too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },

    #[error("Unsupported dimensions: {width}x{height} (max {max_width}x{max_height})")]
    UnsupportedDimensions {
        width: u32,
        height: u32,
        max_width: u32,
        max_height: u32,
    },

    #[error("Not a PNG image")]
    UnsupportedFormat,

    #[error("PNG decode error: {0}")]
    PngDecode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Image error: {0}")]
    Image(#[from] EngineError),

    #[error("Nothing to export: image has no pixels")]
    EmptyCanvas,

    #[error("No {0} path configured")]
    MissingPath(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse job file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },

    #[error("Invalid erase point {0:?} (expected x,y[,radius])")]
    ErasePoint(String),
}
