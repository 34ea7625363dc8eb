pub mod config;
pub mod limits;

pub use config::{validate_params, ErasePoint, JobConfig};
pub use limits::{UploadLimits, MAX_DIMENSION, MAX_FILE_SIZE};
