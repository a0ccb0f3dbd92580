use std::path::PathBuf;
use thiserror::Error;

/// The main error type for imgaug operations.
#[derive(Debug, Error)]
pub enum AugmentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to parse labels JSON from {path}: {source}")]
    LabelsParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write labels JSON to {path}: {source}")]
    LabelsWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse pipeline YAML from {path}: {source}")]
    PipelineParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to parse pipeline JSON from {path}: {source}")]
    PipelineJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Empty range [{min}, {max}): max must be greater than min")]
    InvalidRange { min: String, max: String },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Degenerate image size {width}x{height}")]
    DegenerateSize { width: i64, height: i64 },
}
