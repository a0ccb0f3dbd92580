//! JSON files for label sets.
//!
//! The layout is `{"bboxes": [{"xmin": .., "ymin": .., "xmax": .., "ymax": ..}]}`.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use super::Labels;
use crate::error::AugmentError;

/// Reads a label set from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_labels(path: &Path) -> Result<Labels, AugmentError> {
    let file = File::open(path).map_err(AugmentError::Io)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).map_err(|source| AugmentError::LabelsParse {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes a label set to a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_labels(path: &Path, labels: &Labels) -> Result<(), AugmentError> {
    let file = File::create(path).map_err(AugmentError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, labels).map_err(|source| AugmentError::LabelsWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a label set from a JSON string.
pub fn from_json_str(json: &str) -> Result<Labels, serde_json::Error> {
    serde_json::from_str(json)
}

/// Writes a label set to a JSON string.
pub fn to_json_string(labels: &Labels) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(labels)
}
