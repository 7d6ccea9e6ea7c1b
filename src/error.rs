use std::path::PathBuf;
use thiserror::Error;

use crate::detection::DetectionError;

/// The main error type for labelprobe operations.
#[derive(Debug, Error)]
pub enum LabelprobeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config from {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A detector broke its contract or hit an unexpected error. This is a
    /// bug in the detector, never a "format does not match" result.
    #[error("Detector for format '{format}' failed: {source}")]
    DetectorFailed {
        format: String,
        #[source]
        source: DetectionError,
    },

    #[error("No known dataset format matched {}", .path.display())]
    NoFormatDetected { path: PathBuf },

    #[error("{} matches more than one format: {}", .path.display(), .formats.join(", "))]
    AmbiguousFormat { path: PathBuf, formats: Vec<String> },

    #[error("Format '{0}' is already registered")]
    DuplicateFormat(String),

    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    #[error("Failed to serialize report: {0}")]
    ReportWrite(#[from] serde_json::Error),
}
