//! Failure types produced while placing requirements on a dataset root.

use std::fmt;

use thiserror::Error;

/// Shorthand for results returned by requirement-placing operations and detectors.
pub type DetectResult<T> = Result<T, DetectionError>;

/// A dataset does not meet the requirements of a format.
///
/// If this is returned, the dataset must meet at least one of the listed
/// requirements to be detected as that format. That is necessary, though
/// not necessarily sufficient.
///
/// Only [`DetectionContext`](super::DetectionContext) creates these, which is
/// what keeps the list of failed alternatives non-empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequirementsUnmet {
    failed_alternatives: Vec<String>,
}

impl RequirementsUnmet {
    /// Returns `None` when `failed_alternatives` is empty.
    pub(crate) fn new(failed_alternatives: Vec<String>) -> Option<Self> {
        if failed_alternatives.is_empty() {
            return None;
        }
        Some(Self {
            failed_alternatives,
        })
    }

    pub(crate) fn single(requirement_desc: impl Into<String>) -> Self {
        Self {
            failed_alternatives: vec![requirement_desc.into()],
        }
    }

    /// Human-readable statements, one per requirement that was not met.
    pub fn failed_alternatives(&self) -> &[String] {
        &self.failed_alternatives
    }

    pub fn into_failed_alternatives(self) -> Vec<String> {
        self.failed_alternatives
    }
}

impl fmt::Display for RequirementsUnmet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.failed_alternatives.as_slice() {
            [only] => write!(f, "unmet requirement: {}", only),
            alternatives => {
                write!(f, "no alternative requirements were met: ")?;
                for (i, alt) in alternatives.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", alt)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for RequirementsUnmet {}

/// Everything that can stop a detector.
///
/// Only [`DetectionError::Unmet`] means "this root is not in this format".
/// [`DetectionError::ContractViolation`] is a bug in the detector and must
/// never be treated as a non-match. The remaining variants let detector and
/// probe bodies use `?` on the parsers they call; outside of
/// `probe_text_file` they propagate unchanged.
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error(transparent)]
    Unmet(#[from] RequirementsUnmet),

    #[error("detector contract violated: {0}")]
    ContractViolation(String),

    #[error("{0}")]
    Mismatch(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),
}

impl DetectionError {
    /// A probe body rejecting the contents it read.
    pub fn mismatch(message: impl Into<String>) -> Self {
        DetectionError::Mismatch(message.into())
    }

    pub(crate) fn contract(message: impl Into<String>) -> Self {
        DetectionError::ContractViolation(message.into())
    }

    pub fn is_unmet(&self) -> bool {
        matches!(self, DetectionError::Unmet(_))
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, DetectionError::ContractViolation(_))
    }

    /// The failure list, if this is a data-driven unmet requirement.
    pub fn as_unmet(&self) -> Option<&RequirementsUnmet> {
        match self {
            DetectionError::Unmet(unmet) => Some(unmet),
            _ => None,
        }
    }
}
