//! Confidence levels reported by format detectors.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How strongly a detector believes a dataset belongs to its format.
///
/// Every level has a strictly positive value, so `0` can always stand for
/// "no match" and compares below any real level.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum FormatDetectionConfidence {
    /// The dataset seems to belong to the format, but the format is too
    /// loosely defined to tell it apart from other formats.
    Low = 10,
    /// The dataset seems to belong to the format and is unlikely to belong
    /// to any other.
    #[default]
    Medium = 20,
}

impl FormatDetectionConfidence {
    /// All levels, lowest first.
    pub const ALL: [FormatDetectionConfidence; 2] = [
        FormatDetectionConfidence::Low,
        FormatDetectionConfidence::Medium,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            FormatDetectionConfidence::Low => "low",
            FormatDetectionConfidence::Medium => "medium",
        }
    }
}

impl fmt::Display for FormatDetectionConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FormatDetectionConfidence {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(FormatDetectionConfidence::Low),
            "medium" => Ok(FormatDetectionConfidence::Medium),
            other => Err(format!(
                "unknown confidence level '{}' (expected 'low' or 'medium')",
                other
            )),
        }
    }
}
