//! Detection report types for structured, per-format results.
//!
//! One entry per checked format, printable for humans and serializable for
//! tools.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::detection::{FormatDetectionConfidence, RequirementOutcome};

/// The result of running every selected detector against one root.
#[derive(Clone, Debug, Default, Serialize)]
pub struct DetectionReport {
    /// The dataset root that was checked.
    pub path: PathBuf,
    /// One entry per checked format, in registration order.
    pub outcomes: Vec<FormatOutcome>,
}

/// What one detector concluded.
#[derive(Clone, Debug, Serialize)]
pub struct FormatOutcome {
    pub format: String,
    #[serde(flatten)]
    pub verdict: FormatVerdict,
    /// Requirements the detector placed; only filled in when explaining.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checks: Vec<RequirementOutcome>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormatVerdict {
    /// The dataset met the format's requirements.
    Matched {
        confidence: FormatDetectionConfidence,
    },
    /// Matched, but below the configured minimum confidence.
    BelowThreshold {
        confidence: FormatDetectionConfidence,
    },
    /// The dataset failed the format's requirements; at least one of these
    /// must be met for it to match.
    Rejected { unmet_requirements: Vec<String> },
}

impl DetectionReport {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            outcomes: Vec::new(),
        }
    }

    pub fn add(&mut self, outcome: FormatOutcome) {
        self.outcomes.push(outcome);
    }

    /// The highest confidence among selectable matches, if any.
    pub fn best_confidence(&self) -> Option<FormatDetectionConfidence> {
        self.outcomes
            .iter()
            .filter_map(|o| match o.verdict {
                FormatVerdict::Matched { confidence } => Some(confidence),
                _ => None,
            })
            .max()
    }

    /// Names of the matched formats at the highest confidence, in
    /// registration order. Picking among ties is left to the caller.
    pub fn best_matches(&self) -> Vec<&str> {
        let Some(best) = self.best_confidence() else {
            return Vec::new();
        };
        self.outcomes
            .iter()
            .filter(|o| o.verdict == FormatVerdict::Matched { confidence: best })
            .map(|o| o.format.as_str())
            .collect()
    }

    pub fn matched_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.verdict, FormatVerdict::Matched { .. }))
            .count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.verdict, FormatVerdict::Rejected { .. }))
            .count()
    }
}

impl fmt::Display for DetectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Format detection for {}:", self.path.display())?;
        writeln!(f)?;

        for outcome in &self.outcomes {
            write!(f, "{}", outcome)?;
        }

        writeln!(f)?;
        match self.best_matches().as_slice() {
            [] => writeln!(f, "No format matched."),
            [only] => writeln!(f, "Detected format: {}", only),
            several => writeln!(f, "Ambiguous: matches {}", several.join(", ")),
        }
    }
}

impl fmt::Display for FormatOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.verdict {
            FormatVerdict::Matched { confidence } => {
                writeln!(f, "  ✓ {} ({} confidence)", self.format, confidence)?;
            }
            FormatVerdict::BelowThreshold { confidence } => {
                writeln!(
                    f,
                    "  ~ {} ({} confidence, below minimum)",
                    self.format, confidence
                )?;
            }
            FormatVerdict::Rejected { unmet_requirements } => {
                writeln!(f, "  ✗ {}", self.format)?;
                if let [only] = unmet_requirements.as_slice() {
                    writeln!(f, "      unmet requirement: {}", only)?;
                } else {
                    writeln!(f, "      no alternative requirements were met:")?;
                    for requirement in unmet_requirements {
                        writeln!(f, "        - {}", requirement)?;
                    }
                }
            }
        }

        for check in &self.checks {
            let mark = if check.passed { "pass" } else { "fail" };
            writeln!(f, "      [{}] {}", mark, check.requirement)?;
        }
        Ok(())
    }
}
