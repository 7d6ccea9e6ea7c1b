//! Format registry.
//!
//! An [`Environment`] holds named detectors and runs them against a dataset
//! root, one fresh detection context per detector, ranking the matches by
//! confidence.

mod options;
mod report;

pub use options::DetectOptions;
pub use report::{DetectionReport, FormatOutcome, FormatVerdict};

use std::path::Path;

use tracing::debug;

use crate::detection::{trace_format_detector, DetectionError, FormatDetector};
use crate::error::LabelprobeError;
use crate::formats::BUILTIN_FORMATS;

/// A detector registered under a format name.
pub struct RegisteredFormat {
    name: String,
    description: String,
    detector: Box<dyn FormatDetector + Send + Sync>,
}

impl RegisteredFormat {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Registry of dataset format detectors.
pub struct Environment {
    formats: Vec<RegisteredFormat>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Environment {
    /// An environment with no formats registered.
    pub fn empty() -> Self {
        Self {
            formats: Vec::new(),
        }
    }

    /// An environment with every built-in format registered.
    pub fn builtin() -> Self {
        let mut env = Self::empty();
        for format in BUILTIN_FORMATS {
            env.formats.push(RegisteredFormat {
                name: format.name.to_string(),
                description: format.description.to_string(),
                detector: Box::new(format.detector),
            });
        }
        env
    }

    /// Registers a detector. Names must be unique.
    pub fn register<D>(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        detector: D,
    ) -> Result<(), LabelprobeError>
    where
        D: FormatDetector + Send + Sync + 'static,
    {
        let name = name.into();
        if self.contains(&name) {
            return Err(LabelprobeError::DuplicateFormat(name));
        }
        self.formats.push(RegisteredFormat {
            name,
            description: description.into(),
            detector: Box::new(detector),
        });
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formats.iter().any(|f| f.name == name)
    }

    /// Registered formats in registration order.
    pub fn formats(&self) -> &[RegisteredFormat] {
        &self.formats
    }

    /// Returns the formats that match `path` with the highest confidence.
    ///
    /// Several names are returned when detectors tie; an empty list means
    /// nothing matched.
    pub fn detect_dataset(&self, path: &Path) -> Result<Vec<String>, LabelprobeError> {
        let report = self.detect_report(path, &DetectOptions::default())?;
        Ok(report
            .best_matches()
            .into_iter()
            .map(str::to_string)
            .collect())
    }

    /// Runs every selected detector against `path` and reports each verdict.
    ///
    /// A detector that breaks its contract, or fails with anything other than
    /// unmet requirements, aborts detection with
    /// [`LabelprobeError::DetectorFailed`].
    pub fn detect_report(
        &self,
        path: &Path,
        options: &DetectOptions,
    ) -> Result<DetectionReport, LabelprobeError> {
        options.check_names(|name| self.contains(name))?;

        let mut report = DetectionReport::new(path);

        for format in self.formats.iter().filter(|f| options.includes(&f.name)) {
            debug!("Checking '{}' format...", format.name);

            let (result, checks) = trace_format_detector(path, format.detector.as_ref());
            let checks = if options.explain { checks } else { Vec::new() };

            let verdict = match result {
                Ok(confidence) if options.accepts(confidence) => {
                    debug!("Format matched with confidence {}", confidence);
                    FormatVerdict::Matched { confidence }
                }
                Ok(confidence) => {
                    debug!(
                        "Format matched with confidence {}, below the configured minimum",
                        confidence
                    );
                    FormatVerdict::BelowThreshold { confidence }
                }
                Err(DetectionError::Unmet(unmet)) => {
                    debug!("Format did not match");
                    if let [only] = unmet.failed_alternatives() {
                        debug!("  Unmet requirement: {}", only);
                    } else {
                        debug!("  No alternative requirements were met:");
                        for alternative in unmet.failed_alternatives() {
                            debug!("    {}", alternative);
                        }
                    }
                    FormatVerdict::Rejected {
                        unmet_requirements: unmet.into_failed_alternatives(),
                    }
                }
                Err(source) => {
                    return Err(LabelprobeError::DetectorFailed {
                        format: format.name.clone(),
                        source,
                    });
                }
            };

            report.add(FormatOutcome {
                format: format.name.clone(),
                verdict,
                checks,
            });
        }

        Ok(report)
    }
}
