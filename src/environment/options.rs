//! Options controlling which formats are checked and which matches count.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::detection::FormatDetectionConfidence;
use crate::error::LabelprobeError;

/// Options for registry-level detection.
///
/// Can be loaded from a YAML file; the CLI layers its flags on top.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectOptions {
    /// If non-empty, only these formats are checked.
    pub only: Vec<String>,

    /// Formats that are never checked.
    pub exclude: Vec<String>,

    /// Matches below this confidence are reported but never selected.
    pub min_confidence: Option<FormatDetectionConfidence>,

    /// Record every requirement each detector placed.
    pub explain: bool,
}

impl DetectOptions {
    /// Reads options from a YAML file.
    ///
    /// ```yaml
    /// only: [coco, voc]
    /// exclude: []
    /// min_confidence: medium
    /// explain: false
    /// ```
    pub fn from_yaml_file(path: &Path) -> Result<Self, LabelprobeError> {
        let raw = fs::read_to_string(path)?;
        Self::from_yaml_str(&raw).map_err(|source| LabelprobeError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    /// Whether `format` should be checked at all.
    pub fn includes(&self, format: &str) -> bool {
        (self.only.is_empty() || self.only.iter().any(|f| f == format))
            && !self.exclude.iter().any(|f| f == format)
    }

    /// Whether a match at `confidence` may be selected.
    pub fn accepts(&self, confidence: FormatDetectionConfidence) -> bool {
        self.min_confidence.is_none_or(|min| confidence >= min)
    }

    /// Fails on the first name in `only` or `exclude` that `is_known` rejects.
    pub(crate) fn check_names(
        &self,
        is_known: impl Fn(&str) -> bool,
    ) -> Result<(), LabelprobeError> {
        match self
            .only
            .iter()
            .chain(&self.exclude)
            .find(|name| !is_known(name))
        {
            Some(unknown) => Err(LabelprobeError::UnknownFormat(unknown.clone())),
            None => Ok(()),
        }
    }
}
