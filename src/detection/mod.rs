//! Declarative dataset format detection.
//!
//! A format describes what evidence in a directory tree proves membership
//! through a [`FormatDetector`]. The detector receives a
//! [`DetectionContext`] bound to the candidate root and places requirements
//! on it: files that must exist, text files whose contents must parse, and
//! alternative sets of requirements of which at least one must hold.
//!
//! # Example
//!
//! ```
//! use labelprobe::detection::{
//!     apply_format_detector, DetectResult, DetectionContext, FormatDetectionConfidence,
//! };
//!
//! fn detect_pairs(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
//!     context.require_file("*/annotations/pairs.txt", &[])?;
//!     Ok(None)
//! }
//!
//! let temp = tempfile::tempdir().unwrap();
//! let err = apply_format_detector(temp.path(), &detect_pairs).unwrap_err();
//! assert!(err.is_unmet());
//! ```

mod confidence;
mod context;
mod error;
mod paths;
mod probe;

use std::path::Path;

pub use confidence::FormatDetectionConfidence;
pub use context::{DetectionContext, RequirementOutcome};
pub use error::{DetectResult, DetectionError, RequirementsUnmet};
#[cfg(feature = "fuzzing")]
pub use paths::fuzz_is_path_within_root;
pub use probe::TextProbe;

/// Detection logic for one dataset format.
///
/// Returns the confidence that the dataset belongs to the format (`None`
/// means [`FormatDetectionConfidence::Medium`]), or a
/// [`DetectionError::Unmet`] produced by one of the context's requirement
/// methods. Plain functions and closures with the matching signature
/// implement this trait.
pub trait FormatDetector {
    fn detect(
        &self,
        context: &mut DetectionContext,
    ) -> DetectResult<Option<FormatDetectionConfidence>>;
}

impl<F> FormatDetector for F
where
    F: Fn(&mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>>,
{
    fn detect(
        &self,
        context: &mut DetectionContext,
    ) -> DetectResult<Option<FormatDetectionConfidence>> {
        self(context)
    }
}

/// Checks whether the dataset at `root_path` belongs to the format detected
/// by `detector` and returns the confidence of the match.
///
/// A root that is not a directory fails as an unmet requirement without
/// running the detector. Errors from the detector are returned unchanged.
pub fn apply_format_detector<D>(
    root_path: &Path,
    detector: &D,
) -> DetectResult<FormatDetectionConfidence>
where
    D: FormatDetector + ?Sized,
{
    trace_format_detector(root_path, detector).0
}

/// Like [`apply_format_detector`], but also returns every atomic requirement
/// the detector placed, in order.
pub fn trace_format_detector<D>(
    root_path: &Path,
    detector: &D,
) -> (
    DetectResult<FormatDetectionConfidence>,
    Vec<RequirementOutcome>,
)
where
    D: FormatDetector + ?Sized,
{
    let mut context = DetectionContext::new(root_path);

    let result = if root_path.is_dir() {
        detector
            .detect(&mut context)
            .map(|confidence| confidence.unwrap_or_default())
    } else {
        context.fail(format!(
            "root path {} must refer to a directory",
            root_path.display()
        ))
    };

    (result, context.into_outcomes())
}
