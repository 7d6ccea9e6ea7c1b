//! Label Studio task export JSON: an array of tasks, each with a `data`
//! object and at least one of `annotations`, `completions` or `predictions`.

use serde::de::IgnoredAny;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::detection::{DetectResult, DetectionContext, DetectionError, FormatDetectionConfidence};

pub const NAME: &str = "label-studio";

#[derive(Deserialize)]
struct LsTaskShape {
    #[allow(dead_code)]
    data: Map<String, Value>,
    #[serde(default)]
    annotations: Option<Vec<IgnoredAny>>,
    #[serde(default)]
    completions: Option<Vec<IgnoredAny>>,
    #[serde(default)]
    predictions: Option<Vec<IgnoredAny>>,
}

impl LsTaskShape {
    fn has_results(&self) -> bool {
        self.annotations.is_some() || self.completions.is_some() || self.predictions.is_some()
    }
}

pub fn detect(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
    let path = context.require_file("*.json", &[])?;
    context.probe_text_file(
        &path,
        "must be a JSON array of tasks with \"data\" and annotation results",
        |_, file| {
            let tasks: Vec<LsTaskShape> = serde_json::from_reader(file)?;
            if tasks.is_empty() {
                return Err(DetectionError::mismatch("no tasks"));
            }
            if !tasks.iter().any(LsTaskShape::has_results) {
                return Err(DetectionError::mismatch("no task carries results"));
            }
            Ok(())
        },
    )?;

    Ok(None)
}
