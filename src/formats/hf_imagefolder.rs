//! Hugging Face ImageFolder: `metadata.jsonl` at the root or inside split
//! subdirectories, one JSON object per image keyed by `file_name`.

use serde_json::{Map, Value};

use crate::detection::{DetectResult, DetectionContext, DetectionError, FormatDetectionConfidence};

pub const NAME: &str = "hf-imagefolder";

pub fn detect(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
    let metadata = context.require_file("**/metadata.jsonl", &[])?;
    context.probe_text_file(
        &metadata,
        "must hold JSON objects with a \"file_name\" key",
        |_, file| {
            let Some(line) = file.first_non_empty_line()? else {
                return Err(DetectionError::mismatch("no rows"));
            };
            let row: Map<String, Value> = serde_json::from_str(&line)?;
            if !matches!(row.get("file_name"), Some(Value::String(_))) {
                return Err(DetectionError::mismatch("first row has no file_name"));
            }
            Ok(())
        },
    )?;

    Ok(None)
}
