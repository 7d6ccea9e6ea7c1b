//! Labeled Faces in the Wild.
//!
//! Each subset directory has `annotations/pairs.txt`, whose first line is a
//! numeric header (pair count, optionally preceded by a fold count).

use crate::detection::{DetectResult, DetectionContext, DetectionError, FormatDetectionConfidence};

pub const NAME: &str = "lfw";

pub fn detect(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
    let pairs = context.require_file("*/annotations/pairs.txt", &[])?;
    context.probe_text_file(&pairs, "must start with a numeric header", |_, file| {
        let Some(header) = file.first_non_empty_line()? else {
            return Err(DetectionError::mismatch("empty pairs file"));
        };
        let all_numeric = header
            .split_whitespace()
            .all(|token| token.parse::<u32>().is_ok());
        if !all_numeric {
            return Err(DetectionError::mismatch(format!("bad header '{}'", header)));
        }
        Ok(())
    })?;

    Ok(None)
}
