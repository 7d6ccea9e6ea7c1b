//! A plain directory of images. Almost any image dataset also matches this,
//! so it only ever reports low confidence.

use crate::detection::{DetectResult, DetectionContext, FormatDetectionConfidence};
use crate::formats::IMAGE_EXTENSIONS_GLOB;

pub const NAME: &str = "image-dir";

pub fn detect(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
    context.require_file(&format!("**/*.{}", IMAGE_EXTENSIONS_GLOB), &[])?;
    Ok(Some(FormatDetectionConfidence::Low))
}
