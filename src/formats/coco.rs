//! COCO object detection JSON.
//!
//! Exports usually keep their JSON under `annotations/`, but a single file at
//! the root is common too, so both locations are tried.

use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::detection::{DetectResult, DetectionContext, FormatDetectionConfidence};

pub const NAME: &str = "coco";

const ANNOTATION_PATTERNS: [&str; 2] = ["annotations/*.json", "*.json"];

#[derive(Deserialize)]
#[allow(dead_code)]
struct CocoShape {
    images: Vec<IgnoredAny>,
    categories: Vec<IgnoredAny>,
    annotations: Vec<CocoAnnotationShape>,
}

/// COCO boxes are `[x, y, width, height]` arrays.
#[derive(Deserialize)]
#[allow(dead_code)]
struct CocoAnnotationShape {
    bbox: [f64; 4],
}

pub fn detect(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
    context.require_any(|context| {
        for pattern in ANNOTATION_PATTERNS {
            context.alternative(|context| {
                let path = context.require_file(pattern, &[])?;
                probe_coco_json(context, &path)
            })?;
        }
        Ok(())
    })?;

    Ok(None)
}

fn probe_coco_json(context: &mut DetectionContext, path: &str) -> DetectResult<()> {
    context.probe_text_file(
        path,
        "must be a JSON object with \"images\", \"categories\" and \"annotations\" \
         lists and [x, y, w, h] boxes",
        |_, file| {
            serde_json::from_reader::<_, CocoShape>(file)?;
            Ok(())
        },
    )
}
