//! panlabel intermediate representation JSON.
//!
//! Shares its top-level shape with COCO; boxes are what tell them apart. IR
//! boxes are pixel-space `{xmin, ymin, xmax, ymax}` objects.

use serde::de::IgnoredAny;
use serde::Deserialize;

use crate::detection::{DetectResult, DetectionContext, FormatDetectionConfidence};

pub const NAME: &str = "ir-json";

#[derive(Deserialize)]
#[allow(dead_code)]
struct IrShape {
    images: Vec<IgnoredAny>,
    categories: Vec<IgnoredAny>,
    annotations: Vec<IrAnnotationShape>,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct IrAnnotationShape {
    bbox: IrBBoxShape,
}

#[derive(Deserialize)]
#[allow(dead_code)]
struct IrBBoxShape {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

pub fn detect(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
    let path = context.require_file("*.json", &[])?;
    context.probe_text_file(
        &path,
        "must be a JSON object with \"images\", \"categories\" and \"annotations\" \
         lists and {xmin, ymin, xmax, ymax} boxes",
        |_, file| {
            serde_json::from_reader::<_, IrShape>(file)?;
            Ok(())
        },
    )?;

    Ok(None)
}
