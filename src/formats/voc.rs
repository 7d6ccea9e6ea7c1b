//! Pascal VOC XML.
//!
//! The dataset root holds an `Annotations/` directory with one XML file per
//! image. The `Annotations/` directory itself is accepted as a root too.

use roxmltree::Document;

use crate::detection::{DetectResult, DetectionContext, DetectionError, FormatDetectionConfidence};

pub const NAME: &str = "voc";

const ANNOTATION_PATTERNS: [&str; 2] = ["Annotations/*.xml", "*.xml"];

pub fn detect(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
    context.require_any(|context| {
        for pattern in ANNOTATION_PATTERNS {
            context.alternative(|context| {
                let path = context.require_file(pattern, &[])?;
                probe_annotation_xml(context, &path)
            })?;
        }
        Ok(())
    })?;

    Ok(None)
}

fn probe_annotation_xml(context: &mut DetectionContext, path: &str) -> DetectResult<()> {
    context.probe_text_file(path, "must have an <annotation> root element", |_, file| {
        let xml = file.read_all()?;
        let document = Document::parse(&xml)?;
        let root = document.root_element();
        if root.tag_name().name() != "annotation" {
            return Err(DetectionError::mismatch(format!(
                "unexpected root element <{}>",
                root.tag_name().name()
            )));
        }
        Ok(())
    })
}
