//! CVAT "for images" task export: a single `annotations.xml` whose
//! `<annotations>` root holds `<meta>` and/or `<image>` elements.

use roxmltree::Document;

use crate::detection::{DetectResult, DetectionContext, DetectionError, FormatDetectionConfidence};

pub const NAME: &str = "cvat";

pub fn detect(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
    let path = context.require_file("annotations.xml", &[])?;
    context.probe_text_file(
        &path,
        "must have an <annotations> root element with <meta> or <image> children",
        |_, file| {
            let xml = file.read_all()?;
            let document = Document::parse(&xml)?;
            let root = document.root_element();
            if root.tag_name().name() != "annotations" {
                return Err(DetectionError::mismatch("missing <annotations> root element"));
            }
            let has_known_child = root.children().any(|n| {
                n.is_element() && matches!(n.tag_name().name(), "meta" | "image")
            });
            if !has_known_child {
                return Err(DetectionError::mismatch("no <meta> or <image> elements"));
            }
            Ok(())
        },
    )?;

    Ok(None)
}
