//! Built-in format detectors.
//!
//! Each submodule describes one on-disk annotation layout purely in terms of
//! requirements placed on a [`DetectionContext`]. The readers and writers for
//! these formats live outside this crate; the detectors only decide which of
//! them should be handed a directory.

pub mod cityscapes;
pub mod coco;
pub mod cvat;
pub mod hf_imagefolder;
pub mod image_dir;
pub mod ir_json;
pub mod label_studio;
pub mod lfw;
pub mod tfod;
pub mod voc;
pub mod yolo;

use crate::detection::{DetectResult, DetectionContext, FormatDetectionConfidence};

/// Signature shared by every built-in detector.
pub type DetectorFn = fn(&mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>>;

/// A detector shipped with the crate.
#[derive(Clone, Copy, Debug)]
pub struct BuiltinFormat {
    /// Stable format name, as accepted by `--only` / `--exclude`.
    pub name: &'static str,
    pub description: &'static str,
    pub detector: DetectorFn,
}

/// Built-in detectors in registration order. Ties in confidence are reported
/// in this order.
pub const BUILTIN_FORMATS: &[BuiltinFormat] = &[
    BuiltinFormat {
        name: ir_json::NAME,
        description: "panlabel intermediate representation JSON",
        detector: ir_json::detect,
    },
    BuiltinFormat {
        name: coco::NAME,
        description: "COCO object detection JSON",
        detector: coco::detect,
    },
    BuiltinFormat {
        name: label_studio::NAME,
        description: "Label Studio task export JSON",
        detector: label_studio::detect,
    },
    BuiltinFormat {
        name: voc::NAME,
        description: "Pascal VOC XML (Annotations/ directory)",
        detector: voc::detect,
    },
    BuiltinFormat {
        name: cvat::NAME,
        description: "CVAT for images XML export",
        detector: cvat::detect,
    },
    BuiltinFormat {
        name: tfod::NAME,
        description: "TensorFlow Object Detection CSV",
        detector: tfod::detect,
    },
    BuiltinFormat {
        name: yolo::NAME,
        description: "Ultralytics-style YOLO images/ + labels/ tree",
        detector: yolo::detect,
    },
    BuiltinFormat {
        name: hf_imagefolder::NAME,
        description: "Hugging Face ImageFolder with metadata.jsonl",
        detector: hf_imagefolder::detect,
    },
    BuiltinFormat {
        name: cityscapes::NAME,
        description: "Cityscapes segmentation (gtFine / imgsFine)",
        detector: cityscapes::detect,
    },
    BuiltinFormat {
        name: lfw::NAME,
        description: "Labeled Faces in the Wild (pairs.txt per subset)",
        detector: lfw::detect,
    },
    BuiltinFormat {
        name: image_dir::NAME,
        description: "Plain directory of images",
        detector: image_dir::detect,
    },
];

/// Image extensions recognized by the image-based detectors, as a glob
/// alternation.
pub(crate) const IMAGE_EXTENSIONS_GLOB: &str = "{jpg,jpeg,png,bmp,webp,tif,tiff}";

#[cfg(test)]
pub(crate) mod test_support {
    use std::fs;
    use std::path::Path;

    use crate::detection::{apply_format_detector, DetectResult, FormatDetectionConfidence};

    use super::DetectorFn;

    pub fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(path, contents).expect("write fixture file");
    }

    pub fn detect(root: &Path, detector: DetectorFn) -> DetectResult<FormatDetectionConfidence> {
        apply_format_detector(root, &detector)
    }

    pub fn failures(root: &Path, detector: DetectorFn) -> Vec<String> {
        match detect(root, detector) {
            Err(err) => err
                .as_unmet()
                .unwrap_or_else(|| panic!("expected unmet requirements, got {:?}", err))
                .failed_alternatives()
                .to_vec(),
            Ok(confidence) => panic!("expected no match, got {:?}", confidence),
        }
    }
}
