//! TensorFlow Object Detection CSV: one row per box with normalized
//! coordinates, identified by its header.

use crate::detection::{DetectResult, DetectionContext, DetectionError, FormatDetectionConfidence};

pub const NAME: &str = "tfod";

const REQUIRED_COLUMNS: [&str; 8] = [
    "filename", "width", "height", "class", "xmin", "ymin", "xmax", "ymax",
];

pub fn detect(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
    let path = context.require_file("*.csv", &[])?;
    context.probe_text_file(
        &path,
        "must have a header with filename,width,height,class,xmin,ymin,xmax,ymax columns",
        |_, file| {
            let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(file);
            let headers = reader.headers()?;
            let missing: Vec<&str> = REQUIRED_COLUMNS
                .iter()
                .copied()
                .filter(|column| !headers.iter().any(|h| h.trim() == *column))
                .collect();
            if !missing.is_empty() {
                return Err(DetectionError::mismatch(format!(
                    "missing column(s): {}",
                    missing.join(", ")
                )));
            }
            Ok(())
        },
    )?;

    Ok(None)
}
