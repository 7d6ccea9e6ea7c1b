//! Ultralytics-style YOLO directory.
//!
//! Label files live under `labels/` and hold `class cx cy w h` rows. The
//! class map comes from `data.yaml` when present; without it the tree must
//! at least have images under `images/`.

use serde::Deserialize;

use crate::detection::{DetectResult, DetectionContext, DetectionError, FormatDetectionConfidence};
use crate::formats::IMAGE_EXTENSIONS_GLOB;

pub const NAME: &str = "yolo";

#[derive(Deserialize)]
struct DataYamlShape {
    names: serde_yaml::Value,
}

pub fn detect(context: &mut DetectionContext) -> DetectResult<Option<FormatDetectionConfidence>> {
    let label_file = context.require_file("labels/**/*.txt", &["classes.txt"])?;
    context.probe_text_file(
        &label_file,
        "must contain rows of 'class cx cy w h'",
        |_, file| match file.first_non_empty_line()? {
            // Empty label files are valid: images without objects.
            None => Ok(()),
            Some(line) => parse_label_row(&line),
        },
    )?;

    context.require_any(|context| {
        context.alternative(|context| {
            let data_yaml = context.require_file("data.yaml", &[])?;
            context.probe_text_file(&data_yaml, "must define class 'names'", |_, file| {
                let data: DataYamlShape = serde_yaml::from_reader(file)?;
                match data.names {
                    serde_yaml::Value::Sequence(_) | serde_yaml::Value::Mapping(_) => Ok(()),
                    _ => Err(DetectionError::mismatch("'names' must be a list or a map")),
                }
            })
        })?;
        context.alternative(|context| {
            context.require_file(&format!("images/**/*.{}", IMAGE_EXTENSIONS_GLOB), &[])
        })?;
        Ok(())
    })?;

    Ok(None)
}

fn parse_label_row(line: &str) -> DetectResult<()> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() != 5 {
        return Err(DetectionError::mismatch(format!(
            "expected 5 tokens, found {}",
            tokens.len()
        )));
    }
    tokens[0]
        .parse::<usize>()
        .map_err(|_| DetectionError::mismatch(format!("invalid class id '{}'", tokens[0])))?;
    for token in &tokens[1..] {
        token
            .parse::<f64>()
            .map_err(|_| DetectionError::mismatch(format!("invalid coordinate '{}'", token)))?;
    }
    Ok(())
}

/// Exposes the label row check to the fuzz targets.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_label_row(line: &str) -> bool {
    parse_label_row(line).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::test_support::{detect as run, failures, write};

    #[test]
    fn parse_label_row_accepts_detection_rows() {
        assert!(parse_label_row("2 0.5 0.25 0.3 0.1").is_ok());
        assert!(parse_label_row("0 0.1 0.2").is_err());
        assert!(parse_label_row("0 0.1 0.2 0.3 0.4 0.5").is_err());
        assert!(parse_label_row("x 0.1 0.2 0.3 0.4").is_err());
    }

    #[test]
    fn detects_layout_with_data_yaml() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "labels/train/a.txt", "0 0.5 0.5 0.2 0.2\n");
        write(temp.path(), "data.yaml", "names:\n  0: person\n  1: bicycle\n");
        assert!(run(temp.path(), detect).is_ok());
    }

    #[test]
    fn detects_layout_with_images_only() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "labels/a.txt", "");
        write(temp.path(), "labels/classes.txt", "person\n");
        write(temp.path(), "images/a.jpg", "");
        assert!(run(temp.path(), detect).is_ok());
    }

    #[test]
    fn classes_txt_alone_is_not_a_label_file() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "labels/classes.txt", "person\n");
        write(temp.path(), "images/a.jpg", "");
        assert_eq!(
            failures(temp.path(), detect),
            ["dataset must contain a file matching pattern \"labels/**/*.txt\" (but not named \"classes.txt\")"]
        );
    }

    #[test]
    fn reports_both_class_map_alternatives() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "labels/a.txt", "0 0.5 0.5 0.2 0.2\n");
        write(temp.path(), "data.yaml", "path: .\n");
        assert_eq!(
            failures(temp.path(), detect),
            [
                "data.yaml: must define class 'names'".to_string(),
                format!(
                    "dataset must contain a file matching pattern \"images/**/*.{}\"",
                    IMAGE_EXTENSIONS_GLOB
                ),
            ]
        );
    }

    #[test]
    fn rejects_segmentation_rows() {
        let temp = tempfile::tempdir().unwrap();
        write(temp.path(), "labels/a.txt", "0 0.1 0.2 0.3 0.4 0.5 0.6\n");
        write(temp.path(), "images/a.jpg", "");
        assert_eq!(
            failures(temp.path(), detect),
            ["labels/a.txt: must contain rows of 'class cx cy w h'"]
        );
    }
}
