#![allow(dead_code)]

use std::fs;
use std::path::Path;

use tempfile::TempDir;

pub const COCO_JSON: &str = r#"{
    "images": [{"id": 1, "file_name": "a.jpg", "width": 10, "height": 10}],
    "categories": [{"id": 1, "name": "person"}],
    "annotations": [{"id": 1, "image_id": 1, "category_id": 1, "bbox": [1, 2, 3, 4]}]
}"#;

pub const VOC_XML: &str = "<annotation>\
    <filename>a.jpg</filename>\
    <size><width>10</width><height>10</height><depth>3</depth></size>\
    <object><name>person</name>\
    <bndbox><xmin>1</xmin><ymin>2</ymin><xmax>3</xmax><ymax>4</ymax></bndbox>\
    </object></annotation>";

pub fn write_file(root: &Path, rel: &str, contents: impl AsRef<[u8]>) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent dir");
    }
    fs::write(path, contents).expect("write fixture file");
}

/// A dataset root containing the given files.
pub fn dataset(files: &[(&str, &str)]) -> TempDir {
    let temp = tempfile::tempdir().expect("create temp dir");
    for (rel, contents) in files {
        write_file(temp.path(), rel, contents);
    }
    temp
}

pub fn coco_dataset() -> TempDir {
    dataset(&[("annotations/instances_train.json", COCO_JSON)])
}

pub fn voc_dataset() -> TempDir {
    dataset(&[
        ("Annotations/a.xml", VOC_XML),
        ("JPEGImages/a.jpg", ""),
    ])
}

pub fn yolo_dataset() -> TempDir {
    dataset(&[
        ("images/train/a.jpg", ""),
        ("labels/train/a.txt", "0 0.5 0.5 0.25 0.25\n"),
        ("labels/classes.txt", "person\n"),
    ])
}

/// Matches both COCO and VOC at medium confidence.
pub fn ambiguous_dataset() -> TempDir {
    dataset(&[("instances.json", COCO_JSON), ("a.xml", VOC_XML)])
}
