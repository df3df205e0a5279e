#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const SAMPLE_COCO: &str = include_str!("../fixtures/sample_valid.coco.json");

/// One image `a.b.jpg` (100x50) with one `car` box at `[10, 10, 20, 10]`.
pub const SINGLE_CAR_COCO: &str = r#"{
    "images": [{"id": 1, "file_name": "a.b.jpg", "width": 100, "height": 50}],
    "categories": [{"id": 7, "name": "car"}],
    "annotations": [{"id": 1, "image_id": 1, "category_id": 7, "bbox": [10, 10, 20, 10]}]
}"#;

pub fn write_coco(dir: &Path, file_name: &str, json: &str) -> PathBuf {
    let path = dir.join(file_name);
    fs::write(&path, json).expect("write coco json");
    path
}

/// File name and contents for every file directly inside `dir`, sorted by name.
pub fn read_label_dir(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<(String, Vec<u8>)> = fs::read_dir(dir)
        .expect("read label dir")
        .map(|entry| {
            let entry = entry.expect("dir entry");
            let name = entry.file_name().to_string_lossy().into_owned();
            let bytes = fs::read(entry.path()).expect("read label file");
            (name, bytes)
        })
        .collect();
    files.sort();
    files
}
