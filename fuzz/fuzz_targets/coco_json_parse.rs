//! Fuzz target for COCO JSON parsing and label rendering.
//!
//! Arbitrary bytes go through the COCO parser; anything that parses is then
//! converted and formatted so the whole read → convert → format path is
//! checked for panics.
//!
//! Run with:
//!   cargo +nightly fuzz run coco_json_parse

#![no_main]

use coco2yolo::ir::io_coco_json::from_coco_slice;
use coco2yolo::ir::io_yolo::format_label_line;
use coco2yolo::ir::CocoIndex;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // 10MB is generous for JSON annotation files.
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(dataset) = from_coco_slice(data) else {
        return;
    };

    let index = CocoIndex::new(dataset);
    for image in index.images() {
        for ann in index.annotations_for_image(image.id) {
            let yolo = ann
                .bbox
                .to_yolo(image.width as f64, image.height as f64);
            let _ = format_label_line(0, &yolo, None);
        }
    }
});
