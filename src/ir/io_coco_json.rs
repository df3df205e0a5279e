//! COCO JSON reader.
//!
//! COCO bounding boxes use `[x, y, width, height]` where `(x, y)` is the
//! top-left corner in absolute pixel coordinates. The reader keeps that form
//! ([`BBoxXYWH<Pixel>`]); conversion to YOLO happens in the label generator.
//!
//! Only the fields the conversion needs are required. `info`, `licenses`,
//! `segmentation`, `area`, `iscrowd` and any unknown keys are accepted and
//! ignored, so full COCO exports and detection-result files both load.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{de, Deserialize, Deserializer};

use super::model::{Annotation, Category, Dataset, Image};
use super::{AnnotationId, BBoxXYWH, CategoryId, ImageId, Pixel};
use crate::error::Coco2YoloError;

// ============================================================================
// COCO Schema Types (internal to this module)
// ============================================================================

/// Top-level COCO dataset structure.
#[derive(Debug, Deserialize)]
struct CocoDataset {
    images: Vec<CocoImage>,

    #[serde(default)]
    annotations: Vec<CocoAnnotation>,

    categories: Vec<CocoCategory>,
}

#[derive(Debug, Deserialize)]
struct CocoImage {
    id: u64,
    #[serde(deserialize_with = "deserialize_dimension")]
    width: u32,
    #[serde(deserialize_with = "deserialize_dimension")]
    height: u32,
    file_name: String,
}

#[derive(Debug, Deserialize)]
struct CocoCategory {
    id: u64,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CocoAnnotation {
    id: u64,
    image_id: u64,
    category_id: u64,

    /// `[x, y, width, height]` with `(x, y)` as the top-left corner.
    bbox: [f64; 4],
}

/// Image sizes are whole pixel counts, but some exporters write them as
/// floats (`640.0`). Those are accepted; fractional values are not.
fn deserialize_dimension<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    if value.fract() != 0.0 || !(0.0..=u32::MAX as f64).contains(&value) {
        return Err(de::Error::custom(format!(
            "image dimension must be a non-negative whole number, got {value}"
        )));
    }
    Ok(value as u32)
}

// ============================================================================
// Public API
// ============================================================================

/// Reads an annotation index from a COCO JSON file.
///
/// # Errors
/// [`Coco2YoloError::CocoJsonRead`] if the file cannot be opened and
/// [`Coco2YoloError::CocoJsonParse`] if a required field is missing or has
/// the wrong type.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use coco2yolo::ir::io_coco_json::read_coco_json;
///
/// let dataset = read_coco_json(Path::new("annotation.json"))?;
/// # Ok::<(), coco2yolo::Coco2YoloError>(())
/// ```
pub fn read_coco_json(path: &Path) -> Result<Dataset, Coco2YoloError> {
    let file = File::open(path).map_err(|source| Coco2YoloError::CocoJsonRead {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let coco: CocoDataset =
        serde_json::from_reader(reader).map_err(|source| Coco2YoloError::CocoJsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(coco_to_ir(coco))
}

/// Reads an annotation index from a COCO JSON string.
///
/// Useful for testing without file I/O.
pub fn from_coco_str(json: &str) -> Result<Dataset, serde_json::Error> {
    let coco: CocoDataset = serde_json::from_str(json)?;
    Ok(coco_to_ir(coco))
}

/// Reads an annotation index from a COCO JSON byte slice.
pub fn from_coco_slice(bytes: &[u8]) -> Result<Dataset, serde_json::Error> {
    let coco: CocoDataset = serde_json::from_slice(bytes)?;
    Ok(coco_to_ir(coco))
}

// ============================================================================
// Conversion: COCO -> IR
// ============================================================================

fn coco_to_ir(coco: CocoDataset) -> Dataset {
    let images = coco
        .images
        .into_iter()
        .map(|img| Image {
            id: ImageId::new(img.id),
            file_name: img.file_name,
            width: img.width,
            height: img.height,
        })
        .collect();

    let categories = coco
        .categories
        .into_iter()
        .map(|cat| Category {
            id: CategoryId::new(cat.id),
            name: cat.name,
        })
        .collect();

    let annotations = coco
        .annotations
        .into_iter()
        .map(|ann| {
            let [x, y, w, h] = ann.bbox;
            Annotation::new(
                AnnotationId::new(ann.id),
                ImageId::new(ann.image_id),
                CategoryId::new(ann.category_id),
                BBoxXYWH::<Pixel>::from_xywh(x, y, w, h),
            )
        })
        .collect();

    Dataset {
        images,
        categories,
        annotations,
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_coco_json() -> &'static str {
        r#"{
            "info": {"year": 2024, "version": "1.0", "description": "Test dataset"},
            "licenses": [{"id": 1, "name": "CC BY 4.0"}],
            "images": [
                {"id": 1, "width": 640, "height": 480, "file_name": "image001.jpg", "license": 1}
            ],
            "categories": [
                {"id": 18, "name": "dog", "supercategory": "animal"}
            ],
            "annotations": [
                {
                    "id": 5,
                    "image_id": 1,
                    "category_id": 18,
                    "bbox": [10.0, 20.0, 90.0, 60.0],
                    "area": 5400.0,
                    "iscrowd": 0,
                    "segmentation": [[10, 20, 100, 20, 100, 80]]
                }
            ]
        }"#
    }

    #[test]
    fn test_coco_to_ir_basic() {
        let dataset = from_coco_str(sample_coco_json()).expect("parse failed");

        assert_eq!(dataset.images.len(), 1);
        assert_eq!(dataset.categories.len(), 1);
        assert_eq!(dataset.annotations.len(), 1);

        let img = &dataset.images[0];
        assert_eq!(img.id, ImageId(1));
        assert_eq!(img.file_name, "image001.jpg");
        assert_eq!((img.width, img.height), (640, 480));

        let cat = &dataset.categories[0];
        assert_eq!(cat.id, CategoryId(18));
        assert_eq!(cat.name, "dog");

        // COCO keeps XYWH; nothing is converted at read time
        let ann = &dataset.annotations[0];
        assert_eq!(ann.id, AnnotationId(5));
        assert_eq!(ann.category_id, CategoryId(18));
        assert_eq!(ann.bbox.to_xywh(), (10.0, 20.0, 90.0, 60.0));
    }

    #[test]
    fn test_integer_bbox_values_are_accepted() {
        let json = r#"{
            "images": [{"id": 1, "width": 100, "height": 100, "file_name": "a.jpg"}],
            "categories": [{"id": 1, "name": "person"}],
            "annotations": [{"id": 1, "image_id": 1, "category_id": 1, "bbox": [0, 0, 50, 50]}]
        }"#;

        let dataset = from_coco_str(json).expect("parse failed");
        assert_eq!(dataset.annotations[0].bbox.to_xywh(), (0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_missing_annotations_key_means_no_annotations() {
        let json = r#"{
            "images": [{"id": 1, "width": 100, "height": 100, "file_name": "a.jpg"}],
            "categories": []
        }"#;

        let dataset = from_coco_str(json).expect("parse failed");
        assert!(dataset.annotations.is_empty());
    }

    #[test]
    fn test_missing_required_image_field_is_rejected() {
        let json = r#"{
            "images": [{"id": 1, "height": 100, "file_name": "a.jpg"}],
            "categories": [],
            "annotations": []
        }"#;

        assert!(from_coco_str(json).is_err());
    }

    #[test]
    fn test_float_image_dimensions_must_be_whole() {
        let json = r#"{
            "images": [{"id": 1, "width": 640.0, "height": 480.0, "file_name": "a.jpg"}],
            "categories": []
        }"#;
        let dataset = from_coco_str(json).expect("parse failed");
        assert_eq!((dataset.images[0].width, dataset.images[0].height), (640, 480));

        for bad in ["640.5", "-1", "1e12"] {
            let json = format!(
                r#"{{"images": [{{"id": 1, "width": {bad}, "height": 480, "file_name": "a.jpg"}}],
                    "categories": []}}"#
            );
            assert!(from_coco_str(&json).is_err(), "width {bad} should be rejected");
        }
    }

    #[test]
    fn test_short_bbox_is_rejected() {
        let json = r#"{
            "images": [{"id": 1, "width": 100, "height": 100, "file_name": "a.jpg"}],
            "categories": [{"id": 1, "name": "person"}],
            "annotations": [{"id": 1, "image_id": 1, "category_id": 1, "bbox": [0, 0, 50]}]
        }"#;

        assert!(from_coco_str(json).is_err());
    }

    #[test]
    fn test_read_coco_json_missing_file() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let err = read_coco_json(&temp.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Coco2YoloError::CocoJsonRead { .. }));
    }

    #[test]
    fn test_read_coco_json_reports_parse_path() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{ not json").expect("write file");

        match read_coco_json(&path).unwrap_err() {
            Coco2YoloError::CocoJsonParse { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }
}
