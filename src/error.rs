use std::path::PathBuf;
use thiserror::Error;

use crate::ir::{AnnotationId, CategoryId, ImageId};

/// The main error type for coco2yolo operations.
///
/// Every variant aborts the run; nothing is retried or skipped.
#[derive(Debug, Error)]
pub enum Coco2YoloError {
    #[error("Failed to read COCO JSON from {path}: {source}")]
    CocoJsonRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse COCO JSON from {path}: {source}")]
    CocoJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error(
        "Annotation {annotation_id} on image {image_id} references unknown category {category_id}"
    )]
    UnknownCategory {
        annotation_id: AnnotationId,
        image_id: ImageId,
        category_id: CategoryId,
    },

    #[error("Category '{name}' (id {category_id}) is not in the output class list")]
    UnmappedClassName {
        name: String,
        category_id: CategoryId,
    },

    #[error("Cannot normalize a box by a zero image size {width}x{height}")]
    ZeroImageSize { width: u32, height: u32 },

    #[error("Image {image_id} ('{file_name}') has invalid dimensions {width}x{height}")]
    InvalidImageDimensions {
        image_id: ImageId,
        file_name: String,
        width: u32,
        height: u32,
    },

    #[error("Failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    LabelWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read class list from {path}: {source}")]
    ClassListRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse class list YAML from {path}: {source}")]
    ClassListParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid class list {path}: {message}")]
    ClassListInvalid { path: PathBuf, message: String },

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[source] serde_json::Error),
}
