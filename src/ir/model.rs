//! In-memory model of a COCO annotation index.
//!
//! Records are kept in the order the source file lists them. Lookups by ID
//! live in [`CocoIndex`](super::CocoIndex), not here.

use super::bbox::BBoxXYWH;
use super::ids::{AnnotationId, CategoryId, ImageId};
use super::space::Pixel;

/// The images, categories and annotations read from one annotation index.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub images: Vec<Image>,
    pub categories: Vec<Category>,
    pub annotations: Vec<Annotation>,
}

/// An image record.
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    pub id: ImageId,

    /// File name as stored in the index; may contain directory components.
    pub file_name: String,

    /// Width in pixels; normalizes x-axis quantities.
    pub width: u32,

    /// Height in pixels; normalizes y-axis quantities.
    pub height: u32,
}

impl Image {
    pub fn new(
        id: impl Into<ImageId>,
        file_name: impl Into<String>,
        width: u32,
        height: u32,
    ) -> Self {
        Self {
            id: id.into(),
            file_name: file_name.into(),
            width,
            height,
        }
    }
}

/// A category record from the source index.
#[derive(Clone, Debug, PartialEq)]
pub struct Category {
    pub id: CategoryId,

    /// Name used to look up the output class id.
    pub name: String,
}

impl Category {
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// One labelled box on one image.
#[derive(Clone, Debug, PartialEq)]
pub struct Annotation {
    pub id: AnnotationId,
    pub image_id: ImageId,
    pub category_id: CategoryId,

    /// COCO box: top-left corner plus extent, in pixels.
    pub bbox: BBoxXYWH<Pixel>,
}

impl Annotation {
    pub fn new(
        id: impl Into<AnnotationId>,
        image_id: impl Into<ImageId>,
        category_id: impl Into<CategoryId>,
        bbox: BBoxXYWH<Pixel>,
    ) -> Self {
        Self {
            id: id.into(),
            image_id: image_id.into(),
            category_id: category_id.into(),
            bbox,
        }
    }
}
