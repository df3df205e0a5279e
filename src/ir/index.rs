//! Query layer over a loaded COCO dataset.
//!
//! [`CocoIndex`] answers the questions the label generator asks: which
//! images exist (in source order), which annotations belong to an image, and
//! which categories are defined.
//!
//! Duplicate IDs collapse the way a keyed index would: the last record with
//! a given image or category ID wins, but it keeps the position where that
//! ID first appeared.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use super::io_coco_json::read_coco_json;
use super::model::{Annotation, Category, Dataset, Image};
use super::{CategoryId, ImageId};
use crate::error::Coco2YoloError;

/// Read-only lookup structure built once from a [`Dataset`].
#[derive(Clone, Debug, Default)]
pub struct CocoIndex {
    images: Vec<Image>,
    image_positions: HashMap<ImageId, usize>,
    categories: Vec<Category>,
    annotations_by_image: HashMap<ImageId, Vec<Annotation>>,
    annotation_count: usize,
}

impl CocoIndex {
    /// Builds the index, consuming the dataset.
    pub fn new(dataset: Dataset) -> Self {
        let mut images: Vec<Image> = Vec::with_capacity(dataset.images.len());
        let mut image_positions = HashMap::with_capacity(dataset.images.len());
        for image in dataset.images {
            match image_positions.entry(image.id) {
                Entry::Occupied(slot) => images[*slot.get()] = image,
                Entry::Vacant(slot) => {
                    slot.insert(images.len());
                    images.push(image);
                }
            }
        }

        let mut categories: Vec<Category> = Vec::with_capacity(dataset.categories.len());
        let mut category_positions: HashMap<CategoryId, usize> = HashMap::new();
        for category in dataset.categories {
            match category_positions.entry(category.id) {
                Entry::Occupied(slot) => categories[*slot.get()] = category,
                Entry::Vacant(slot) => {
                    slot.insert(categories.len());
                    categories.push(category);
                }
            }
        }

        let annotation_count = dataset.annotations.len();
        let mut annotations_by_image: HashMap<ImageId, Vec<Annotation>> = HashMap::new();
        for ann in dataset.annotations {
            annotations_by_image
                .entry(ann.image_id)
                .or_default()
                .push(ann);
        }

        Self {
            images,
            image_positions,
            categories,
            annotations_by_image,
            annotation_count,
        }
    }

    /// Loads a COCO JSON file and indexes it.
    pub fn from_path(path: &Path) -> Result<Self, Coco2YoloError> {
        read_coco_json(path).map(Self::new)
    }

    /// Image IDs in source order.
    pub fn image_ids(&self) -> impl Iterator<Item = ImageId> + '_ {
        self.images.iter().map(|img| img.id)
    }

    /// Image records in source order.
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn image(&self, id: ImageId) -> Option<&Image> {
        self.image_positions.get(&id).map(|&pos| &self.images[pos])
    }

    /// Annotations owned by `id`, in source order. Empty for background images
    /// and unknown IDs.
    pub fn annotations_for_image(&self, id: ImageId) -> &[Annotation] {
        self.annotations_by_image
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Category records in source order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// The category mapping: source category ID to category name.
    pub fn category_map(&self) -> BTreeMap<CategoryId, &str> {
        self.categories
            .iter()
            .map(|cat| (cat.id, cat.name.as_str()))
            .collect()
    }

    /// Total annotations read, including any whose image is not listed.
    pub fn annotation_count(&self) -> usize {
        self.annotation_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BBoxXYWH, Pixel};

    fn bbox() -> BBoxXYWH<Pixel> {
        BBoxXYWH::from_xywh(0.0, 0.0, 1.0, 1.0)
    }

    fn sample_dataset() -> Dataset {
        Dataset {
            images: vec![
                Image::new(3u64, "c.jpg", 10, 10),
                Image::new(1u64, "a.jpg", 10, 10),
                Image::new(2u64, "b.jpg", 10, 10),
            ],
            categories: vec![Category::new(7u64, "car"), Category::new(1u64, "person")],
            annotations: vec![
                Annotation::new(10u64, 1u64, 7u64, bbox()),
                Annotation::new(11u64, 3u64, 1u64, bbox()),
                Annotation::new(12u64, 1u64, 1u64, bbox()),
            ],
        }
    }

    #[test]
    fn images_keep_source_order() {
        let index = CocoIndex::new(sample_dataset());
        let ids: Vec<u64> = index.image_ids().map(|id| id.as_u64()).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn annotations_are_grouped_in_source_order() {
        let index = CocoIndex::new(sample_dataset());

        let anns: Vec<u64> = index
            .annotations_for_image(ImageId(1))
            .iter()
            .map(|a| a.id.as_u64())
            .collect();
        assert_eq!(anns, vec![10, 12]);
        assert!(index.annotations_for_image(ImageId(2)).is_empty());
        assert!(index.annotations_for_image(ImageId(99)).is_empty());
        assert_eq!(index.annotation_count(), 3);
    }

    #[test]
    fn category_map_resolves_names() {
        let index = CocoIndex::new(sample_dataset());
        let map = index.category_map();
        assert_eq!(map.get(&CategoryId(7)), Some(&"car"));
        assert_eq!(map.get(&CategoryId(1)), Some(&"person"));
        assert_eq!(map.get(&CategoryId(2)), None);
    }

    #[test]
    fn duplicate_image_id_keeps_first_position_and_last_record() {
        let dataset = Dataset {
            images: vec![
                Image::new(1u64, "old.jpg", 10, 10),
                Image::new(2u64, "b.jpg", 10, 10),
                Image::new(1u64, "new.jpg", 20, 20),
            ],
            ..Default::default()
        };

        let index = CocoIndex::new(dataset);
        assert_eq!(index.images().len(), 2);
        assert_eq!(index.images()[0].file_name, "new.jpg");
        assert_eq!(index.image(ImageId(1)).map(|img| img.width), Some(20));
    }

    #[test]
    fn duplicate_category_id_last_name_wins() {
        let dataset = Dataset {
            categories: vec![Category::new(1u64, "cat"), Category::new(1u64, "kitten")],
            ..Default::default()
        };

        let index = CocoIndex::new(dataset);
        assert_eq!(index.categories().len(), 1);
        assert_eq!(index.category_map().get(&CategoryId(1)), Some(&"kitten"));
    }
}
