//! The output class list.
//!
//! YOLO class ids are positions in an ordered list of names supplied by the
//! caller. The list must be passed identically on every run to keep ids
//! stable across label sets.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Coco2YoloError;

/// The 80 COCO detection class names in their conventional YOLO order.
pub const COCO80_CLASSES: [&str; 80] = [
    "person", "bicycle", "car", "motorcycle", "airplane", "bus", "train", "truck", "boat",
    "traffic light", "fire hydrant", "stop sign", "parking meter", "bench", "bird", "cat", "dog",
    "horse", "sheep", "cow", "elephant", "bear", "zebra", "giraffe", "backpack", "umbrella",
    "handbag", "tie", "suitcase", "frisbee", "skis", "snowboard", "sports ball", "kite",
    "baseball bat", "baseball glove", "skateboard", "surfboard", "tennis racket", "bottle",
    "wine glass", "cup", "fork", "knife", "spoon", "bowl", "banana", "apple", "sandwich",
    "orange", "broccoli", "carrot", "hot dog", "pizza", "donut", "cake", "chair", "couch",
    "potted plant", "bed", "dining table", "toilet", "tv", "laptop", "mouse", "remote",
    "keyboard", "cell phone", "microwave", "oven", "toaster", "sink", "refrigerator", "book",
    "clock", "vase", "scissors", "teddy bear", "hair drier", "toothbrush",
];

/// Ordered class names with a name → id map built once up front.
///
/// If a name appears more than once, its first position is its id.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassList {
    names: Vec<String>,
    ids: HashMap<String, usize>,
}

impl ClassList {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        let mut ids = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            ids.entry(name.clone()).or_insert(idx);
        }
        Self { names, ids }
    }

    /// The default list: the 80 COCO detection classes.
    pub fn coco80() -> Self {
        Self::new(COCO80_CLASSES)
    }

    /// Loads a class list from disk.
    ///
    /// `.yaml` / `.yml` files are read as an Ultralytics `data.yaml` whose
    /// `names` key is either a list or an `index: name` mapping. Any other
    /// file is read as `classes.txt`: one name per line.
    pub fn from_file(path: &Path) -> Result<Self, Coco2YoloError> {
        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
            .unwrap_or(false);

        let data = fs::read_to_string(path).map_err(|source| Coco2YoloError::ClassListRead {
            path: path.to_path_buf(),
            source,
        })?;

        let names = if is_yaml {
            parse_data_yaml(&data, path)?
        } else {
            parse_classes_txt(&data, path)?
        };
        Ok(Self::new(names))
    }

    /// Output class id for `name`, if listed.
    pub fn class_id(&self, name: &str) -> Option<usize> {
        self.ids.get(name).copied()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Deserialize)]
struct DataYaml {
    names: DataYamlNames,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DataYamlNames {
    Sequence(Vec<String>),
    Mapping(BTreeMap<usize, String>),
}

fn parse_data_yaml(data: &str, path: &Path) -> Result<Vec<String>, Coco2YoloError> {
    let parsed: DataYaml =
        serde_yaml::from_str(data).map_err(|source| Coco2YoloError::ClassListParse {
            path: path.to_path_buf(),
            source,
        })?;

    let names = match parsed.names {
        DataYamlNames::Sequence(names) => names,
        DataYamlNames::Mapping(mapping) => {
            let Some(&max_index) = mapping.keys().next_back() else {
                return Ok(Vec::new());
            };
            // Keys are unique, so a dense 0..n mapping has max_index == n - 1.
            if max_index >= mapping.len() {
                return Err(Coco2YoloError::ClassListInvalid {
                    path: path.to_path_buf(),
                    message: format!(
                        "names mapping has {} entries but index {max_index}",
                        mapping.len()
                    ),
                });
            }
            mapping.into_values().collect()
        }
    };

    if let Some(blank) = names.iter().position(|name| name.trim().is_empty()) {
        return Err(Coco2YoloError::ClassListInvalid {
            path: path.to_path_buf(),
            message: format!("name at index {blank} is empty"),
        });
    }

    Ok(names)
}

fn parse_classes_txt(data: &str, path: &Path) -> Result<Vec<String>, Coco2YoloError> {
    let mut names = Vec::new();

    for (line_idx, line) in data.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(Coco2YoloError::ClassListInvalid {
                path: path.to_path_buf(),
                message: format!("line {} is empty", line_idx + 1),
            });
        }
        names.push(trimmed.to_string());
    }

    Ok(names)
}
