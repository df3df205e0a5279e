//! Label generation: COCO annotation index in, one YOLO label file per image out.
//!
//! Images are visited once, in the order the index lists them. For each
//! image the whole label body is rendered in memory before its file is
//! written, so a lookup failure leaves no file for the failing image. Files
//! written for earlier images stay on disk; nothing is cleaned up.

pub mod report;

pub use report::GenerationReport;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

use crate::classes::ClassList;
use crate::error::Coco2YoloError;
use crate::ir::io_yolo::{format_label_line, label_path, write_data_yaml, write_label_file};
use crate::ir::{convert, Annotation, CategoryId, CocoIndex, Image};

/// Options for a generation run.
#[derive(Clone, Debug)]
pub struct GenerateOptions {
    /// Destination directory; created if missing.
    pub output_dir: PathBuf,
    /// Write an empty label file for images without annotations.
    pub include_background: bool,
    /// Fixed decimals for box values; `None` keeps the shortest form.
    pub precision: Option<usize>,
    /// Also write `data.yaml` with the class list.
    pub write_data_yaml: bool,
}

impl GenerateOptions {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            include_background: false,
            precision: None,
            write_data_yaml: false,
        }
    }

    pub fn with_background(mut self, include_background: bool) -> Self {
        self.include_background = include_background;
        self
    }

    pub fn with_precision(mut self, precision: Option<usize>) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_data_yaml(mut self, write_data_yaml: bool) -> Self {
        self.write_data_yaml = write_data_yaml;
        self
    }
}

/// Loads `coco_json` and generates labels from it.
///
/// The output directory is created before the index is read.
pub fn generate_from_path(
    coco_json: &Path,
    classes: &ClassList,
    opts: &GenerateOptions,
) -> Result<GenerationReport, Coco2YoloError> {
    ensure_output_dir(&opts.output_dir)?;

    info!("Loading annotation index from {}", coco_json.display());
    let index = CocoIndex::from_path(coco_json)?;

    write_labels(&index, classes, opts)
}

/// Writes one label file per image of `index` into `opts.output_dir`.
///
/// # Errors
/// Aborts on the first unknown category id, category name missing from
/// `classes`, zero-sized annotated image, or write failure.
pub fn generate_labels(
    index: &CocoIndex,
    classes: &ClassList,
    opts: &GenerateOptions,
) -> Result<GenerationReport, Coco2YoloError> {
    ensure_output_dir(&opts.output_dir)?;
    write_labels(index, classes, opts)
}

/// The generation pass proper; `opts.output_dir` must already exist.
fn write_labels(
    index: &CocoIndex,
    classes: &ClassList,
    opts: &GenerateOptions,
) -> Result<GenerationReport, Coco2YoloError> {
    let category_map = index.category_map();
    let mut report = GenerationReport::new(opts.output_dir.display().to_string());

    info!(
        "Generating labels for {} images ({} annotations, {} categories, {} output classes)",
        index.images().len(),
        index.annotation_count(),
        category_map.len(),
        classes.len()
    );

    for image in index.images() {
        report.images += 1;
        let annotations = index.annotations_for_image(image.id);
        let path = label_path(&opts.output_dir, &image.file_name);

        if annotations.is_empty() {
            if !opts.include_background {
                debug!("Skipping background image {}", image.file_name);
                report.images_skipped += 1;
                continue;
            }

            debug!("Writing empty label {}", path.display());
            write_label_file(&path, "")?;
            report.backgrounds_written += 1;
            continue;
        }

        let body = render_image_labels(
            image,
            annotations,
            &category_map,
            classes,
            opts.precision,
            &mut report,
        )?;

        debug!("Writing {} line(s) to {}", annotations.len(), path.display());
        write_label_file(&path, &body)?;
        report.labels_written += 1;
    }

    if opts.write_data_yaml {
        let path = write_data_yaml(&opts.output_dir, classes.names())?;
        report.data_yaml = Some(path.display().to_string());
    }

    info!(
        "Wrote {} label file(s) to {}",
        report.files_written(),
        opts.output_dir.display()
    );

    Ok(report)
}

/// Renders the label body for one annotated image.
///
/// Lines follow annotation order and are joined by `\n` without a trailing
/// newline.
fn render_image_labels(
    image: &Image,
    annotations: &[Annotation],
    category_map: &BTreeMap<CategoryId, &str>,
    classes: &ClassList,
    precision: Option<usize>,
    report: &mut GenerationReport,
) -> Result<String, Coco2YoloError> {
    let mut lines = Vec::with_capacity(annotations.len());
    for ann in annotations {
        let name = category_map.get(&ann.category_id).ok_or_else(|| {
            Coco2YoloError::UnknownCategory {
                annotation_id: ann.id,
                image_id: image.id,
                category_id: ann.category_id,
            }
        })?;

        let class_id = classes
            .class_id(name)
            .ok_or_else(|| Coco2YoloError::UnmappedClassName {
                name: (*name).to_string(),
                category_id: ann.category_id,
            })?;

        let bbox = convert(&ann.bbox, image.width, image.height).map_err(|_| {
            Coco2YoloError::InvalidImageDimensions {
                image_id: image.id,
                file_name: image.file_name.clone(),
                width: image.width,
                height: image.height,
            }
        })?;
        if !bbox.is_within_unit_range() {
            warn!(
                "Annotation {} on {} falls outside the image: {:?}",
                ann.id, image.file_name, bbox
            );
            report.out_of_range_boxes += 1;
        }

        lines.push(format_label_line(class_id, &bbox, precision));
        report.annotations_converted += 1;
    }

    Ok(lines.join("\n"))
}

fn ensure_output_dir(path: &Path) -> Result<(), Coco2YoloError> {
    fs::create_dir_all(path).map_err(|source| Coco2YoloError::CreateOutputDir {
        path: path.to_path_buf(),
        source,
    })
}
