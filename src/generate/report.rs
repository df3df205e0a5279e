//! Summary of a label generation run.

use serde::Serialize;
use std::fmt;

/// Counts collected while generating labels.
///
/// Only produced for runs that complete; a failed run returns its error
/// instead.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GenerationReport {
    /// Directory the label files were written to.
    pub output_dir: String,
    /// Images listed by the index.
    pub images: usize,
    /// Label files written with at least one line.
    pub labels_written: usize,
    /// Zero-byte label files written for images without annotations.
    pub backgrounds_written: usize,
    /// Images without annotations that got no file.
    pub images_skipped: usize,
    /// Annotations converted into label lines.
    pub annotations_converted: usize,
    /// Converted boxes with a value outside `[0, 1]`, written unclamped.
    pub out_of_range_boxes: usize,
    /// Path of the written `data.yaml`, if requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_yaml: Option<String>,
}

impl GenerationReport {
    pub fn new(output_dir: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Total label files written, background files included.
    pub fn files_written(&self) -> usize {
        self.labels_written + self.backgrounds_written
    }
}

impl fmt::Display for GenerationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Generated YOLO labels in {}", self.output_dir)?;
        writeln!(
            f,
            "  {} images, {} annotations converted",
            self.images, self.annotations_converted
        )?;
        writeln!(
            f,
            "  {} label file(s), {} background file(s), {} image(s) skipped",
            self.labels_written, self.backgrounds_written, self.images_skipped
        )?;

        if let Some(path) = &self.data_yaml {
            writeln!(f, "  class names written to {}", path)?;
        }

        if self.out_of_range_boxes > 0 {
            writeln!(f)?;
            writeln!(f, "Warnings (1):")?;
            writeln!(
                f,
                "  - {} box(es) extend past their image; normalized values were not clamped",
                self.out_of_range_boxes
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_lists_counts() {
        let report = GenerationReport {
            images: 3,
            labels_written: 1,
            backgrounds_written: 1,
            images_skipped: 1,
            annotations_converted: 4,
            ..GenerationReport::new("yolo_labels")
        };

        let text = report.to_string();
        assert!(text.contains("Generated YOLO labels in yolo_labels"));
        assert!(text.contains("3 images, 4 annotations converted"));
        assert!(text.contains("1 label file(s), 1 background file(s), 1 image(s) skipped"));
        assert!(!text.contains("Warnings"));
        assert_eq!(report.files_written(), 2);
    }

    #[test]
    fn display_warns_about_out_of_range_boxes() {
        let report = GenerationReport {
            out_of_range_boxes: 2,
            ..GenerationReport::new("out")
        };
        assert!(report.to_string().contains("2 box(es) extend past their image"));
    }

    #[test]
    fn json_omits_missing_data_yaml() {
        let json = serde_json::to_value(GenerationReport::new("out")).unwrap();
        assert_eq!(json["output_dir"], "out");
        assert!(json.get("data_yaml").is_none());
    }
}
