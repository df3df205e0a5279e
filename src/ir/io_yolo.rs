//! YOLO label file writer.
//!
//! One text file per image, one line per box:
//! `<class_id> <x_center> <y_center> <width> <height>`, single spaces, lines
//! joined by `\n` with no trailing newline. An image without boxes gets a
//! zero-byte file when backgrounds are included.

use std::fs;
use std::path::{Path, PathBuf};

use super::{BBoxCXCYWH, Normalized};
use crate::error::Coco2YoloError;

const LABEL_EXTENSION: &str = "txt";

/// Formats one box value.
///
/// With `precision` set, the value is printed with that many decimals.
/// Otherwise it uses the shortest representation that round-trips: integral
/// values keep a trailing `.0` and magnitudes below `1e-4` or from `1e16` up
/// use exponent form with a signed two-digit exponent (`1e-05`, `1e+16`).
pub fn format_number(value: f64, precision: Option<usize>) -> String {
    if let Some(decimals) = precision {
        return format!("{value:.decimals$}");
    }

    if value.is_nan() {
        return "nan".to_string();
    }

    // Debug already picks the shortest digits and switches to exponent form
    // at the same thresholds; only the exponent spelling differs.
    let repr = format!("{value:?}");
    let Some((mantissa, exponent)) = repr.split_once('e') else {
        return repr;
    };

    let (sign, digits) = match exponent.strip_prefix('-') {
        Some(digits) => ('-', digits),
        None => ('+', exponent),
    };
    format!("{mantissa}e{sign}{digits:0>2}")
}

/// Renders one label line for a converted box.
pub fn format_label_line(
    class_id: usize,
    bbox: &BBoxCXCYWH<Normalized>,
    precision: Option<usize>,
) -> String {
    let (cx, cy, w, h) = bbox.to_cxcywh();
    let values = [cx, cy, w, h].map(|v| format_number(v, precision));
    format!("{} {}", class_id, values.join(" "))
}

/// Derives a label file's base name from an image file name.
///
/// Everything from the first `.` on is dropped, so `img.v2.jpg` becomes
/// `img`, not `img.v2`.
pub fn label_base_name(file_name: &str) -> &str {
    file_name
        .split_once('.')
        .map_or(file_name, |(stem, _)| stem)
}

/// Path of the label file for `file_name` inside `output_dir`.
///
/// Directory components in the file name are kept below `output_dir`; a
/// leading root is stripped so the label never lands outside it.
pub fn label_path(output_dir: &Path, file_name: &str) -> PathBuf {
    let base = label_base_name(file_name).trim_start_matches(['/', '\\']);
    output_dir.join(format!("{base}.{LABEL_EXTENSION}"))
}

/// Writes a label body, replacing any existing file.
pub fn write_label_file(path: &Path, body: &str) -> Result<(), Coco2YoloError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| Coco2YoloError::CreateOutputDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    fs::write(path, body).map_err(|source| Coco2YoloError::LabelWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes an Ultralytics `data.yaml` listing the class names by id.
pub fn write_data_yaml(output_dir: &Path, names: &[String]) -> Result<PathBuf, Coco2YoloError> {
    let mut yaml = format!("nc: {}\nnames:\n", names.len());
    for (idx, name) in names.iter().enumerate() {
        yaml.push_str(&format!("  {}: {}\n", idx, yaml_single_quoted(name)));
    }

    let path = output_dir.join("data.yaml");
    fs::write(&path, yaml).map_err(|source| Coco2YoloError::LabelWrite {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn yaml_single_quoted(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', "''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_shortest_form() {
        assert_eq!(format_number(0.2, None), "0.2");
        assert_eq!(format_number(0.30000000000000004, None), "0.30000000000000004");
        assert_eq!(format_number(1.0, None), "1.0");
        assert_eq!(format_number(0.0, None), "0.0");
        assert_eq!(format_number(-0.25, None), "-0.25");
    }

    #[test]
    fn format_number_exponent_form() {
        assert_eq!(format_number(0.00001, None), "1e-05");
        assert_eq!(format_number(2.5e-7, None), "2.5e-07");
        assert_eq!(format_number(1e16, None), "1e+16");
        assert_eq!(format_number(0.0001, None), "0.0001");
    }

    #[test]
    fn format_number_non_finite() {
        assert_eq!(format_number(f64::NAN, None), "nan");
        assert_eq!(format_number(f64::INFINITY, None), "inf");
        assert_eq!(format_number(f64::NEG_INFINITY, None), "-inf");
    }

    #[test]
    fn format_number_fixed_precision() {
        assert_eq!(format_number(0.2, Some(6)), "0.200000");
        assert_eq!(format_number(1.0 / 3.0, Some(3)), "0.333");
    }

    #[test]
    fn format_label_line_joins_with_single_spaces() {
        let bbox = BBoxCXCYWH::<Normalized>::from_cxcywh(0.2, 0.3, 0.2, 0.2);
        assert_eq!(format_label_line(0, &bbox, None), "0 0.2 0.3 0.2 0.2");
        assert_eq!(
            format_label_line(12, &bbox, Some(2)),
            "12 0.20 0.30 0.20 0.20"
        );
    }

    #[test]
    fn label_base_name_splits_on_first_period() {
        assert_eq!(label_base_name("a.b.jpg"), "a");
        assert_eq!(label_base_name("img.v2.jpg"), "img");
        assert_eq!(label_base_name("000000397133.jpg"), "000000397133");
        assert_eq!(label_base_name("no_extension"), "no_extension");
        assert_eq!(label_base_name("train/img.png"), "train/img");
    }

    #[test]
    fn label_path_stays_inside_output_dir() {
        let out = Path::new("out");
        assert_eq!(label_path(out, "a.b.jpg"), PathBuf::from("out/a.txt"));
        assert_eq!(label_path(out, "/abs/x.jpg"), PathBuf::from("out/abs/x.txt"));
    }

    #[test]
    fn write_label_file_overwrites_and_creates_parents() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let path = temp.path().join("train/a.txt");

        write_label_file(&path, "old content that is longer").expect("first write");
        write_label_file(&path, "0 0.5 0.5 1.0 1.0").expect("second write");

        assert_eq!(fs::read_to_string(&path).unwrap(), "0 0.5 0.5 1.0 1.0");
    }

    #[test]
    fn write_data_yaml_quotes_names() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let names = vec!["person".to_string(), "it's".to_string()];

        let path = write_data_yaml(temp.path(), &names).expect("write data.yaml");
        let yaml = fs::read_to_string(path).unwrap();

        assert!(yaml.contains("nc: 2"));
        assert!(yaml.contains("0: 'person'"));
        assert!(yaml.contains("1: 'it''s'"));
    }
}
