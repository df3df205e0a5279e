//! coco2yolo: convert COCO JSON bounding boxes into YOLO label files.
//!
//! A COCO annotation index stores each box as `[x, y, width, height]` in
//! pixels. YOLO expects one text file per image with lines of
//! `<class_id> <x_center> <y_center> <width> <height>`, normalized by the
//! image size, where `class_id` is a position in a caller-supplied class list.
//!
//! # Modules
//!
//! - [`ir`]: COCO records, typed boxes, the index and the YOLO writer
//! - [`classes`]: the output class list
//! - [`generate`]: the per-image label generation pass
//! - [`error`]: error types for coco2yolo operations
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use coco2yolo::classes::ClassList;
//! use coco2yolo::generate::{generate_from_path, GenerateOptions};
//!
//! let opts = GenerateOptions::new("yolo_labels").with_background(true);
//! let report = generate_from_path(Path::new("annotation.json"), &ClassList::coco80(), &opts)?;
//! println!("{report}");
//! # Ok::<(), coco2yolo::Coco2YoloError>(())
//! ```

pub mod classes;
pub mod error;
pub mod generate;
pub mod ir;

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

pub use error::Coco2YoloError;

use classes::ClassList;
use generate::{generate_from_path, GenerateOptions, GenerationReport};

/// Converts COCO format to YOLO format.
#[derive(Parser, Debug)]
#[command(name = "coco2yolo")]
#[command(version, about)]
struct Cli {
    /// COCO annotation JSON file.
    #[arg(
        long = "coco-json",
        default_value = "annotation.json",
        env = "COCO2YOLO_COCO_JSON"
    )]
    coco_json: PathBuf,

    /// Output folder for label text files.
    #[arg(
        long = "output-folder",
        default_value = "yolo_labels",
        env = "COCO2YOLO_OUTPUT_FOLDER"
    )]
    output_folder: PathBuf,

    /// Generate empty label files for background images without annotations.
    #[arg(long)]
    include_background: bool,

    /// Class list file: data.yaml (names) or classes.txt (one name per line).
    /// Defaults to the 80 COCO class names.
    #[arg(long, conflicts_with = "class_names")]
    classes: Option<PathBuf>,

    /// Comma-separated class names, in class id order.
    #[arg(long, value_delimiter = ',')]
    class_names: Vec<String>,

    /// Fixed number of decimals for box values (default: shortest exact form).
    #[arg(long)]
    precision: Option<usize>,

    /// Also write data.yaml with the class names into the output folder.
    #[arg(long)]
    write_data_yaml: bool,

    /// Summary format printed after a successful run.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

/// Run the coco2yolo CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), Coco2YoloError> {
    let cli = Cli::parse();

    let classes = resolve_classes(&cli)?;
    let opts = GenerateOptions::new(cli.output_folder.clone())
        .with_background(cli.include_background)
        .with_precision(cli.precision)
        .with_data_yaml(cli.write_data_yaml);

    let report = generate_from_path(&cli.coco_json, &classes, &opts)?;
    print_report(&report, cli.report)
}

fn resolve_classes(cli: &Cli) -> Result<ClassList, Coco2YoloError> {
    if let Some(path) = &cli.classes {
        return ClassList::from_file(path);
    }

    if !cli.class_names.is_empty() {
        return Ok(ClassList::new(cli.class_names.iter().map(|name| name.trim())));
    }

    Ok(ClassList::coco80())
}

fn print_report(report: &GenerationReport, format: ReportFormat) -> Result<(), Coco2YoloError> {
    match format {
        ReportFormat::Json => {
            let json =
                serde_json::to_string_pretty(report).map_err(Coco2YoloError::ReportSerialize)?;
            println!("{json}");
        }
        ReportFormat::Text => print!("{report}"),
    }
    Ok(())
}
