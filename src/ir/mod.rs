//! In-memory representation of a COCO annotation index.
//!
//! Records are read as-is from COCO JSON ([`io_coco_json`]), queried through
//! [`CocoIndex`], and their boxes converted and written as YOLO labels
//! ([`io_yolo`]).
//!
//! Pixel and normalized boxes are separate types: a `BBoxXYWH<Pixel>` can
//! only become a `BBoxCXCYWH<Normalized>` through [`convert`] or
//! [`BBoxXYWH::to_yolo`], which apply the image dimensions.
//!
//! # Example
//!
//! ```
//! use coco2yolo::ir::{convert, BBoxXYWH, Pixel};
//!
//! let bbox = BBoxXYWH::<Pixel>::from_xywh(10.0, 10.0, 20.0, 10.0);
//! let yolo = convert(&bbox, 100, 50)?;
//! assert_eq!(yolo.to_cxcywh(), (0.2, 0.3, 0.2, 0.2));
//! # Ok::<(), coco2yolo::Coco2YoloError>(())
//! ```

mod bbox;
mod coord;
mod ids;
mod index;
pub mod io_coco_json;
pub mod io_yolo;
mod model;
mod space;

pub use bbox::{convert, BBoxCXCYWH, BBoxXYWH};
pub use coord::Coord;
pub use ids::{AnnotationId, CategoryId, ImageId};
pub use index::CocoIndex;
pub use model::{Annotation, Category, Dataset, Image};
pub use space::{Normalized, Pixel};
