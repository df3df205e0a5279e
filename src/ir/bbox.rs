//! Bounding box types for both ends of the COCO → YOLO conversion.
//!
//! COCO stores `[x, y, width, height]` with `(x, y)` the top-left corner in
//! pixels ([`BBoxXYWH<Pixel>`]). YOLO label files store
//! `[x_center, y_center, width, height]` as fractions of the image size
//! ([`BBoxCXCYWH<Normalized>`]).

use super::coord::Coord;
use super::{Normalized, Pixel};
use crate::error::Coco2YoloError;

/// An axis-aligned box anchored at its top-left corner.
///
/// Construction does not check for positive extents; a negative width is
/// carried through the conversion unchanged.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxXYWH<TSpace> {
    pub min: Coord<TSpace>,
    pub width: f64,
    pub height: f64,
}

impl<TSpace> BBoxXYWH<TSpace> {
    #[inline]
    pub fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            min: Coord::new(x, y),
            width,
            height,
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.min.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.min.y
    }

    /// Returns `(x, y, width, height)`.
    #[inline]
    pub fn to_xywh(&self) -> (f64, f64, f64, f64) {
        (self.min.x, self.min.y, self.width, self.height)
    }
}

impl<TSpace> std::fmt::Debug for BBoxXYWH<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxXYWH")
            .field("x", &self.min.x)
            .field("y", &self.min.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// An axis-aligned box anchored at its center.
#[derive(Clone, Copy, PartialEq)]
pub struct BBoxCXCYWH<TSpace> {
    pub center: Coord<TSpace>,
    pub width: f64,
    pub height: f64,
}

impl<TSpace> BBoxCXCYWH<TSpace> {
    #[inline]
    pub fn from_cxcywh(cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self {
            center: Coord::new(cx, cy),
            width,
            height,
        }
    }

    #[inline]
    pub fn cx(&self) -> f64 {
        self.center.x
    }

    #[inline]
    pub fn cy(&self) -> f64 {
        self.center.y
    }

    /// Returns `(cx, cy, width, height)`.
    #[inline]
    pub fn to_cxcywh(&self) -> (f64, f64, f64, f64) {
        (self.center.x, self.center.y, self.width, self.height)
    }
}

impl<TSpace> std::fmt::Debug for BBoxCXCYWH<TSpace> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BBoxCXCYWH")
            .field("cx", &self.center.x)
            .field("cy", &self.center.y)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl BBoxCXCYWH<Normalized> {
    /// Returns true if every value lies within `[0, 1]`.
    ///
    /// Out-of-range boxes are still written; this only feeds diagnostics.
    pub fn is_within_unit_range(&self) -> bool {
        let (cx, cy, w, h) = self.to_cxcywh();
        [cx, cy, w, h].iter().all(|v| (0.0..=1.0).contains(v))
    }

    /// Maps a normalized center box back to a top-left pixel box.
    pub fn to_pixel_xywh(&self, image_width: f64, image_height: f64) -> BBoxXYWH<Pixel> {
        let w = self.width * image_width;
        let h = self.height * image_height;
        BBoxXYWH::from_xywh(
            self.center.x * image_width - w / 2.0,
            self.center.y * image_height - h / 2.0,
            w,
            h,
        )
    }
}

impl BBoxXYWH<Pixel> {
    /// Converts a COCO pixel box to a normalized YOLO box.
    ///
    /// The center is `x + w/2`, `y + h/2`; x-axis quantities are divided by
    /// `image_width` and y-axis quantities by `image_height`. No rounding or
    /// clamping is applied. Dimensions are not checked: a zero dimension
    /// yields infinite or NaN values. Use [`convert`] for the checked form.
    pub fn to_yolo(&self, image_width: f64, image_height: f64) -> BBoxCXCYWH<Normalized> {
        let xcenter = self.min.x + self.width / 2.0;
        let ycenter = self.min.y + self.height / 2.0;

        BBoxCXCYWH::from_cxcywh(
            xcenter / image_width,
            ycenter / image_height,
            self.width / image_width,
            self.height / image_height,
        )
    }
}

/// Converts a COCO `[x, y, w, h]` pixel box to YOLO `[xc, yc, w, h]`.
///
/// Takes integer image dimensions, as stored on image records.
///
/// # Errors
/// [`Coco2YoloError::ZeroImageSize`] if either dimension is zero.
pub fn convert(
    bbox: &BBoxXYWH<Pixel>,
    image_width: u32,
    image_height: u32,
) -> Result<BBoxCXCYWH<Normalized>, Coco2YoloError> {
    if image_width == 0 || image_height == 0 {
        return Err(Coco2YoloError::ZeroImageSize {
            width: image_width,
            height: image_height,
        });
    }
    Ok(bbox.to_yolo(image_width as f64, image_height as f64))
}
