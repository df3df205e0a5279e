//! Coordinate space marker types.
//!
//! Zero-sized type parameters that keep pixel boxes read from a COCO index
//! apart from the normalized boxes written to YOLO label files.

use std::fmt;

/// Absolute pixel units, origin at the image's top-left corner.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Fractions of the owning image's width or height.
///
/// Nothing clamps these to `[0, 1]`; a box that extends past the image edge
/// yields values outside that range.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Normalized {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Normalized {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
