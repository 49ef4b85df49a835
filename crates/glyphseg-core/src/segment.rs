//! Segment - a sub-region of a parent buffer with its own bitmap

use crate::box_::BoundingBox;
use crate::error::Result;
use crate::pix::PixelBuffer;

/// A bounding box in parent coordinates plus the cropped bitmap.
///
/// Invariant: `bbox` has positive width and height and lies inside the
/// parent buffer; `pixels` has exactly `bbox.w` x `bbox.h` pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    bbox: BoundingBox,
    pixels: PixelBuffer,
}

impl Segment {
    /// Crop `bbox` out of `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::RegionOutOfBounds`] if the box is empty or
    /// does not fit inside `parent`.
    pub fn from_parent(parent: &PixelBuffer, bbox: BoundingBox) -> Result<Self> {
        let pixels = parent.clip_rectangle(&bbox)?;
        Ok(Self { bbox, pixels })
    }

    /// Left x in parent coordinates
    #[inline]
    pub fn x(&self) -> i32 {
        self.bbox.x
    }

    /// Top y in parent coordinates
    #[inline]
    pub fn y(&self) -> i32 {
        self.bbox.y
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Bounding box in parent coordinates
    #[inline]
    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// The cropped bitmap
    #[inline]
    pub fn pixels(&self) -> &PixelBuffer {
        &self.pixels
    }
}
