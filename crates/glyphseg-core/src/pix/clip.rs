//! Clipping operations
//!
//! Rectangle extraction and ink bounding boxes.

use super::{PixelBuffer, PixelBufferMut};
use crate::box_::BoundingBox;
use crate::error::{Error, Result};

impl PixelBuffer {
    /// Extract the rectangle `region` into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegionOutOfBounds`] if `region` is empty or does not
    /// lie entirely inside the buffer.
    pub fn clip_rectangle(&self, region: &BoundingBox) -> Result<PixelBuffer> {
        if !region.fits_within(self.width(), self.height()) {
            return Err(Error::RegionOutOfBounds {
                x: region.x,
                y: region.y,
                w: region.w,
                h: region.h,
                width: self.width(),
                height: self.height(),
            });
        }

        let n = self.channels().count();
        let (x0, y0) = (region.x as usize, region.y as usize);
        let (w, h) = (region.w as usize, region.h as usize);
        let mut samples = Vec::with_capacity(w * h * n);
        for y in y0..y0 + h {
            let row = self.row(y as u32);
            samples.extend_from_slice(&row[x0 * n..(x0 + w) * n]);
        }

        PixelBuffer::from_samples(region.w as u32, region.h as u32, self.channels(), samples)
    }

    /// Extract `region` after clipping it to the buffer frame.
    ///
    /// Returns the crop together with the clipped box, or `None` if the
    /// region does not overlap the buffer at all.
    pub fn clip_rectangle_to_frame(
        &self,
        region: &BoundingBox,
    ) -> Result<Option<(PixelBuffer, BoundingBox)>> {
        match region.clip(self.width(), self.height()) {
            Some(clipped) => Ok(Some((self.clip_rectangle(&clipped)?, clipped))),
            None => Ok(None),
        }
    }

    /// Compute the bounding box of all ink pixels.
    ///
    /// Returns `None` when the buffer holds no ink.
    pub fn ink_bounds(&self) -> Option<BoundingBox> {
        let mut min_x = u32::MAX;
        let mut min_y = u32::MAX;
        let mut max_x = 0u32;
        let mut max_y = 0u32;
        let mut found = false;

        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.is_ink(x, y) {
                    found = true;
                    min_x = min_x.min(x);
                    min_y = min_y.min(y);
                    max_x = max_x.max(x);
                    max_y = max_y.max(y);
                }
            }
        }

        found.then(|| {
            BoundingBox::from_extent(min_x as i32, min_y as i32, max_x as i32, max_y as i32)
        })
    }
}

impl PixelBufferMut {
    /// Set every pixel inside `region` (clipped to the frame) to `value`.
    pub fn fill_rect(&mut self, region: &BoundingBox, value: u8) -> Result<()> {
        let Some(clipped) = region.clip(self.width(), self.height()) else {
            return Ok(());
        };
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                self.set_gray(x as u32, y as u32, value)?;
            }
        }
        Ok(())
    }
}
