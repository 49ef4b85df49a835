//! Scaling by sampling
//!
//! Nearest-neighbour resampling; used to bring glyph crops to a fixed
//! size before feature extraction.

use super::PixelBuffer;
use crate::error::{Error, Result};

impl PixelBuffer {
    /// Resample the buffer to exactly `width` x `height` pixels.
    ///
    /// Each destination pixel copies the source pixel under its center,
    /// so binary buffers stay binary.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either target dimension is 0.
    pub fn scale_to_size(&self, width: u32, height: u32) -> Result<PixelBuffer> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        if width == self.width() && height == self.height() {
            return Ok(self.clone());
        }

        let n = self.channels().count();
        let (sw, sh) = (self.width() as u64, self.height() as u64);
        let (dw, dh) = (width as u64, height as u64);
        let mut samples = Vec::with_capacity(width as usize * height as usize * n);

        for y in 0..dh {
            let sy = ((2 * y + 1) * sh / (2 * dh)).min(sh - 1) as u32;
            let row = self.row(sy);
            for x in 0..dw {
                let sx = ((2 * x + 1) * sw / (2 * dw)).min(sw - 1) as usize;
                samples.extend_from_slice(&row[sx * n..(sx + 1) * n]);
            }
        }

        PixelBuffer::from_samples(width, height, self.channels(), samples)
    }
}
