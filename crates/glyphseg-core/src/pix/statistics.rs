//! Ink statistics

use super::PixelBuffer;
use crate::box_::BoundingBox;

impl PixelBuffer {
    /// Count ink pixels over the whole buffer.
    pub fn count_ink(&self) -> u64 {
        let mut count = 0u64;
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.is_ink(x, y) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Count ink pixels inside `region` (clipped to the frame).
    pub fn count_ink_in_rect(&self, region: &BoundingBox) -> u64 {
        let Some(clipped) = region.clip(self.width(), self.height()) else {
            return 0;
        };
        let mut count = 0u64;
        for y in clipped.y..clipped.bottom() {
            for x in clipped.x..clipped.right() {
                if self.is_ink(x as u32, y as u32) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Fraction of pixels that are ink, in `[0, 1]`.
    pub fn ink_ratio(&self) -> f32 {
        self.count_ink() as f32 / self.pixel_count() as f32
    }
}
