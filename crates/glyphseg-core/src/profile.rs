//! Projection profiles
//!
//! Row and column ink histograms over a buffer. For any buffer,
//! `sum(horizontal) == sum(vertical) == count_ink()`.

use crate::box_::BoundingBox;
use crate::pix::PixelBuffer;

/// Row/column ink histograms
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection {
    /// `horizontal[y]` = number of ink pixels in row `y`
    pub horizontal: Vec<u32>,
    /// `vertical[x]` = number of ink pixels in column `x`
    pub vertical: Vec<u32>,
}

impl Projection {
    /// Compute both projections of `pix`.
    pub fn of(pix: &PixelBuffer) -> Self {
        let mut horizontal = vec![0u32; pix.height() as usize];
        let mut vertical = vec![0u32; pix.width() as usize];

        for y in 0..pix.height() {
            for x in 0..pix.width() {
                if pix.is_ink(x, y) {
                    horizontal[y as usize] += 1;
                    vertical[x as usize] += 1;
                }
            }
        }

        Self {
            horizontal,
            vertical,
        }
    }

    /// Total ink counted by the row histogram.
    pub fn total(&self) -> u64 {
        self.horizontal.iter().map(|&v| v as u64).sum()
    }
}

/// Column ink histogram restricted to `region` (clipped to the frame).
///
/// The result has one entry per column of the clipped region.
pub fn vertical_projection_in(pix: &PixelBuffer, region: &BoundingBox) -> Vec<u32> {
    let Some(clipped) = region.clip(pix.width(), pix.height()) else {
        return Vec::new();
    };
    let mut counts = vec![0u32; clipped.w as usize];
    for y in clipped.y..clipped.bottom() {
        for (i, x) in (clipped.x..clipped.right()).enumerate() {
            if pix.is_ink(x as u32, y as u32) {
                counts[i] += 1;
            }
        }
    }
    counts
}
