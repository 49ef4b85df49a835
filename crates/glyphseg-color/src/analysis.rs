//! Luma statistics

use crate::ColorResult;
use glyphseg_core::PixelBuffer;

/// Build a 256-bin luma histogram
///
/// Each pixel lands in bin `floor(luma)`, so for any integer threshold `t`
/// the pixels in bins `< t` are exactly those with `luma < t`.
pub fn grayscale_histogram(pix: &PixelBuffer) -> ColorResult<[u32; 256]> {
    let mut hist = [0u32; 256];
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let bin = (pix.luma_unchecked(x, y) as usize).min(255);
            hist[bin] += 1;
        }
    }
    Ok(hist)
}
