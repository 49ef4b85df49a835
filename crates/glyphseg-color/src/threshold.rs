//! Binary thresholding
//!
//! Provides two methods for converting gray or color buffers to binary:
//! - Fixed threshold binarization
//! - Otsu's method (automatic threshold selection)
//!
//! A pixel becomes ink (0) when its luma is strictly below the threshold
//! and paper (255) otherwise.

use crate::ColorResult;
use crate::analysis::grayscale_histogram;
use glyphseg_core::color::{INK, PAPER};
use glyphseg_core::{Channels, PixelBuffer};
use tracing::debug;

/// Threshold used when the histogram admits no two-class split
pub const OTSU_FALLBACK_THRESHOLD: u8 = 128;

/// Convert a buffer to binary using a fixed threshold
///
/// # Arguments
///
/// * `pix` - Gray, RGB or RGBA buffer
/// * `threshold` - Pixels with luma `< threshold` become ink
///
/// # Returns
///
/// A new single-channel buffer holding only `INK` and `PAPER` samples.
pub fn threshold_to_binary(pix: &PixelBuffer, threshold: u8) -> ColorResult<PixelBuffer> {
    let cutoff = threshold as f32;
    let mut samples = Vec::with_capacity(pix.pixel_count());
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            let luma = pix.luma_unchecked(x, y);
            samples.push(if luma < cutoff { INK } else { PAPER });
        }
    }
    Ok(PixelBuffer::from_samples(
        pix.width(),
        pix.height(),
        Channels::Gray,
        samples,
    )?)
}

/// Select Otsu's threshold from a 256-bin histogram
///
/// Every candidate `t` in `1..=255` splits the population into bins
/// `< t` and bins `>= t`. The threshold maximizing the between-class
/// variance `w0 * w1 * (mean0 - mean1)^2` wins; on ties the lowest `t` is
/// kept. When no split has positive variance (all pixels in one bin, or
/// an empty histogram) [`OTSU_FALLBACK_THRESHOLD`] is returned.
pub fn otsu_threshold_from_histogram(hist: &[u32; 256]) -> u8 {
    let total: f64 = hist.iter().map(|&c| c as f64).sum();
    if total == 0.0 {
        return OTSU_FALLBACK_THRESHOLD;
    }
    let weighted_total: f64 = hist
        .iter()
        .enumerate()
        .map(|(i, &c)| i as f64 * c as f64)
        .sum();

    let mut best_threshold = OTSU_FALLBACK_THRESHOLD;
    let mut best_variance = 0.0f64;
    let mut count0 = 0.0f64;
    let mut weighted0 = 0.0f64;

    for t in 1..=255usize {
        count0 += hist[t - 1] as f64;
        weighted0 += (t - 1) as f64 * hist[t - 1] as f64;
        let count1 = total - count0;
        if count0 == 0.0 || count1 == 0.0 {
            continue;
        }

        let w0 = count0 / total;
        let w1 = count1 / total;
        let mean0 = weighted0 / count0;
        let mean1 = (weighted_total - weighted0) / count1;
        let variance = w0 * w1 * (mean0 - mean1) * (mean0 - mean1);

        if variance > best_variance {
            best_variance = variance;
            best_threshold = t as u8;
        }
    }

    best_threshold
}

/// Compute Otsu's threshold for a buffer
///
/// Returns the threshold maximizing between-class luma variance.
pub fn compute_otsu_threshold(pix: &PixelBuffer) -> ColorResult<u8> {
    let hist = grayscale_histogram(pix)?;
    Ok(otsu_threshold_from_histogram(&hist))
}

/// Convert a buffer to binary using Otsu's method
///
/// Automatically determines the threshold, then applies
/// [`threshold_to_binary`].
pub fn threshold_otsu(pix: &PixelBuffer) -> ColorResult<PixelBuffer> {
    let threshold = compute_otsu_threshold(pix)?;
    debug!(
        threshold,
        width = pix.width(),
        height = pix.height(),
        "otsu threshold selected"
    );
    threshold_to_binary(pix, threshold)
}
