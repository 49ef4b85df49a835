//! Gradient orientation histograms
//!
//! The bitmap is split into `cell_size` x `cell_size` cells (edge cells
//! may be smaller). Within a cell every pixel contributes its gradient
//! magnitude to one of nine 40-degree orientation bins spanning the full
//! circle, and each cell histogram is then L1-normalized.

use glyphseg_core::PixelBuffer;

/// Number of orientation bins per cell
pub const ORIENTATION_BINS: usize = 9;

const BIN_WIDTH_DEGREES: f32 = 360.0 / ORIENTATION_BINS as f32;

/// Forward-difference gradient at (x, y)
///
/// The difference is 0 on the last column (x) and last row (y).
#[inline]
fn gradient(pix: &PixelBuffer, x: u32, y: u32) -> (f32, f32) {
    let here = pix.luma_unchecked(x, y);
    let gx = if x + 1 < pix.width() {
        pix.luma_unchecked(x + 1, y) - here
    } else {
        0.0
    };
    let gy = if y + 1 < pix.height() {
        pix.luma_unchecked(x, y + 1) - here
    } else {
        0.0
    };
    (gx, gy)
}

/// Orientation bin of a gradient: `floor((degrees + 180) / 40) mod 9`
#[inline]
pub fn orientation_bin(gx: f32, gy: f32) -> usize {
    let degrees = gy.atan2(gx).to_degrees();
    ((degrees + 180.0) / BIN_WIDTH_DEGREES).floor() as usize % ORIENTATION_BINS
}

/// Compute the per-cell orientation histograms of a bitmap
///
/// # Returns
///
/// `9 * ceil(width / cell_size) * ceil(height / cell_size)` values; cells
/// are emitted row by row, nine bins per cell. A cell without any gradient
/// keeps an all-zero histogram.
pub fn hog_features(pix: &PixelBuffer, cell_size: u32) -> Vec<f32> {
    let cell = cell_size.max(1);
    let cells_x = pix.width().div_ceil(cell);
    let cells_y = pix.height().div_ceil(cell);
    let mut features = Vec::with_capacity(ORIENTATION_BINS * (cells_x * cells_y) as usize);

    for cy in 0..cells_y {
        for cx in 0..cells_x {
            let mut hist = [0.0f32; ORIENTATION_BINS];
            let x_end = ((cx + 1) * cell).min(pix.width());
            let y_end = ((cy + 1) * cell).min(pix.height());

            for y in cy * cell..y_end {
                for x in cx * cell..x_end {
                    let (gx, gy) = gradient(pix, x, y);
                    let magnitude = (gx * gx + gy * gy).sqrt();
                    if magnitude > 0.0 {
                        hist[orientation_bin(gx, gy)] += magnitude;
                    }
                }
            }

            let sum: f32 = hist.iter().sum();
            if sum > 0.0 {
                for v in &mut hist {
                    *v /= sum;
                }
            }
            features.extend_from_slice(&hist);
        }
    }

    features
}
