//! Color space conversion
//!
//! Only the luma transform is needed by the engine:
//! `gray = 0.299*R + 0.587*G + 0.114*B` (ITU-R BT.601). Alpha is ignored.

use crate::ColorResult;
use glyphseg_core::{Channels, PixelBuffer, color};

/// Convert RGB to an 8-bit gray level
///
/// The luma is rounded to the nearest integer.
#[inline]
pub fn rgb_to_gray(r: u8, g: u8, b: u8) -> u8 {
    color::luma(r, g, b).round().clamp(0.0, 255.0) as u8
}

/// Convert a buffer to single-channel gray
///
/// Gray input is returned as a cheap clone.
pub fn convert_to_gray(pix: &PixelBuffer) -> ColorResult<PixelBuffer> {
    if pix.channels() == Channels::Gray {
        return Ok(pix.clone());
    }

    let n = pix.channels().count();
    let samples = pix
        .samples()
        .chunks_exact(n)
        .map(|px| rgb_to_gray(px[0], px[1], px[2]))
        .collect();
    Ok(PixelBuffer::from_samples(
        pix.width(),
        pix.height(),
        Channels::Gray,
        samples,
    )?)
}
