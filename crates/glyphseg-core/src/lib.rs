//! glyphseg-core - Basic data structures for glyph segmentation
//!
//! This crate provides the fundamental data structures used throughout
//! the engine:
//!
//! - [`PixelBuffer`] / [`PixelBufferMut`] - The sample container (immutable / mutable)
//! - [`BoundingBox`] - Rectangle regions in parent-buffer coordinates
//! - [`Segment`] - A bounding box together with its cropped bitmap
//! - [`Projection`] - Row and column foreground histograms
//!
//! # Binary convention
//!
//! A binary buffer is a single-channel buffer whose samples are either
//! [`color::INK`] (0, foreground) or [`color::PAPER`] (255, background).

pub mod box_;
pub mod error;
pub mod pix;
pub mod profile;
pub mod segment;

pub use box_::BoundingBox;
pub use error::{Error, Result};
pub use pix::{Channels, PixelBuffer, PixelBufferMut};
pub use profile::Projection;
pub use segment::Segment;

/// Luma weights and ink/paper sample values.
pub mod color {
    /// Red weight in the luma transform
    pub const LUMA_RED: f32 = 0.299;
    /// Green weight in the luma transform
    pub const LUMA_GREEN: f32 = 0.587;
    /// Blue weight in the luma transform
    pub const LUMA_BLUE: f32 = 0.114;

    /// Sample value of a foreground (ink) pixel in a binary buffer
    pub const INK: u8 = 0;
    /// Sample value of a background (paper) pixel in a binary buffer
    pub const PAPER: u8 = 255;

    /// Luma below which a pixel of a non-binary buffer counts as ink.
    pub const INK_LUMA_CUTOFF: f32 = 128.0;

    /// Luma of an RGB triple: `0.299R + 0.587G + 0.114B`.
    ///
    /// Evaluated in integer thousandths so that `R == G == B == v` yields
    /// exactly `v`.
    #[inline]
    pub fn luma(r: u8, g: u8, b: u8) -> f32 {
        let milli = 299 * r as u32 + 587 * g as u32 + 114 * b as u32;
        milli as f32 / 1000.0
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_luma_extremes() {
            assert_eq!(luma(0, 0, 0), 0.0);
            assert_eq!(luma(255, 255, 255), 255.0);
            assert_eq!(luma(128, 128, 128), 128.0);
        }

        #[test]
        fn test_luma_matches_weights() {
            let expected = LUMA_RED * 10.0 + LUMA_GREEN * 20.0 + LUMA_BLUE * 30.0;
            assert!((luma(10, 20, 30) - expected).abs() < 1e-3);
        }

        #[test]
        fn test_luma_weights_green_dominates() {
            assert!(luma(0, 255, 0) > luma(255, 0, 0));
            assert!(luma(255, 0, 0) > luma(0, 0, 255));
        }
    }
}
