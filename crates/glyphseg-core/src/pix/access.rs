//! Pixel access functions
//!
//! Low-level functions for getting and setting individual pixels.
//! Samples are interleaved, so pixel `(x, y)` starts at byte
//! `(y * width + x) * channels`.

use super::{Channels, PixelBuffer, PixelBufferMut};
use crate::color;
use crate::error::{Error, Result};

#[inline]
fn offset(width: u32, channels: Channels, x: u32, y: u32) -> usize {
    (y as usize * width as usize + x as usize) * channels.count()
}

#[inline]
fn luma_of(channels: Channels, px: &[u8]) -> f32 {
    match channels {
        Channels::Gray => px[0] as f32,
        Channels::Rgb | Channels::Rgba => color::luma(px[0], px[1], px[2]),
    }
}

impl PixelBuffer {
    /// Get the samples of the pixel at (x, y).
    ///
    /// Returns `None` if coordinates are out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let start = offset(self.width(), self.channels(), x, y);
        Some(&self.samples()[start..start + self.channels().count()])
    }

    /// Get the luma of the pixel at (x, y).
    ///
    /// Gray buffers return the sample itself; RGB(A) buffers use
    /// `0.299R + 0.587G + 0.114B` and ignore alpha.
    pub fn luma(&self, x: u32, y: u32) -> Option<f32> {
        self.pixel(x, y).map(|px| luma_of(self.channels(), px))
    }

    /// Get the luma without bounds checking.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    #[inline]
    pub fn luma_unchecked(&self, x: u32, y: u32) -> f32 {
        let start = offset(self.width(), self.channels(), x, y);
        luma_of(self.channels(), &self.samples()[start..])
    }

    /// Check whether the pixel at (x, y) is ink.
    ///
    /// A pixel is ink when its luma is below [`color::INK_LUMA_CUTOFF`];
    /// for binary buffers this is exactly `sample == INK`.
    /// Out-of-bounds coordinates are never ink.
    #[inline]
    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        x < self.width()
            && y < self.height()
            && self.luma_unchecked(x, y) < color::INK_LUMA_CUTOFF
    }

    /// Check whether every sample of a single-channel buffer is INK or PAPER.
    pub fn is_binary(&self) -> bool {
        self.channels() == Channels::Gray
            && self
                .samples()
                .iter()
                .all(|&s| s == color::INK || s == color::PAPER)
    }
}

impl PixelBufferMut {
    /// Get the luma of the pixel at (x, y).
    pub fn luma(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let start = offset(self.width(), self.channels(), x, y);
        Some(luma_of(self.channels(), &self.samples()[start..]))
    }

    /// Set all samples of the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// Returns [`Error::IndexOutOfBounds`] if coordinates are out of bounds,
    /// or [`Error::InvalidParameter`] if `value` does not hold one sample
    /// per channel.
    pub fn set_pixel(&mut self, x: u32, y: u32, value: &[u8]) -> Result<()> {
        self.check_bounds(x, y)?;
        let n = self.channels().count();
        if value.len() != n {
            return Err(Error::InvalidParameter(format!(
                "pixel needs {} samples, got {}",
                n,
                value.len()
            )));
        }
        let start = offset(self.width(), self.channels(), x, y);
        self.samples_mut()[start..start + n].copy_from_slice(value);
        Ok(())
    }

    /// Set the pixel at (x, y) to a gray level.
    ///
    /// Color buffers receive `value` in every color channel and an opaque
    /// alpha.
    pub fn set_gray(&mut self, x: u32, y: u32, value: u8) -> Result<()> {
        self.check_bounds(x, y)?;
        let channels = self.channels();
        let start = offset(self.width(), channels, x, y);
        let samples = self.samples_mut();
        match channels {
            Channels::Gray => samples[start] = value,
            Channels::Rgb => samples[start..start + 3].fill(value),
            Channels::Rgba => {
                samples[start..start + 3].fill(value);
                samples[start + 3] = 255;
            }
        }
        Ok(())
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<()> {
        if x >= self.width() {
            return Err(Error::IndexOutOfBounds {
                index: x as usize,
                len: self.width() as usize,
            });
        }
        if y >= self.height() {
            return Err(Error::IndexOutOfBounds {
                index: y as usize,
                len: self.height() as usize,
            });
        }
        Ok(())
    }
}
