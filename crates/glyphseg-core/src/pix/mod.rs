//! PixelBuffer - The main sample container
//!
//! A `PixelBuffer` holds `width * height * channels` bytes in row-major,
//! interleaved order. Supported layouts are single-channel gray, RGB and
//! RGBA.
//!
//! # Ownership model
//!
//! `PixelBuffer` uses `Arc` for cheap cloning (shared ownership) and is
//! immutable once produced; every transform returns a new buffer.
//! To build or modify sample data, use [`PixelBufferMut`] (via
//! [`PixelBuffer::try_into_mut`] or [`PixelBuffer::to_mut`]) and convert
//! back with `Into<PixelBuffer>`.

mod access;
mod clip;
mod scale;
mod statistics;

use crate::error::{Error, Result};
use std::sync::Arc;

/// Channel layout of a buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum Channels {
    /// Single-channel grayscale (also used for binary buffers)
    Gray = 1,
    /// Interleaved red, green, blue
    Rgb = 3,
    /// Interleaved red, green, blue, alpha
    Rgba = 4,
}

impl Channels {
    /// Create `Channels` from a raw channel count.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidChannels`] if `count` is not 1, 3 or 4.
    pub fn from_count(count: u32) -> Result<Self> {
        match count {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            4 => Ok(Channels::Rgba),
            _ => Err(Error::InvalidChannels(count)),
        }
    }

    /// Number of bytes per pixel.
    #[inline]
    pub fn count(self) -> usize {
        self as usize
    }
}

/// Internal buffer data
#[derive(Debug, Clone, PartialEq, Eq)]
struct BufferData {
    width: u32,
    height: u32,
    channels: Channels,
    samples: Vec<u8>,
}

impl BufferData {
    fn expected_len(width: u32, height: u32, channels: Channels) -> usize {
        width as usize * height as usize * channels.count()
    }
}

/// Immutable, cheaply clonable pixel buffer
///
/// # Examples
///
/// ```
/// use glyphseg_core::{Channels, PixelBuffer};
///
/// let buf = PixelBuffer::new(64, 32, Channels::Gray).unwrap();
/// assert_eq!(buf.width(), 64);
/// assert_eq!(buf.samples().len(), 64 * 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    inner: Arc<BufferData>,
}

impl PixelBuffer {
    /// Create a zero-filled buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0.
    pub fn new(width: u32, height: u32, channels: Channels) -> Result<Self> {
        Self::new_filled(width, height, channels, 0)
    }

    /// Create a buffer with every sample set to `value`.
    pub fn new_filled(width: u32, height: u32, channels: Channels, value: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let len = BufferData::expected_len(width, height, channels);
        Ok(PixelBuffer {
            inner: Arc::new(BufferData {
                width,
                height,
                channels,
                samples: vec![value; len],
            }),
        })
    }

    /// Wrap an existing sample array.
    ///
    /// # Arguments
    ///
    /// * `width` - Width in pixels (must be > 0)
    /// * `height` - Height in pixels (must be > 0)
    /// * `channels` - Channel layout of `samples`
    /// * `samples` - Row-major interleaved samples
    ///
    /// # Errors
    ///
    /// Returns [`Error::SampleCountMismatch`] unless
    /// `samples.len() == width * height * channels`.
    pub fn from_samples(
        width: u32,
        height: u32,
        channels: Channels,
        samples: Vec<u8>,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let expected = BufferData::expected_len(width, height, channels);
        if samples.len() != expected {
            return Err(Error::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(PixelBuffer {
            inner: Arc::new(BufferData {
                width,
                height,
                channels,
                samples,
            }),
        })
    }

    /// Get the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.inner.samples
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.inner.width as usize * self.inner.height as usize
    }

    /// Get the samples of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.inner.width as usize * self.inner.channels.count();
        let start = y as usize * stride;
        &self.inner.samples[start..start + stride]
    }

    /// Check whether two buffers have the same width, height and layout.
    pub fn sizes_equal(&self, other: &PixelBuffer) -> bool {
        self.inner.width == other.inner.width
            && self.inner.height == other.inner.height
            && self.inner.channels == other.inner.channels
    }

    /// Try to take unique ownership of the sample data for mutation.
    ///
    /// Fails (returning `self`) when other clones share the data.
    pub fn try_into_mut(self) -> std::result::Result<PixelBufferMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixelBufferMut { inner: data }),
            Err(arc) => Err(PixelBuffer { inner: arc }),
        }
    }

    /// Create a mutable copy of this buffer.
    pub fn to_mut(&self) -> PixelBufferMut {
        PixelBufferMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable pixel buffer
///
/// Obtained from [`PixelBuffer::try_into_mut`] / [`PixelBuffer::to_mut`]
/// and frozen again with `Into<PixelBuffer>`.
#[derive(Debug)]
pub struct PixelBufferMut {
    inner: BufferData,
}

impl PixelBufferMut {
    /// Get the buffer width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the buffer height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the channel layout.
    #[inline]
    pub fn channels(&self) -> Channels {
        self.inner.channels
    }

    /// Get raw access to the samples.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.inner.samples
    }

    /// Get mutable access to the samples.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.inner.samples
    }
}

impl From<PixelBufferMut> for PixelBuffer {
    fn from(buf: PixelBufferMut) -> Self {
        PixelBuffer {
            inner: Arc::new(buf.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_zero_dimensions() {
        assert!(matches!(
            PixelBuffer::new(0, 4, Channels::Gray),
            Err(Error::InvalidDimension { .. })
        ));
    }

    #[test]
    fn test_from_samples_checks_length() {
        let ok = PixelBuffer::from_samples(2, 2, Channels::Rgba, vec![0; 16]);
        assert!(ok.is_ok());
        let bad = PixelBuffer::from_samples(2, 2, Channels::Rgba, vec![0; 15]);
        assert!(matches!(
            bad,
            Err(Error::SampleCountMismatch {
                expected: 16,
                actual: 15
            })
        ));
    }

    #[test]
    fn test_channels_from_count() {
        assert_eq!(Channels::from_count(1).unwrap(), Channels::Gray);
        assert_eq!(Channels::from_count(4).unwrap(), Channels::Rgba);
        assert!(Channels::from_count(2).is_err());
    }

    #[test]
    fn test_try_into_mut_shared_fails() {
        let buf = PixelBuffer::new(3, 3, Channels::Gray).unwrap();
        let shared = buf.clone();
        let back = buf.try_into_mut().unwrap_err();
        drop(shared);
        assert!(back.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_mut_leaves_original_untouched() {
        let buf = PixelBuffer::new_filled(2, 2, Channels::Gray, 7).unwrap();
        let mut copy = buf.to_mut();
        copy.samples_mut()[0] = 99;
        let copy: PixelBuffer = copy.into();
        assert_eq!(buf.samples()[0], 7);
        assert_eq!(copy.samples()[0], 99);
    }

    #[test]
    fn test_row_slices() {
        let buf =
            PixelBuffer::from_samples(3, 2, Channels::Gray, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(buf.row(1), &[4, 5, 6]);
    }
}
