//! Feature extraction
//!
//! Converts a glyph bitmap into a fixed-length vector of floats:
//!
//! 1. [`hog`] - per-cell histograms of gradient orientation
//! 2. [`projection`] - row and column ink counts, each normalized by its max
//! 3. [`contour`] - five ratio statistics of the ink shape
//!
//! The gradient and projection parts are computed on the glyph resampled
//! to `normalized_width` x `normalized_height`, so the vector length
//! depends only on [`FeatureOptions`]. Contour statistics are ratios and
//! use the glyph at its original size.

pub mod contour;
pub mod hog;
pub mod projection;

use crate::{RecogError, RecogResult};
use glyphseg_core::PixelBuffer;
use serde::{Deserialize, Serialize};

pub use contour::{CONTOUR_FEATURE_COUNT, contour_features};
pub use hog::{ORIENTATION_BINS, hog_features};
pub use projection::projection_features;

/// Options for feature extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureOptions {
    /// Side of a gradient histogram cell in pixels (default: 8)
    pub cell_size: u32,
    /// Width glyphs are resampled to (default: 32)
    pub normalized_width: u32,
    /// Height glyphs are resampled to (default: 32)
    pub normalized_height: u32,
}

impl Default for FeatureOptions {
    fn default() -> Self {
        Self {
            cell_size: 8,
            normalized_width: 32,
            normalized_height: 32,
        }
    }
}

impl FeatureOptions {
    /// Set the cell size
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    /// Set the normalized glyph size
    pub fn with_normalized_size(mut self, width: u32, height: u32) -> Self {
        self.normalized_width = width;
        self.normalized_height = height;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> RecogResult<()> {
        if self.cell_size == 0 || self.normalized_width == 0 || self.normalized_height == 0 {
            return Err(RecogError::InvalidParameter(format!(
                "feature sizes must be positive: cell={}, normalized={}x{}",
                self.cell_size, self.normalized_width, self.normalized_height
            )));
        }
        Ok(())
    }

    /// Length of every vector produced with these options
    ///
    /// `9 * ceil(W / c) * ceil(H / c) + W + H + 5`
    pub fn arity(&self) -> usize {
        let cells_x = self.normalized_width.div_ceil(self.cell_size) as usize;
        let cells_y = self.normalized_height.div_ceil(self.cell_size) as usize;
        ORIENTATION_BINS * cells_x * cells_y
            + self.normalized_width as usize
            + self.normalized_height as usize
            + CONTOUR_FEATURE_COUNT
    }
}

/// A feature vector, optionally labeled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature values in extraction order
    pub values: Vec<f32>,
    /// Class label when used as training data
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl FeatureVector {
    /// Create an unlabeled vector
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            values,
            label: None,
        }
    }

    /// Attach a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the vector is empty
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Extract the full feature vector of a glyph bitmap
///
/// Concatenates, in this order, [`hog_features`] and
/// [`projection_features`] of the resampled glyph and
/// [`contour_features`] of the original glyph.
///
/// # Errors
///
/// Returns [`RecogError::InvalidParameter`] for invalid options.
pub fn extract_features(pix: &PixelBuffer, options: &FeatureOptions) -> RecogResult<FeatureVector> {
    options.validate()?;
    let normalized = pix.scale_to_size(options.normalized_width, options.normalized_height)?;

    let mut values = Vec::with_capacity(options.arity());
    values.extend(hog_features(&normalized, options.cell_size));
    values.extend(projection_features(&normalized));
    values.extend(contour_features(pix));
    Ok(FeatureVector::new(values))
}

/// Check that `values` has length `expected`.
pub(crate) fn check_arity(expected: usize, values: &[f32]) -> RecogResult<()> {
    if values.len() != expected {
        return Err(RecogError::FeatureArityMismatch {
            expected,
            actual: values.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphseg_core::{BoundingBox, Channels};

    fn ring(w: u32, h: u32) -> PixelBuffer {
        let mut p = PixelBuffer::new_filled(w, h, Channels::Gray, 255)
            .unwrap()
            .to_mut();
        p.fill_rect(&BoundingBox::new_unchecked(1, 1, w as i32 - 2, h as i32 - 2), 0)
            .unwrap();
        p.fill_rect(&BoundingBox::new_unchecked(3, 3, w as i32 - 6, h as i32 - 6), 255)
            .unwrap();
        p.into()
    }

    #[test]
    fn test_default_arity() {
        assert_eq!(FeatureOptions::default().arity(), 9 * 16 + 64 + 5);
        let odd = FeatureOptions::default()
            .with_cell_size(5)
            .with_normalized_size(12, 7);
        assert_eq!(odd.arity(), 9 * 3 * 2 + 19 + 5);
    }

    #[test]
    fn test_arity_independent_of_glyph_size() {
        let options = FeatureOptions::default();
        for (w, h) in [(10, 14), (33, 20), (64, 64)] {
            let v = extract_features(&ring(w, h), &options).unwrap();
            assert_eq!(v.len(), options.arity());
            assert!(v.values.iter().all(|x| x.is_finite()));
        }
    }

    #[test]
    fn test_identical_glyphs_identical_features() {
        let options = FeatureOptions::default();
        let a = extract_features(&ring(20, 28), &options).unwrap();
        let b = extract_features(&ring(20, 28), &options).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_options() {
        let bad = FeatureOptions::default().with_cell_size(0);
        assert!(extract_features(&ring(10, 10), &bad).is_err());
    }

    #[test]
    fn test_check_arity() {
        assert!(check_arity(3, &[0.0; 3]).is_ok());
        assert!(matches!(
            check_arity(3, &[0.0; 2]),
            Err(RecogError::FeatureArityMismatch {
                expected: 3,
                actual: 2
            })
        ));
    }
}
