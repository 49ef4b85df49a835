//! Page segmentation
//!
//! Two-pass projection segmentation of a page into character boxes:
//! row bands are found in the horizontal projection, then column bands
//! are found in the vertical projection restricted to each row band.
//!
//! Implemented APIs:
//! - `find_ranges` - non-empty runs of a 1-D histogram with gap tolerance
//! - `segment_characters` - row-then-column character candidates

use std::ops::Range;

use crate::{RecogError, RecogResult};
use glyphseg_color::threshold_otsu;
use glyphseg_core::profile::vertical_projection_in;
use glyphseg_core::{BoundingBox, PixelBuffer, Projection, Segment};
use tracing::debug;

/// Options for page segmentation
#[derive(Debug, Clone)]
pub struct PageSegOptions {
    /// Zero run that closes a row band (default: 2)
    pub row_gap: usize,
    /// Zero run that closes a column band (default: 1)
    pub column_gap: usize,
    /// Narrower candidates are discarded (default: 2)
    pub min_char_width: u32,
    /// Shorter candidates are discarded (default: 5)
    pub min_char_height: u32,
    /// Candidates with ink ratio `<=` this are noise (default: 0.05)
    pub min_ink_ratio: f32,
    /// Candidates with ink ratio `>=` this are solid blocks (default: 0.95)
    pub max_ink_ratio: f32,
}

impl Default for PageSegOptions {
    fn default() -> Self {
        Self {
            row_gap: 2,
            column_gap: 1,
            min_char_width: 2,
            min_char_height: 5,
            min_ink_ratio: 0.05,
            max_ink_ratio: 0.95,
        }
    }
}

impl PageSegOptions {
    /// Set the gaps closing row and column bands
    pub fn with_gaps(mut self, row_gap: usize, column_gap: usize) -> Self {
        self.row_gap = row_gap;
        self.column_gap = column_gap;
        self
    }

    /// Set the minimum character size
    pub fn with_min_char_size(mut self, width: u32, height: u32) -> Self {
        self.min_char_width = width;
        self.min_char_height = height;
        self
    }

    /// Set the open ink-ratio interval a candidate must fall in
    pub fn with_ink_ratio(mut self, min: f32, max: f32) -> Self {
        self.min_ink_ratio = min;
        self.max_ink_ratio = max;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> RecogResult<()> {
        if !(0.0..=1.0).contains(&self.min_ink_ratio)
            || !(0.0..=1.0).contains(&self.max_ink_ratio)
            || self.min_ink_ratio >= self.max_ink_ratio
        {
            return Err(RecogError::InvalidParameter(format!(
                "ink ratio interval ({}, {}) is empty or outside [0, 1]",
                self.min_ink_ratio, self.max_ink_ratio
            )));
        }
        Ok(())
    }
}

/// Find the non-empty ranges of a 1-D histogram
///
/// A range opens at the first positive value after a zero run and closes
/// once `min_gap` consecutive zeros have been seen; its end is the index
/// of the first of those zeros. A range still open at the end of the
/// array is closed there, excluding any trailing zeros. `min_gap` values
/// below 1 are treated as 1.
///
/// # Examples
///
/// ```
/// use glyphseg_recog::pageseg::find_ranges;
///
/// let ranges = find_ranges(&[0, 0, 3, 4, 0, 0, 0, 5, 2, 0], 1);
/// assert_eq!(ranges, vec![2..4, 7..9]);
/// ```
pub fn find_ranges(histogram: &[u32], min_gap: usize) -> Vec<Range<usize>> {
    let min_gap = min_gap.max(1);
    let mut ranges = Vec::new();
    let mut start: Option<usize> = None;
    let mut zeros = 0usize;

    for (i, &value) in histogram.iter().enumerate() {
        if value > 0 {
            if start.is_none() {
                start = Some(i);
            }
            zeros = 0;
        } else if let Some(s) = start {
            zeros += 1;
            if zeros >= min_gap {
                ranges.push(s..i + 1 - zeros);
                start = None;
                zeros = 0;
            }
        }
    }

    if let Some(s) = start {
        ranges.push(s..histogram.len() - zeros);
    }

    ranges
}

/// Segment a page into character candidates
///
/// The page is Otsu-binarized, split into row bands, and each band is
/// split into column bands. Candidates smaller than the minimum size or
/// with an ink ratio outside the open interval
/// `(min_ink_ratio, max_ink_ratio)` are discarded.
///
/// # Returns
///
/// Segments of the original page in reading order (rows top to bottom,
/// columns left to right).
pub fn segment_characters(
    pix: &PixelBuffer,
    options: &PageSegOptions,
) -> RecogResult<Vec<Segment>> {
    options.validate()?;
    let binary = threshold_otsu(pix)?;
    let projection = Projection::of(&binary);
    let rows = find_ranges(&projection.horizontal, options.row_gap);

    let mut segments = Vec::new();
    for row in &rows {
        let band = BoundingBox::new_unchecked(
            0,
            row.start as i32,
            binary.width() as i32,
            row.len() as i32,
        );
        let columns = find_ranges(&vertical_projection_in(&binary, &band), options.column_gap);

        for col in columns {
            let bbox = BoundingBox::new_unchecked(
                col.start as i32,
                row.start as i32,
                col.len() as i32,
                row.len() as i32,
            );
            if (bbox.w as u32) < options.min_char_width || (bbox.h as u32) < options.min_char_height
            {
                continue;
            }
            let ratio = binary.count_ink_in_rect(&bbox) as f32 / bbox.area() as f32;
            if ratio <= options.min_ink_ratio || ratio >= options.max_ink_ratio {
                continue;
            }
            segments.push(Segment::from_parent(pix, bbox)?);
        }
    }

    debug!(
        rows = rows.len(),
        segments = segments.len(),
        "page segmented"
    );
    Ok(segments)
}
