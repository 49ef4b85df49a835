//! Segmentation quality score
//!
//! `score = (ratio_score + aspect_score) / 2`, where each part is 1 when
//! the measurement lies inside its band and 0.5 otherwise. Bands are
//! inclusive `(min, max)` pairs.

use glyphseg_core::{BoundingBox, PixelBuffer};

/// Ink-ratio band of a well-formed glyph
pub const DEFAULT_INK_RATIO_BAND: (f32, f32) = (0.10, 0.40);

/// Width/height band of a well-formed glyph
pub const DEFAULT_ASPECT_BAND: (f32, f32) = (0.3, 3.0);

/// Score assigned to a measurement outside its band
const OUT_OF_BAND_SCORE: f32 = 0.5;

fn band_score(value: f32, (min, max): (f32, f32)) -> f32 {
    if (min..=max).contains(&value) {
        1.0
    } else {
        OUT_OF_BAND_SCORE
    }
}

/// Score a segment from its ink ratio and its width/height ratio
pub fn segmentation_score(
    ink_ratio: f32,
    aspect_ratio: f32,
    ink_ratio_band: (f32, f32),
    aspect_band: (f32, f32),
) -> f32 {
    let ratio_score = band_score(ink_ratio, ink_ratio_band);
    let aspect_score = band_score(aspect_ratio, aspect_band);
    (ratio_score + aspect_score) / 2.0
}

/// Score the region `bbox` of a binary buffer
///
/// The ink ratio is measured inside `bbox`; an empty box scores as if it
/// held no ink.
pub fn score_region(
    binary: &PixelBuffer,
    bbox: &BoundingBox,
    ink_ratio_band: (f32, f32),
    aspect_band: (f32, f32),
) -> f32 {
    let area = bbox.area();
    let ink_ratio = if area > 0 {
        binary.count_ink_in_rect(bbox) as f32 / area as f32
    } else {
        0.0
    };
    segmentation_score(ink_ratio, bbox.aspect_ratio(), ink_ratio_band, aspect_band)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphseg_core::Channels;

    fn score(ink_ratio: f32, aspect_ratio: f32) -> f32 {
        segmentation_score(ink_ratio, aspect_ratio, DEFAULT_INK_RATIO_BAND, DEFAULT_ASPECT_BAND)
    }

    #[test]
    fn test_segmentation_score_bands() {
        assert_eq!(score(0.25, 1.0), 1.0);
        assert_eq!(score(0.10, 3.0), 1.0);
        assert_eq!(score(0.05, 1.0), 0.75);
        assert_eq!(score(0.25, 3.5), 0.75);
        assert_eq!(score(0.9, 0.1), 0.5);
    }

    #[test]
    fn test_segmentation_score_custom_bands() {
        assert_eq!(segmentation_score(0.05, 5.0, (0.0, 0.1), (4.0, 6.0)), 1.0);
        assert_eq!(segmentation_score(0.25, 1.0, (0.0, 0.1), (4.0, 6.0)), 0.5);
    }

    #[test]
    fn test_score_region() {
        let mut p = PixelBuffer::new_filled(10, 10, Channels::Gray, 255)
            .unwrap()
            .to_mut();
        p.fill_rect(&BoundingBox::new_unchecked(0, 0, 10, 2), 0).unwrap();
        let p: PixelBuffer = p.into();
        let bands = (DEFAULT_INK_RATIO_BAND, DEFAULT_ASPECT_BAND);
        // 20 of 100 pixels, square box
        let square = BoundingBox::new_unchecked(0, 0, 10, 10);
        assert_eq!(score_region(&p, &square, bands.0, bands.1), 1.0);
        // solid strip, wide box
        let strip = BoundingBox::new_unchecked(0, 0, 10, 2);
        assert_eq!(score_region(&p, &strip, bands.0, bands.1), 0.5);
    }
}
