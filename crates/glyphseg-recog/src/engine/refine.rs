//! Per-candidate box refinement and feature extraction
//!
//! Each candidate owns its cropped buffer, so this stage runs
//! independently per candidate and may be fanned out across threads.

use super::{GlyphCandidate, OcrSymbol, RecognitionConfig};
use crate::features::extract_features;
use crate::score::score_region;
use crate::{RecogError, RecogResult};
use glyphseg_color::threshold_otsu;
use glyphseg_core::{BoundingBox, PixelBuffer};
use glyphseg_region::{LabelOptions, find_glyph_components};
use tracing::{debug, warn};

/// A candidate after refinement, with the features of its chosen region
#[derive(Debug)]
pub(crate) struct Refined {
    pub(crate) candidate: GlyphCandidate,
    pub(crate) features: Option<Vec<f32>>,
}

/// Refine one candidate, falling back to its unrefined box on failure
pub(crate) fn refine_candidate(
    page: &PixelBuffer,
    id: usize,
    symbol: &OcrSymbol,
    config: &RecognitionConfig,
) -> Refined {
    let candidate = GlyphCandidate::from_symbol(id, symbol, config.thresholds.fallback_score);
    match try_refine(page, candidate.clone(), config) {
        Ok(refined) => refined,
        Err(e) => {
            warn!(candidate = id, error = %e, "skipping refinement");
            Refined {
                candidate,
                features: None,
            }
        }
    }
}

fn try_refine(
    page: &PixelBuffer,
    mut candidate: GlyphCandidate,
    config: &RecognitionConfig,
) -> RecogResult<Refined> {
    let (crop, frame) = crop_region(page, candidate.id, &candidate.bbox)?;
    let binary = threshold_otsu(&crop)?;
    let thresholds = &config.thresholds;

    let region = if config.use_segmentation {
        let components = find_glyph_components(&binary, &LabelOptions::default())?;
        debug!(candidate = candidate.id, components = components.len(), "labeled crop");

        match components.len() {
            0 => None,
            1 => {
                candidate.segmentation_score = thresholds.single_component_score;
                None
            }
            _ => {
                // Largest box area; the first one wins ties.
                let mut largest = &components[0];
                for c in &components[1..] {
                    if c.bounds.area() > largest.bounds.area() {
                        largest = c;
                    }
                }
                candidate.segmentation_score = score_region(
                    &binary,
                    &largest.bounds,
                    thresholds.ink_ratio_band,
                    thresholds.aspect_band,
                );
                candidate.bbox = largest.bounds.translate(frame.x, frame.y);
                Some(largest.bounds)
            }
        }
    } else {
        None
    };

    let glyph = match region {
        Some(bounds) => binary.clip_rectangle(&bounds)?,
        None => binary,
    };
    let features = extract_features(&glyph, &config.features)?;

    Ok(Refined {
        candidate,
        features: Some(features.values),
    })
}

/// Crop `bbox` from the page, clipped to the page frame
fn crop_region(
    page: &PixelBuffer,
    id: usize,
    bbox: &BoundingBox,
) -> RecogResult<(PixelBuffer, BoundingBox)> {
    if bbox.is_empty() {
        return Err(RecogError::RenderTargetUnavailable {
            id,
            reason: format!("empty box {}x{}", bbox.w, bbox.h),
        });
    }
    page.clip_rectangle_to_frame(bbox)?
        .ok_or_else(|| RecogError::RenderTargetUnavailable {
            id,
            reason: format!(
                "box at ({}, {}) lies outside the {}x{} page",
                bbox.x,
                bbox.y,
                page.width(),
                page.height()
            ),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphseg_core::Channels;

    fn page_with(rects: &[BoundingBox]) -> PixelBuffer {
        let mut p = PixelBuffer::new_filled(60, 40, Channels::Gray, 255)
            .unwrap()
            .to_mut();
        for r in rects {
            p.fill_rect(r, 0).unwrap();
        }
        p.into()
    }

    fn symbol(bbox: BoundingBox) -> OcrSymbol {
        OcrSymbol::new(bbox, "x", 70.0)
    }

    #[test]
    fn test_single_component_keeps_box() {
        let page = page_with(&[BoundingBox::new_unchecked(12, 12, 6, 8)]);
        let bbox = BoundingBox::new_unchecked(10, 10, 10, 12);
        let r = refine_candidate(&page, 0, &symbol(bbox), &RecognitionConfig::default());
        assert_eq!(r.candidate.bbox, bbox);
        assert_eq!(r.candidate.segmentation_score, 0.8);
        assert_eq!(r.features.map(|f| f.len()), Some(213));
    }

    #[test]
    fn test_multiple_components_pick_largest() {
        let page = page_with(&[
            BoundingBox::new_unchecked(11, 11, 5, 5),
            BoundingBox::new_unchecked(20, 11, 6, 9),
        ]);
        let bbox = BoundingBox::new_unchecked(10, 10, 20, 12);
        let r = refine_candidate(&page, 0, &symbol(bbox), &RecognitionConfig::default());
        assert_eq!(r.candidate.bbox, BoundingBox::new_unchecked(20, 11, 6, 9));
        // solid block: ratio out of band, aspect in band
        assert_eq!(r.candidate.segmentation_score, 0.75);
        assert!(r.features.is_some());
    }

    #[test]
    fn test_blank_crop_scores_fallback() {
        let page = page_with(&[]);
        let bbox = BoundingBox::new_unchecked(5, 5, 10, 10);
        let r = refine_candidate(&page, 0, &symbol(bbox), &RecognitionConfig::default());
        assert_eq!(r.candidate.bbox, bbox);
        assert_eq!(r.candidate.segmentation_score, 0.5);
        assert!(r.features.is_some());
    }

    #[test]
    fn test_outside_page_is_skipped() {
        let page = page_with(&[]);
        let bbox = BoundingBox::new_unchecked(100, 100, 10, 10);
        let r = refine_candidate(&page, 3, &symbol(bbox), &RecognitionConfig::default());
        assert_eq!(r.candidate.bbox, bbox);
        assert_eq!(r.candidate.segmentation_score, 0.5);
        assert!(r.features.is_none());

        let err = crop_region(&page, 3, &bbox).unwrap_err();
        assert!(matches!(err, RecogError::RenderTargetUnavailable { id: 3, .. }));
    }

    #[test]
    fn test_segmentation_disabled() {
        let page = page_with(&[
            BoundingBox::new_unchecked(11, 11, 5, 5),
            BoundingBox::new_unchecked(20, 11, 6, 9),
        ]);
        let bbox = BoundingBox::new_unchecked(10, 10, 20, 12);
        let config = RecognitionConfig::default().with_segmentation(false);
        let r = refine_candidate(&page, 0, &symbol(bbox), &config);
        assert_eq!(r.candidate.bbox, bbox);
        assert_eq!(r.candidate.segmentation_score, 0.5);
        assert!(r.features.is_some());
    }
}
