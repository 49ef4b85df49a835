//! Correction passes and the final confidence blend
//!
//! Both passes work on the full candidate list after clustering and
//! classification have finished.

use super::{CorrectionThresholds, GlyphCandidate};
use crate::classify::Tally;
use std::collections::BTreeMap;
use tracing::debug;

/// Relabel low-confidence members of clusters with a strict majority
///
/// Returns the number of candidates whose character changed.
pub(crate) fn cluster_majority(
    candidates: &mut [GlyphCandidate],
    thresholds: &CorrectionThresholds,
) -> usize {
    let mut clusters: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (i, c) in candidates.iter().enumerate() {
        if let Some(cluster) = c.cluster_id {
            clusters.entry(cluster).or_default().push(i);
        }
    }

    let mut corrections = 0;
    for (cluster, members) in &clusters {
        let majority = {
            let mut tally = Tally::default();
            for &i in members {
                tally.add(candidates[i].recognized_char.as_str(), 1.0);
            }
            match tally.winner() {
                Some((label, count)) if count as usize * 2 > members.len() => label.to_string(),
                _ => continue,
            }
        };

        for &i in members {
            let c = &mut candidates[i];
            if c.ocr_confidence < thresholds.cluster_low_confidence {
                if c.recognized_char != majority {
                    debug!(
                        candidate = c.id,
                        cluster,
                        from = %c.recognized_char,
                        to = %majority,
                        "cluster correction"
                    );
                    c.recognized_char = majority.clone();
                    corrections += 1;
                }
                c.ml_confidence = c.ml_confidence.max(thresholds.cluster_confidence_bump);
            }
        }
    }
    corrections
}

/// Candidate indices in reading order
///
/// Candidates are sorted by top edge, grouped into rows whose top edges
/// lie within `row_tolerance` of the row's first box, and each row is
/// sorted left to right.
pub(crate) fn reading_order(candidates: &[GlyphCandidate], row_tolerance: i32) -> Vec<usize> {
    let mut order: Vec<usize> = (0..candidates.len()).collect();
    order.sort_by_key(|&i| (candidates[i].bbox.y, candidates[i].bbox.x));

    let mut result = Vec::with_capacity(order.len());
    let mut start = 0;
    while start < order.len() {
        let anchor = candidates[order[start]].bbox.y;
        let mut end = start + 1;
        while end < order.len() && candidates[order[end]].bbox.y - anchor < row_tolerance {
            end += 1;
        }
        let row = &mut order[start..end];
        row.sort_by_key(|&i| candidates[i].bbox.x);
        result.extend_from_slice(row);
        start = end;
    }
    result
}

/// Penalize the second of two adjacent identical low-confidence characters
///
/// Returns the number of penalized candidates.
pub(crate) fn context(
    candidates: &mut [GlyphCandidate],
    thresholds: &CorrectionThresholds,
) -> usize {
    let order = reading_order(candidates, thresholds.row_tolerance);
    let mut penalties = 0;
    for pair in order.windows(2) {
        let (prev, cur) = (&candidates[pair[0]], &candidates[pair[1]]);
        if prev.recognized_char == cur.recognized_char
            && prev.ocr_confidence < thresholds.context_low_confidence
            && cur.ocr_confidence < thresholds.context_low_confidence
        {
            let c = &mut candidates[pair[1]];
            c.ocr_confidence = (c.ocr_confidence - thresholds.context_penalty).max(0.0);
            debug!(candidate = c.id, confidence = c.ocr_confidence, "context penalty");
            penalties += 1;
        }
    }
    penalties
}

/// Blend OCR, segmentation and ML confidence into a 0..100 score
pub(crate) fn blend(candidate: &GlyphCandidate, thresholds: &CorrectionThresholds) -> u8 {
    let value = candidate.ocr_confidence * thresholds.ocr_weight
        + candidate.segmentation_score * 100.0 * thresholds.segmentation_weight
        + candidate.ml_confidence * 100.0 * thresholds.ml_weight;
    value.round().clamp(0.0, 100.0) as u8
}
