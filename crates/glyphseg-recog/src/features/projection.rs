//! Normalized projection features

use glyphseg_core::{PixelBuffer, Projection};

fn normalize(counts: &[u32]) -> impl Iterator<Item = f32> + '_ {
    let max = counts.iter().copied().max().unwrap_or(0);
    counts.iter().map(move |&c| {
        if max > 0 {
            c as f32 / max as f32
        } else {
            c as f32
        }
    })
}

/// Row ink counts followed by column ink counts, each scaled by its max
///
/// Returns `height + width` values in `[0, 1]`. A projection without ink
/// stays all zero.
pub fn projection_features(pix: &PixelBuffer) -> Vec<f32> {
    let projection = Projection::of(pix);
    normalize(&projection.horizontal)
        .chain(normalize(&projection.vertical))
        .collect()
}
