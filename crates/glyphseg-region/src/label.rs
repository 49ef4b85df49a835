//! Component statistics and filtering
//!
//! Higher-level helpers on top of [`crate::conncomp`].

use crate::conncomp::{ConnectedComponent, LabelMap};
use glyphseg_core::BoundingBox;

/// Statistics of one labeled component
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStats {
    /// Component label
    pub label: u32,
    /// Number of pixels
    pub pixel_count: u32,
    /// Bounding box
    pub bounds: BoundingBox,
    /// Mean x of the component's pixels
    pub centroid_x: f32,
    /// Mean y of the component's pixels
    pub centroid_y: f32,
}

impl ComponentStats {
    /// Fraction of the bounding box covered by the component
    pub fn fill_ratio(&self) -> f32 {
        let area = self.bounds.area();
        if area <= 0 {
            0.0
        } else {
            self.pixel_count as f32 / area as f32
        }
    }
}

/// Compute per-component statistics of a label map
///
/// Results are sorted by label.
pub fn component_stats(map: &LabelMap) -> Vec<ComponentStats> {
    let components = map.components();
    let mut sums: Vec<(u64, u64)> = vec![(0, 0); components.len()];

    for y in 0..map.height() {
        for x in 0..map.width() {
            let label = map.labels()[(y * map.width() + x) as usize];
            if label == 0 {
                continue;
            }
            if let Ok(i) = components.binary_search_by_key(&label, |c| c.label) {
                sums[i].0 += x as u64;
                sums[i].1 += y as u64;
            }
        }
    }

    components
        .into_iter()
        .zip(sums)
        .map(|(c, (sx, sy))| {
            let n = c.pixel_count.max(1) as f32;
            ComponentStats {
                label: c.label,
                pixel_count: c.pixel_count,
                bounds: c.bounds,
                centroid_x: sx as f32 / n,
                centroid_y: sy as f32 / n,
            }
        })
        .collect()
}

/// Keep only components at least `min_width` wide and `min_height` tall
pub fn filter_components(
    components: &[ConnectedComponent],
    min_width: i32,
    min_height: i32,
) -> Vec<ConnectedComponent> {
    components
        .iter()
        .filter(|c| c.bounds.w >= min_width && c.bounds.h >= min_height)
        .cloned()
        .collect()
}

/// Count the components of a label map
pub fn count_components(map: &LabelMap) -> usize {
    map.components().len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conncomp::{ConnectivityType, label_connected_components};
    use glyphseg_core::{Channels, PixelBuffer};

    fn two_blocks() -> LabelMap {
        let mut p = PixelBuffer::new_filled(20, 12, Channels::Gray, 255)
            .unwrap()
            .to_mut();
        p.fill_rect(&BoundingBox::new_unchecked(0, 0, 3, 3), 0).unwrap();
        p.fill_rect(&BoundingBox::new_unchecked(10, 4, 6, 8), 0).unwrap();
        label_connected_components(&p.into(), ConnectivityType::FourWay).unwrap()
    }

    #[test]
    fn test_component_stats() {
        let stats = component_stats(&two_blocks());
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].pixel_count, 9);
        assert!((stats[0].centroid_x - 1.0).abs() < 1e-6);
        assert!((stats[0].centroid_y - 1.0).abs() < 1e-6);
        assert!((stats[1].centroid_x - 12.5).abs() < 1e-6);
        assert!((stats[1].centroid_y - 7.5).abs() < 1e-6);
        assert_eq!(stats[1].fill_ratio(), 1.0);
    }

    #[test]
    fn test_filter_components() {
        let map = two_blocks();
        assert_eq!(count_components(&map), 2);
        let kept = filter_components(&map.components(), 5, 5);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].bounds, BoundingBox::new_unchecked(10, 4, 6, 8));
    }
}
