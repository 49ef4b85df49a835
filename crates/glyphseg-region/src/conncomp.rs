//! Connected component analysis
//!
//! Components are found with a single raster scan. Each ink pixel looks at
//! its already-visited neighbours; with no labeled neighbour it opens a new
//! provisional label, otherwise it takes the smallest neighbour label and
//! merges all neighbour labels into one equivalence class. A second scan
//! rewrites every pixel to the smallest provisional label of its class.
//!
//! Equivalence classes are kept in a disjoint-set forest with path
//! compression and union by rank; each root remembers the minimum label of
//! its class, so the final labeling is independent of the merge order.

use crate::error::{RegionError, RegionResult};
use glyphseg_core::{BoundingBox, PixelBuffer};
use tracing::debug;

/// Connectivity type for component analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectivityType {
    /// Edge neighbours only (scan looks left and up)
    FourWay,
    /// Edge and corner neighbours (scan looks left, up, up-left and
    /// up-right)
    #[default]
    EightWay,
}

impl ConnectivityType {
    /// Offsets of the neighbours already visited by a raster scan.
    fn scan_offsets(self) -> &'static [(i32, i32)] {
        match self {
            ConnectivityType::FourWay => &[(-1, 0), (0, -1)],
            ConnectivityType::EightWay => &[(-1, 0), (0, -1), (-1, -1), (1, -1)],
        }
    }
}

/// A connected component in a buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedComponent {
    /// Final label (the smallest provisional label of the component)
    pub label: u32,
    /// Number of pixels in this component
    pub pixel_count: u32,
    /// Bounding box of this component
    pub bounds: BoundingBox,
}

impl ConnectedComponent {
    /// Create a new connected component
    pub fn new(label: u32, pixel_count: u32, bounds: BoundingBox) -> Self {
        Self {
            label,
            pixel_count,
            bounds,
        }
    }
}

/// Options for glyph component extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelOptions {
    /// Neighbourhood used to join ink pixels
    pub connectivity: ConnectivityType,
    /// Components narrower than this are dropped
    pub min_width: i32,
    /// Components shorter than this are dropped
    pub min_height: i32,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            connectivity: ConnectivityType::EightWay,
            min_width: 5,
            min_height: 5,
        }
    }
}

impl LabelOptions {
    /// Set the connectivity
    pub fn with_connectivity(mut self, connectivity: ConnectivityType) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the minimum component size
    pub fn with_min_size(mut self, min_width: i32, min_height: i32) -> Self {
        self.min_width = min_width;
        self.min_height = min_height;
        self
    }

    /// Validate the options
    pub fn validate(&self) -> RegionResult<()> {
        if self.min_width < 0 || self.min_height < 0 {
            return Err(RegionError::InvalidParameters(format!(
                "minimum component size must be non-negative: {}x{}",
                self.min_width, self.min_height
            )));
        }
        Ok(())
    }
}

/// Per-pixel component labels
///
/// Label 0 is background; every ink pixel holds the final label of its
/// component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelMap {
    width: u32,
    height: u32,
    labels: Vec<u32>,
}

impl LabelMap {
    /// Get the width
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the height
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the label at (x, y), or `None` out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.labels[(y * self.width + x) as usize])
    }

    /// Get the raw row-major label array
    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Collect the components of this map, sorted by label.
    pub fn components(&self) -> Vec<ConnectedComponent> {
        // label -> (count, min_x, min_y, max_x, max_y)
        let mut extents: std::collections::BTreeMap<u32, (u32, u32, u32, u32, u32)> =
            std::collections::BTreeMap::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let label = self.labels[(y * self.width + x) as usize];
                if label == 0 {
                    continue;
                }
                let e = extents.entry(label).or_insert((0, x, y, x, y));
                e.0 += 1;
                e.1 = e.1.min(x);
                e.2 = e.2.min(y);
                e.3 = e.3.max(x);
                e.4 = e.4.max(y);
            }
        }

        extents
            .into_iter()
            .map(|(label, (count, x0, y0, x1, y1))| {
                ConnectedComponent::new(
                    label,
                    count,
                    BoundingBox::from_extent(x0 as i32, y0 as i32, x1 as i32, y1 as i32),
                )
            })
            .collect()
    }
}

/// Disjoint-set forest over provisional labels
///
/// Index 0 is a placeholder so label `l` lives at index `l`.
struct DisjointSet {
    parent: Vec<u32>,
    rank: Vec<u8>,
    min_label: Vec<u32>,
}

impl DisjointSet {
    fn new() -> Self {
        Self {
            parent: vec![0],
            rank: vec![0],
            min_label: vec![0],
        }
    }

    fn make_set(&mut self) -> u32 {
        let label = self.parent.len() as u32;
        self.parent.push(label);
        self.rank.push(0);
        self.min_label.push(label);
        label
    }

    fn find(&mut self, label: u32) -> u32 {
        let mut root = label;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }
        let mut cur = label;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return;
        }
        let (hi, lo) = if self.rank[ra as usize] >= self.rank[rb as usize] {
            (ra, rb)
        } else {
            (rb, ra)
        };
        self.parent[lo as usize] = hi;
        if self.rank[hi as usize] == self.rank[lo as usize] {
            self.rank[hi as usize] += 1;
        }
        let min = self.min_label[hi as usize].min(self.min_label[lo as usize]);
        self.min_label[hi as usize] = min;
    }

    fn resolve(&mut self, label: u32) -> u32 {
        let root = self.find(label);
        self.min_label[root as usize]
    }
}

/// Label all connected ink components in a buffer
///
/// # Arguments
///
/// * `pix` - Input buffer; ink is decided by [`PixelBuffer::is_ink`]
/// * `connectivity` - Scan neighbourhood
///
/// # Returns
///
/// A [`LabelMap`] where each ink pixel holds its component label.
pub fn label_connected_components(
    pix: &PixelBuffer,
    connectivity: ConnectivityType,
) -> RegionResult<LabelMap> {
    let width = pix.width();
    let height = pix.height();
    let mut labels = vec![0u32; width as usize * height as usize];
    let mut sets = DisjointSet::new();
    let offsets = connectivity.scan_offsets();

    for y in 0..height {
        for x in 0..width {
            if !pix.is_ink(x, y) {
                continue;
            }

            let mut current = 0u32;
            for &(dx, dy) in offsets {
                let nx = x as i64 + dx as i64;
                let ny = y as i64 + dy as i64;
                if nx < 0 || ny < 0 || nx >= width as i64 {
                    continue;
                }
                let neighbour = labels[ny as usize * width as usize + nx as usize];
                if neighbour == 0 {
                    continue;
                }
                if current == 0 {
                    current = neighbour;
                } else {
                    current = current.min(neighbour);
                }
            }

            if current == 0 {
                current = sets.make_set();
            } else {
                for &(dx, dy) in offsets {
                    let nx = x as i64 + dx as i64;
                    let ny = y as i64 + dy as i64;
                    if nx < 0 || ny < 0 || nx >= width as i64 {
                        continue;
                    }
                    let neighbour = labels[ny as usize * width as usize + nx as usize];
                    if neighbour != 0 {
                        sets.union(current, neighbour);
                    }
                }
            }
            labels[y as usize * width as usize + x as usize] = current;
        }
    }

    for label in labels.iter_mut().filter(|l| **l != 0) {
        *label = sets.resolve(*label);
    }

    Ok(LabelMap {
        width,
        height,
        labels,
    })
}

/// Find all connected components in a buffer
///
/// Returns every component, sorted by label, with no size filtering.
pub fn find_connected_components(
    pix: &PixelBuffer,
    connectivity: ConnectivityType,
) -> RegionResult<Vec<ConnectedComponent>> {
    Ok(label_connected_components(pix, connectivity)?.components())
}

/// Find the components large enough to be glyph parts
///
/// Components whose bounding box is narrower than `min_width` or shorter
/// than `min_height` are dropped. The rest are sorted by label.
pub fn find_glyph_components(
    pix: &PixelBuffer,
    options: &LabelOptions,
) -> RegionResult<Vec<ConnectedComponent>> {
    options.validate()?;
    let components = find_connected_components(pix, options.connectivity)?;
    let kept = crate::label::filter_components(&components, options.min_width, options.min_height);
    debug!(
        found = components.len(),
        kept = kept.len(),
        "glyph components"
    );
    Ok(kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphseg_core::{Channels, PixelBufferMut};

    fn page(w: u32, h: u32) -> PixelBufferMut {
        PixelBuffer::new_filled(w, h, Channels::Gray, 255)
            .unwrap()
            .to_mut()
    }

    #[test]
    fn test_single_block() {
        let mut p = page(10, 10);
        p.fill_rect(&BoundingBox::new_unchecked(2, 3, 5, 5), 0).unwrap();
        let comps = find_connected_components(&p.into(), ConnectivityType::EightWay).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].label, 1);
        assert_eq!(comps[0].pixel_count, 25);
        assert_eq!(comps[0].bounds, BoundingBox::new_unchecked(2, 3, 5, 5));
    }

    #[test]
    fn test_diagonal_touch_depends_on_connectivity() {
        let mut p = page(4, 4);
        p.set_gray(0, 0, 0).unwrap();
        p.set_gray(1, 1, 0).unwrap();
        let pix: PixelBuffer = p.into();
        assert_eq!(
            find_connected_components(&pix, ConnectivityType::FourWay)
                .unwrap()
                .len(),
            2
        );
        assert_eq!(
            find_connected_components(&pix, ConnectivityType::EightWay)
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_up_right_neighbour_merges_to_min_label() {
        // Row 0: ink at x=0 and x=2 opens labels 1 and 2.
        // Row 1: ink at x=1 sees up-left (1) and up-right (2).
        let mut p = page(3, 2);
        p.set_gray(0, 0, 0).unwrap();
        p.set_gray(2, 0, 0).unwrap();
        p.set_gray(1, 1, 0).unwrap();
        let map = label_connected_components(&p.into(), ConnectivityType::EightWay).unwrap();
        assert_eq!(map.get(0, 0), Some(1));
        assert_eq!(map.get(2, 0), Some(1));
        assert_eq!(map.get(1, 1), Some(1));
        assert_eq!(map.get(1, 0), Some(0));
    }

    #[test]
    fn test_u_shape_merges_late() {
        // Two vertical strokes joined at the bottom.
        let mut p = page(7, 6);
        p.fill_rect(&BoundingBox::new_unchecked(0, 0, 2, 6), 0).unwrap();
        p.fill_rect(&BoundingBox::new_unchecked(5, 0, 2, 6), 0).unwrap();
        p.fill_rect(&BoundingBox::new_unchecked(0, 5, 7, 1), 0).unwrap();
        let map = label_connected_components(&p.into(), ConnectivityType::FourWay).unwrap();
        let comps = map.components();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].label, 1);
        assert_eq!(comps[0].pixel_count, 2 * 6 + 2 * 6 + 3);
        assert!(map.labels().iter().all(|&l| l == 0 || l == 1));
    }

    #[test]
    fn test_glyph_components_drop_small() {
        let mut p = page(30, 30);
        p.fill_rect(&BoundingBox::new_unchecked(1, 1, 5, 5), 0).unwrap();
        p.fill_rect(&BoundingBox::new_unchecked(10, 10, 4, 9), 0).unwrap();
        p.fill_rect(&BoundingBox::new_unchecked(20, 20, 2, 2), 0).unwrap();
        let comps = find_glyph_components(&p.into(), &LabelOptions::default()).unwrap();
        assert_eq!(comps.len(), 1);
        assert_eq!(comps[0].bounds, BoundingBox::new_unchecked(1, 1, 5, 5));
    }

    #[test]
    fn test_label_options_validate() {
        assert!(LabelOptions::default().with_min_size(-1, 2).validate().is_err());
        assert!(LabelOptions::default().with_min_size(0, 0).validate().is_ok());
    }
}
