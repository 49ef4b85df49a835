//! glyphseg-region - Connected component labeling
//!
//! This crate provides:
//!
//! - **Connected component analysis** ([`conncomp`]) - single-scan labeling
//!   with disjoint-set equivalence merging
//! - **Component statistics** ([`label`]) - per-label pixel counts,
//!   centroids and bounding boxes, plus size filtering
//!
//! # Examples
//!
//! ```
//! use glyphseg_region::{ConnectivityType, find_connected_components};
//! use glyphseg_core::{BoundingBox, Channels, PixelBuffer};
//!
//! let mut page = PixelBuffer::new_filled(20, 20, Channels::Gray, 255)
//!     .unwrap()
//!     .to_mut();
//! page.fill_rect(&BoundingBox::new_unchecked(2, 2, 5, 5), 0).unwrap();
//! page.fill_rect(&BoundingBox::new_unchecked(12, 12, 5, 5), 0).unwrap();
//! let page: PixelBuffer = page.into();
//!
//! let components = find_connected_components(&page, ConnectivityType::EightWay).unwrap();
//! assert_eq!(components.len(), 2);
//! ```

pub mod conncomp;
pub mod error;
pub mod label;

// Re-export core types
pub use glyphseg_core;

// Re-export error types
pub use error::{RegionError, RegionResult};

pub use conncomp::{
    ConnectedComponent, ConnectivityType, LabelMap, LabelOptions, find_connected_components,
    find_glyph_components, label_connected_components,
};
pub use label::{ComponentStats, component_stats, count_components, filter_components};
