//! glyphseg-color - Luma conversion and binarization
//!
//! This crate turns gray or RGB(A) buffers into two-level buffers:
//!
//! - **Color space conversion** ([`colorspace`]): RGB -> luma, buffer -> gray
//! - **Analysis** ([`analysis`]): 256-bin luma histogram
//! - **Thresholding** ([`threshold`]): fixed threshold and Otsu's method
//!
//! Binary output follows the core convention: [`glyphseg_core::color::INK`]
//! (0) for foreground, [`glyphseg_core::color::PAPER`] (255) for background.

pub mod analysis;
pub mod colorspace;
pub mod error;
pub mod threshold;

// Re-export core types
pub use glyphseg_core;

// Re-export error types
pub use error::{ColorError, ColorResult};

pub use analysis::grayscale_histogram;
pub use colorspace::{convert_to_gray, rgb_to_gray};
pub use threshold::{
    OTSU_FALLBACK_THRESHOLD, compute_otsu_threshold, otsu_threshold_from_histogram,
    threshold_otsu, threshold_to_binary,
};
