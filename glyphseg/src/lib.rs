//! glyphseg - Post-OCR glyph segmentation and confidence refinement
//!
//! Given the symbol guesses of an external OCR recognizer and the page
//! they were read from, glyphseg refines every box to the actual glyph,
//! groups visually similar glyphs, and uses small classical classifiers
//! to raise or correct confidence.
//!
//! # Overview
//!
//! - Pixel buffers, boxes and projections (this crate's root)
//! - Binarization with fixed and Otsu thresholds ([`color`])
//! - Connected-component labeling ([`region`])
//! - Page segmentation, features, k-means, k-NN, decision tree and the
//!   recognition engine ([`recog`])
//!
//! # Example
//!
//! ```
//! use glyphseg::recog::{GlyphEngine, OcrSymbol, RecognitionConfig};
//! use glyphseg::{BoundingBox, Channels, PixelBuffer};
//!
//! let mut page = PixelBuffer::new_filled(60, 40, Channels::Gray, 255)
//!     .unwrap()
//!     .to_mut();
//! page.fill_rect(&BoundingBox::new_unchecked(10, 10, 8, 14), 0).unwrap();
//! let page: PixelBuffer = page.into();
//!
//! let symbols = vec![OcrSymbol::new(BoundingBox::new_unchecked(8, 8, 12, 18), "I", 64.0)];
//! let mut engine = GlyphEngine::new(RecognitionConfig::default().with_seed(1)).unwrap();
//! let result = engine.recognize(&page, &symbols).unwrap();
//! assert_eq!(result.stats.total, 1);
//! assert_eq!(result.candidates[0].recognized_char, "I");
//! ```

// Re-export core types (primary data structures used everywhere)
pub use glyphseg_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use glyphseg_color as color;
pub use glyphseg_recog as recog;
pub use glyphseg_region as region;
