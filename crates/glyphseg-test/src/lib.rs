//! glyphseg-test - Regression test framework for the glyph engine
//!
//! This crate provides a small regression harness modelled on the classic
//! `regutils` workflow, plus deterministic fixture builders:
//!
//! - [`RegParams`] - indexed comparisons with a pass/fail summary
//! - [`synthetic`] - blank pages, filled rectangles, block-letter glyphs,
//!   text lines and seeded random vectors
//!
//! # Usage
//!
//! ```ignore
//! use glyphseg_test::RegParams;
//!
//! let mut rp = RegParams::new("conncomp");
//! rp.compare_values(1.0, count as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" (default) or "display"

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
