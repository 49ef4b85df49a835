//! Records exchanged with the caller of the engine

use glyphseg_core::BoundingBox;
use serde::{Deserialize, Serialize};

/// One symbol guess from an external OCR recognizer
#[derive(Debug, Clone, PartialEq)]
pub struct OcrSymbol {
    /// Box in page coordinates
    pub bbox: BoundingBox,
    /// Recognized text
    pub text: String,
    /// Recognizer confidence, 0..100
    pub confidence: f32,
}

impl OcrSymbol {
    /// Create a symbol
    pub fn new(bbox: BoundingBox, text: impl Into<String>, confidence: f32) -> Self {
        Self {
            bbox,
            text: text.into(),
            confidence,
        }
    }
}

/// An OCR guess enriched by segmentation, clustering and classification
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphCandidate {
    /// Position of the candidate in the input list
    pub id: usize,
    /// Refined box in page coordinates
    pub bbox: BoundingBox,
    /// Current character value
    pub recognized_char: String,
    /// OCR confidence, 0..100
    pub ocr_confidence: f32,
    /// Segmentation quality, 0..1
    pub segmentation_score: f32,
    /// Classifier confidence, 0..1
    pub ml_confidence: f32,
    /// k-means cluster, if the candidate was clustered
    pub cluster_id: Option<usize>,
    /// Label proposed by a classifier, if any
    pub ml_label: Option<String>,
    /// Blended confidence, 0..100
    pub final_confidence: u8,
}

impl GlyphCandidate {
    /// Create an unrefined candidate from an OCR symbol
    pub fn from_symbol(id: usize, symbol: &OcrSymbol, fallback_score: f32) -> Self {
        Self {
            id,
            bbox: symbol.bbox,
            recognized_char: symbol.text.clone(),
            ocr_confidence: symbol.confidence,
            segmentation_score: fallback_score,
            ml_confidence: symbol.confidence / 100.0,
            cluster_id: None,
            ml_label: None,
            final_confidence: 0,
        }
    }
}

/// Aggregate counts of one recognition run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognitionStats {
    /// Number of candidates
    pub total: usize,
    /// Number of distinct character values after correction
    pub unique_labels: usize,
    /// Number of distinct clusters assigned
    pub clusters: usize,
    /// Candidates relabeled by cluster-majority correction
    pub cluster_corrections: usize,
    /// Candidates penalized by context correction
    pub context_penalties: usize,
}

/// Output of [`crate::GlyphEngine::recognize`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecognitionResult {
    /// Candidates in input order
    pub candidates: Vec<GlyphCandidate>,
    /// Aggregate counts
    pub stats: RecognitionStats,
}

/// A labeled feature vector curated by the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    /// Feature values
    pub features: Vec<f32>,
    /// Character label
    pub label: String,
}

impl TrainingSample {
    /// Create a sample
    pub fn new(features: Vec<f32>, label: impl Into<String>) -> Self {
        Self {
            features,
            label: label.into(),
        }
    }
}
