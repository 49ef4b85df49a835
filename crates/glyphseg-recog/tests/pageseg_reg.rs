//! Page segmentation regression test
//!
//! Row-then-column projection segmentation of synthetic text pages. The
//! boxes found must equal the boxes the letters were drawn into.

use glyphseg_core::{BoundingBox, PixelBuffer};
use glyphseg_recog::pageseg::{PageSegOptions, find_ranges, segment_characters};
use glyphseg_test::{RegParams, synthetic};

// ============================================================================
// Range extraction
// ============================================================================

#[test]
fn pageseg_reg_ranges() {
    let mut rp = RegParams::new("pageseg_ranges");

    let ranges = find_ranges(&[0, 0, 3, 4, 0, 0, 0, 5, 2, 0], 1);
    rp.compare_values(2.0, ranges.len() as f64, 0.0);
    rp.compare_values(1.0, (ranges == vec![2..4, 7..9]) as u8 as f64, 0.0);

    // A gap shorter than min_gap does not split a range
    let ranges = find_ranges(&[2, 0, 0, 2, 0, 0, 0, 1], 3);
    rp.compare_values(1.0, (ranges == vec![0..4, 7..8]) as u8 as f64, 0.0);

    // Empty and all-zero histograms
    rp.compare_values(0.0, find_ranges(&[], 1).len() as f64, 0.0);
    rp.compare_values(0.0, find_ranges(&[0, 0, 0], 1).len() as f64, 0.0);

    // A range running to the end is closed
    let ranges = find_ranges(&[0, 1, 1, 1], 1);
    rp.compare_values(1.0, (ranges == vec![1..4]) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "pageseg_ranges regression test failed");
}

// ============================================================================
// Character segmentation
// ============================================================================

#[test]
fn pageseg_reg_text_page() {
    let mut rp = RegParams::new("pageseg_text");

    let (page, boxes) = synthetic::text_page(&["ABI", "LO"], 3, 6, 9, 6).unwrap();
    let segments = segment_characters(&page, &PageSegOptions::default()).unwrap();

    rp.compare_values(boxes.len() as f64, segments.len() as f64, 0.0);
    for (segment, expected) in segments.iter().zip(&boxes) {
        rp.compare_values(1.0, (segment.bbox() == *expected) as u8 as f64, 0.0);
        let crop = page.clip_rectangle(expected).unwrap();
        rp.compare_buffers(&crop, segment.pixels());
    }

    if rp.display() {
        for s in &segments {
            eprintln!("  segment {:?}", s.bbox());
        }
    }

    assert!(rp.cleanup(), "pageseg_text regression test failed");
}

#[test]
fn pageseg_reg_filters() {
    let mut rp = RegParams::new("pageseg_filters");

    // A 15x21 glyph, a 1x2 speck and a solid block on one text line
    let mut page = synthetic::blank_page(100, 40).unwrap().to_mut();
    synthetic::draw_glyph(&mut page, 'O', 5, 5, 3).unwrap();
    page.fill_rect(&BoundingBox::new_unchecked(40, 10, 1, 2), 0).unwrap();
    page.fill_rect(&BoundingBox::new_unchecked(60, 5, 12, 21), 0).unwrap();
    let page: PixelBuffer = page.into();

    // The speck is too narrow and the block too dense
    let segments = segment_characters(&page, &PageSegOptions::default()).unwrap();
    rp.compare_values(1.0, segments.len() as f64, 0.0);
    rp.compare_values(
        1.0,
        (segments[0].bbox() == BoundingBox::new_unchecked(5, 5, 15, 21)) as u8 as f64,
        0.0,
    );

    // Without a size limit the speck passes: 2 ink pixels in a 1x21 box
    let loose = PageSegOptions::default().with_min_char_size(1, 1);
    let segments = segment_characters(&page, &loose).unwrap();
    rp.compare_values(2.0, segments.len() as f64, 0.0);
    rp.compare_values(
        1.0,
        (segments[1].bbox() == BoundingBox::new_unchecked(40, 5, 1, 21)) as u8 as f64,
        0.0,
    );

    // Invalid options are rejected
    let bad = PageSegOptions::default().with_ink_ratio(0.9, 0.1);
    rp.compare_values(1.0, segment_characters(&page, &bad).is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "pageseg_filters regression test failed");
}
