//! Projection profile regression test
//!
//! Row and column ink histograms must both sum to the ink count.

use glyphseg_core::profile::vertical_projection_in;
use glyphseg_core::{BoundingBox, Channels, PixelBuffer, Projection, Segment};
use glyphseg_test::{RegParams, synthetic};

#[test]
fn projection_reg() {
    let mut rp = RegParams::new("projection");

    // --- Test 1: sums agree on text pages ---
    let (page, boxes) = synthetic::text_page(&["ABIL", "OLA B"], 2, 3, 5, 4).expect("text page");
    let proj = Projection::of(&page);
    let ink = page.count_ink();
    eprintln!("  page {}x{} ink={}", page.width(), page.height(), ink);
    rp.compare_values(page.height() as f64, proj.horizontal.len() as f64, 0.0);
    rp.compare_values(page.width() as f64, proj.vertical.len() as f64, 0.0);
    rp.compare_values(ink as f64, proj.horizontal.iter().sum::<u32>() as f64, 0.0);
    rp.compare_values(ink as f64, proj.vertical.iter().sum::<u32>() as f64, 0.0);
    rp.compare_values(ink as f64, proj.total() as f64, 0.0);

    // --- Test 2: sums agree on random binary buffers ---
    for seed in 0..5u64 {
        let noise = synthetic::random_vectors(1, 31 * 17, seed);
        let samples = noise[0]
            .iter()
            .map(|&v| if v < 0.3 { 0 } else { 255 })
            .collect();
        let buf = PixelBuffer::from_samples(31, 17, Channels::Gray, samples).expect("noise");
        let proj = Projection::of(&buf);
        let ink = buf.count_ink() as f64;
        rp.compare_values(ink, proj.horizontal.iter().sum::<u32>() as f64, 0.0);
        rp.compare_values(ink, proj.vertical.iter().sum::<u32>() as f64, 0.0);
    }

    // --- Test 3: per-glyph segments and banded projections ---
    let first = boxes[0];
    let seg = Segment::from_parent(&page, first).expect("segment");
    rp.compare_values(
        seg.pixels().count_ink() as f64,
        page.count_ink_in_rect(&first) as f64,
        0.0,
    );
    let band = BoundingBox::new_unchecked(0, first.y, page.width() as i32, first.h);
    let banded = vertical_projection_in(&page, &band);
    let row_ink: u32 = proj.horizontal[first.y as usize..first.bottom() as usize]
        .iter()
        .sum();
    rp.compare_values(row_ink as f64, banded.iter().sum::<u32>() as f64, 0.0);

    assert!(rp.cleanup(), "projection regression test failed");
}
