//! Binarization regression test
//!
//! Fixed threshold and Otsu's method on synthetic gray and RGBA pages.

use glyphseg_color::{
    compute_otsu_threshold, convert_to_gray, grayscale_histogram, threshold_otsu,
    threshold_to_binary,
};
use glyphseg_core::{BoundingBox, Channels, PixelBuffer};
use glyphseg_test::{RegParams, synthetic};

/// Two-peak page: dark block around luma 50, background around luma 200,
/// each peak spread over +-5 levels.
fn bimodal_page() -> PixelBuffer {
    let (w, h) = (60u32, 40u32);
    let dark = BoundingBox::new_unchecked(10, 10, 25, 15);
    let mut samples = Vec::with_capacity((w * h) as usize);
    for y in 0..h as i32 {
        for x in 0..w as i32 {
            let jitter = ((x * 7 + y * 3) % 11) as u8;
            let base = if dark.contains_point(x, y) { 45 } else { 195 };
            samples.push(base + jitter);
        }
    }
    PixelBuffer::from_samples(w, h, Channels::Gray, samples).unwrap()
}

#[test]
fn binarize_reg() {
    let mut rp = RegParams::new("binarize");

    // --- Test 1: Otsu lands between the two peaks ---
    eprintln!("=== Otsu on bimodal page ===");
    let page = bimodal_page();
    let t = compute_otsu_threshold(&page).expect("otsu");
    eprintln!("  otsu threshold: {}", t);
    rp.compare_values(1.0, if t > 55 && t <= 195 { 1.0 } else { 0.0 }, 0.0);

    let bin = threshold_otsu(&page).expect("threshold_otsu");
    rp.compare_values(1.0, if bin.is_binary() { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values((25 * 15) as f64, bin.count_ink() as f64, 0.0);
    rp.compare_values(
        1.0,
        if bin.ink_bounds() == Some(BoundingBox::new_unchecked(10, 10, 25, 15)) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    // --- Test 2: Histogram covers the whole population ---
    let hist = grayscale_histogram(&page).expect("histogram");
    rp.compare_values(
        page.pixel_count() as f64,
        hist.iter().map(|&c| c as f64).sum(),
        0.0,
    );

    // --- Test 3: Fixed thresholds on a clean glyph page ---
    eprintln!("=== Fixed threshold ===");
    let glyph = synthetic::glyph_page('B', 3, 5).expect("glyph page");
    let ink = glyph.count_ink();
    for threshold in [1u8, 128, 255] {
        let bin = threshold_to_binary(&glyph, threshold).expect("threshold");
        rp.compare_values(ink as f64, bin.count_ink() as f64, 0.0);
        rp.compare_buffers(&glyph, &bin);
    }

    // --- Test 4: RGBA input binarizes like its gray conversion ---
    eprintln!("=== RGBA input ===");
    let rgba_samples = page
        .samples()
        .iter()
        .flat_map(|&v| [v, v, v, 255])
        .collect();
    let rgba = PixelBuffer::from_samples(page.width(), page.height(), Channels::Rgba, rgba_samples)
        .expect("rgba page");
    let gray = convert_to_gray(&rgba).expect("gray");
    rp.compare_buffers(&page, &gray);
    rp.compare_values(
        t as f64,
        compute_otsu_threshold(&rgba).expect("otsu rgba") as f64,
        0.0,
    );
    let rgba_bin = threshold_otsu(&rgba).expect("threshold_otsu rgba");
    rp.compare_buffers(&bin, &rgba_bin);

    // --- Test 5: Uniform page falls back to 128 ---
    let flat = PixelBuffer::new_filled(8, 8, Channels::Gray, 90).expect("flat");
    rp.compare_values(
        128.0,
        compute_otsu_threshold(&flat).expect("otsu flat") as f64,
        0.0,
    );

    assert!(rp.cleanup(), "binarize regression test failed");
}
