//! Connected component regression test
//!
//! Checks the labeler against a breadth-first flood fill on random
//! buffers: both must partition the ink pixels into exactly the same sets.

use std::collections::{HashMap, VecDeque};

use glyphseg_color::threshold_otsu;
use glyphseg_core::{BoundingBox, Channels, PixelBuffer};
use glyphseg_region::{
    ConnectivityType, LabelOptions, find_connected_components, find_glyph_components,
    label_connected_components,
};
use glyphseg_test::{RegParams, synthetic};

/// Reference labeling by breadth-first flood fill.
fn flood_fill_labels(pix: &PixelBuffer, connectivity: ConnectivityType) -> Vec<u32> {
    let (w, h) = (pix.width() as i32, pix.height() as i32);
    let neighbours: &[(i32, i32)] = match connectivity {
        ConnectivityType::FourWay => &[(-1, 0), (1, 0), (0, -1), (0, 1)],
        ConnectivityType::EightWay => &[
            (-1, 0),
            (1, 0),
            (0, -1),
            (0, 1),
            (-1, -1),
            (1, -1),
            (-1, 1),
            (1, 1),
        ],
    };
    let mut labels = vec![0u32; (w * h) as usize];
    let mut next = 0u32;
    for y in 0..h {
        for x in 0..w {
            if labels[(y * w + x) as usize] != 0 || !pix.is_ink(x as u32, y as u32) {
                continue;
            }
            next += 1;
            labels[(y * w + x) as usize] = next;
            let mut queue = VecDeque::from([(x, y)]);
            while let Some((cx, cy)) = queue.pop_front() {
                for &(dx, dy) in neighbours {
                    let (nx, ny) = (cx + dx, cy + dy);
                    if nx < 0 || ny < 0 || nx >= w || ny >= h {
                        continue;
                    }
                    let i = (ny * w + nx) as usize;
                    if labels[i] == 0 && pix.is_ink(nx as u32, ny as u32) {
                        labels[i] = next;
                        queue.push_back((nx, ny));
                    }
                }
            }
        }
    }
    labels
}

/// True when two labelings induce the same partition of the ink pixels.
fn same_partition(a: &[u32], b: &[u32]) -> bool {
    let mut forward: HashMap<u32, u32> = HashMap::new();
    let mut backward: HashMap<u32, u32> = HashMap::new();
    for (&la, &lb) in a.iter().zip(b) {
        if (la == 0) != (lb == 0) {
            return false;
        }
        if la == 0 {
            continue;
        }
        if *forward.entry(la).or_insert(lb) != lb || *backward.entry(lb).or_insert(la) != la {
            return false;
        }
    }
    true
}

fn random_binary(w: u32, h: u32, density: f32, seed: u64) -> PixelBuffer {
    let noise = synthetic::random_vectors(1, (w * h) as usize, seed);
    let samples = noise[0]
        .iter()
        .map(|&v| if v < density { 0 } else { 255 })
        .collect();
    PixelBuffer::from_samples(w, h, Channels::Gray, samples).unwrap()
}

#[test]
fn conncomp_reg() {
    let mut rp = RegParams::new("conncomp");

    // --- Test 1: a single 5x5 block is one component with the block's box ---
    let block = BoundingBox::new_unchecked(7, 4, 5, 5);
    let page = synthetic::page_with_rects(20, 15, &[block]).expect("page");
    for connectivity in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
        let comps = find_glyph_components(
            &page,
            &LabelOptions::default().with_connectivity(connectivity),
        )
        .expect("components");
        rp.compare_values(1.0, comps.len() as f64, 0.0);
        rp.compare_values(1.0, if comps[0].bounds == block { 1.0 } else { 0.0 }, 0.0);
        rp.compare_values(25.0, comps[0].pixel_count as f64, 0.0);
    }

    // --- Test 2: partition matches a flood fill on random buffers ---
    eprintln!("=== Partition equivalence ===");
    for seed in 0..6u64 {
        let density = 0.3 + 0.05 * seed as f32;
        let pix = random_binary(48, 32, density, seed);
        for connectivity in [ConnectivityType::FourWay, ConnectivityType::EightWay] {
            let map = label_connected_components(&pix, connectivity).expect("label");
            let reference = flood_fill_labels(&pix, connectivity);
            let n_ref = reference.iter().copied().max().unwrap_or(0);
            let n = map.components().len();
            eprintln!(
                "  seed {} {:?}: {} components (reference {})",
                seed, connectivity, n, n_ref
            );
            rp.compare_values(n_ref as f64, n as f64, 0.0);
            rp.compare_values(
                1.0,
                if same_partition(map.labels(), &reference) {
                    1.0
                } else {
                    0.0
                },
                0.0,
            );
        }
    }

    // --- Test 3: final labels are the smallest label of each component ---
    let pix = random_binary(40, 40, 0.45, 99);
    let map = label_connected_components(&pix, ConnectivityType::EightWay).expect("label");
    let comps = map.components();
    let sorted = comps.windows(2).all(|w| w[0].label < w[1].label);
    rp.compare_values(1.0, if sorted { 1.0 } else { 0.0 }, 0.0);
    rp.compare_values(1.0, comps.first().map_or(0, |c| c.label) as f64, 0.0);

    // --- Test 4: block letters after Otsu binarization ---
    eprintln!("=== Block letters ===");
    let (text, boxes) = synthetic::text_page(&["ABILO", "OLIBA"], 3, 4, 6, 5).expect("text");
    let binary = threshold_otsu(&text).expect("otsu");
    let comps = find_glyph_components(&binary, &LabelOptions::default()).expect("components");
    rp.compare_values(boxes.len() as f64, comps.len() as f64, 0.0);
    let mut found: Vec<BoundingBox> = comps.iter().map(|c| c.bounds).collect();
    let mut expected = boxes.clone();
    found.sort_by_key(|b| (b.y, b.x));
    expected.sort_by_key(|b| (b.y, b.x));
    rp.compare_values(1.0, if found == expected { 1.0 } else { 0.0 }, 0.0);

    let all = find_connected_components(&binary, ConnectivityType::FourWay).expect("4-cc");
    rp.compare_values(boxes.len() as f64, all.len() as f64, 0.0);

    assert!(rp.cleanup(), "conncomp regression test failed");
}
