//! Contour statistics
//!
//! Five ratios describing the ink shape, in this order:
//!
//! 0. boundary density - ink pixels with a background 4-neighbour, over
//!    the bitmap area (pixels outside the bitmap count as background)
//! 1. aspect ratio of the ink bounding box
//! 2. ink ratio - ink pixels over the bitmap area
//! 3. ink bounding box width over bitmap width
//! 4. ink bounding box height over bitmap height

use glyphseg_core::PixelBuffer;

/// Number of contour statistics
pub const CONTOUR_FEATURE_COUNT: usize = 5;

fn is_boundary(pix: &PixelBuffer, x: u32, y: u32) -> bool {
    let neighbours = [
        (x.checked_sub(1), Some(y)),
        (x.checked_add(1), Some(y)),
        (Some(x), y.checked_sub(1)),
        (Some(x), y.checked_add(1)),
    ];
    neighbours.iter().any(|&(nx, ny)| match (nx, ny) {
        (Some(nx), Some(ny)) => !pix.is_ink(nx, ny),
        _ => true,
    })
}

/// Compute the five contour statistics of a bitmap
///
/// A bitmap without ink yields five zeros.
pub fn contour_features(pix: &PixelBuffer) -> [f32; CONTOUR_FEATURE_COUNT] {
    let Some(ink_box) = pix.ink_bounds() else {
        return [0.0; CONTOUR_FEATURE_COUNT];
    };

    let area = pix.pixel_count() as f32;
    let mut ink = 0u32;
    let mut boundary = 0u32;
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            if pix.is_ink(x, y) {
                ink += 1;
                if is_boundary(pix, x, y) {
                    boundary += 1;
                }
            }
        }
    }

    [
        boundary as f32 / area,
        ink_box.aspect_ratio(),
        ink as f32 / area,
        ink_box.w as f32 / pix.width() as f32,
        ink_box.h as f32 / pix.height() as f32,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use glyphseg_core::{BoundingBox, Channels};

    #[test]
    fn test_solid_block_contour() {
        let mut p = PixelBuffer::new_filled(10, 10, Channels::Gray, 255)
            .unwrap()
            .to_mut();
        p.fill_rect(&BoundingBox::new_unchecked(2, 2, 4, 2), 0).unwrap();
        let f = contour_features(&p.into());
        // every pixel of a 4x2 block touches background
        assert!((f[0] - 0.08).abs() < 1e-6);
        assert!((f[1] - 2.0).abs() < 1e-6);
        assert!((f[2] - 0.08).abs() < 1e-6);
        assert!((f[3] - 0.4).abs() < 1e-6);
        assert!((f[4] - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_full_bitmap_edges_are_boundary() {
        let p = PixelBuffer::new_filled(3, 3, Channels::Gray, 0).unwrap();
        let f = contour_features(&p);
        // only the centre pixel is interior
        assert!((f[0] - 8.0 / 9.0).abs() < 1e-6);
        assert_eq!(f[2], 1.0);
    }

    #[test]
    fn test_blank_contour() {
        let p = PixelBuffer::new_filled(4, 4, Channels::Gray, 255).unwrap();
        assert_eq!(contour_features(&p), [0.0; 5]);
    }
}
