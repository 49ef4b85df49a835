//! Deterministic fixture builders
//!
//! Pages are single-channel gray buffers with white paper (255) and black
//! ink (0). Block letters are drawn from 5x7 masks scaled by an integer
//! factor, so every drawing of the same letter at the same scale is
//! pixel-identical.

use crate::error::{TestError, TestResult};
use glyphseg_core::color::{INK, PAPER};
use glyphseg_core::{BoundingBox, Channels, PixelBuffer, PixelBufferMut};
use rand::prelude::*;

/// Width of a block-letter mask in cells
pub const GLYPH_COLS: u32 = 5;
/// Height of a block-letter mask in cells
pub const GLYPH_ROWS: u32 = 7;

const MASK_A: [&str; 7] = [
    "#####", "#...#", "#...#", "#####", "#...#", "#...#", "#...#",
];
const MASK_B: [&str; 7] = [
    "####.", "#...#", "#...#", "#####", "#...#", "#...#", "#####",
];
const MASK_I: [&str; 7] = [
    "#####", "..#..", "..#..", "..#..", "..#..", "..#..", "#####",
];
const MASK_L: [&str; 7] = [
    "#....", "#....", "#....", "#....", "#....", "#....", "#####",
];
const MASK_O: [&str; 7] = [
    "#####", "#...#", "#...#", "#...#", "#...#", "#...#", "#####",
];

fn mask_for(glyph: char) -> Option<&'static [&'static str; 7]> {
    match glyph {
        'A' => Some(&MASK_A),
        'B' => Some(&MASK_B),
        'I' => Some(&MASK_I),
        'L' => Some(&MASK_L),
        'O' => Some(&MASK_O),
        _ => None,
    }
}

/// Create a blank white page.
pub fn blank_page(width: u32, height: u32) -> TestResult<PixelBuffer> {
    Ok(PixelBuffer::new_filled(width, height, Channels::Gray, PAPER)?)
}

/// Create a white page with the given rectangles filled with ink.
pub fn page_with_rects(width: u32, height: u32, rects: &[BoundingBox]) -> TestResult<PixelBuffer> {
    let mut page = blank_page(width, height)?.to_mut();
    for rect in rects {
        page.fill_rect(rect, INK)?;
    }
    Ok(page.into())
}

/// Size in pixels of a block letter drawn at `scale`.
pub fn glyph_size(scale: u32) -> (u32, u32) {
    (GLYPH_COLS * scale, GLYPH_ROWS * scale)
}

/// Draw the block letter `glyph` with its top-left corner at (x, y).
///
/// Cells falling outside the page are clipped.
///
/// # Errors
///
/// Returns [`TestError::UnknownGlyph`] for letters without a mask.
pub fn draw_glyph(
    page: &mut PixelBufferMut,
    glyph: char,
    x: i32,
    y: i32,
    scale: u32,
) -> TestResult<()> {
    let mask = mask_for(glyph).ok_or(TestError::UnknownGlyph(glyph))?;
    let s = scale as i32;
    for (row, line) in mask.iter().enumerate() {
        for (col, cell) in line.bytes().enumerate() {
            if cell == b'#' {
                let cell_box =
                    BoundingBox::new_unchecked(x + col as i32 * s, y + row as i32 * s, s, s);
                page.fill_rect(&cell_box, INK)?;
            }
        }
    }
    Ok(())
}

/// Create a white page containing a single block letter.
///
/// The page is the glyph plus `margin` pixels of paper on every side.
pub fn glyph_page(glyph: char, scale: u32, margin: u32) -> TestResult<PixelBuffer> {
    let (gw, gh) = glyph_size(scale);
    let mut page = blank_page(gw + 2 * margin, gh + 2 * margin)?.to_mut();
    draw_glyph(&mut page, glyph, margin as i32, margin as i32, scale)?;
    Ok(page.into())
}

/// Draw a line of block letters starting at (x, y).
///
/// Spaces advance the pen without drawing. Returns the box of every drawn
/// letter in drawing order.
pub fn draw_text_line(
    page: &mut PixelBufferMut,
    text: &str,
    x: i32,
    y: i32,
    scale: u32,
    spacing: u32,
) -> TestResult<Vec<BoundingBox>> {
    let (gw, gh) = glyph_size(scale);
    let advance = (gw + spacing) as i32;
    let mut boxes = Vec::new();
    let mut pen = x;
    for glyph in text.chars() {
        if glyph != ' ' {
            draw_glyph(page, glyph, pen, y, scale)?;
            boxes.push(BoundingBox::new_unchecked(pen, y, gw as i32, gh as i32));
        }
        pen += advance;
    }
    Ok(boxes)
}

/// Create a page holding several text lines and the box of every letter.
///
/// Lines start at (`margin`, `margin`) and are separated by `line_gap`
/// rows of paper.
pub fn text_page(
    lines: &[&str],
    scale: u32,
    spacing: u32,
    line_gap: u32,
    margin: u32,
) -> TestResult<(PixelBuffer, Vec<BoundingBox>)> {
    let (gw, gh) = glyph_size(scale);
    let longest = lines.iter().map(|l| l.chars().count() as u32).max().unwrap_or(0);
    let width = 2 * margin + longest * (gw + spacing);
    let height = 2 * margin + lines.len() as u32 * (gh + line_gap);
    let mut page = blank_page(width.max(1), height.max(1))?.to_mut();

    let mut boxes = Vec::new();
    for (i, line) in lines.iter().enumerate() {
        let y = (margin + i as u32 * (gh + line_gap)) as i32;
        boxes.extend(draw_text_line(&mut page, line, margin as i32, y, scale, spacing)?);
    }
    Ok((page.into(), boxes))
}

/// Generate `n` random vectors of length `dim` with entries in `[0, 1)`.
///
/// The same seed always produces the same vectors.
pub fn random_vectors(n: usize, dim: usize, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| (0..dim).map(|_| rng.random::<f32>()).collect())
        .collect()
}
