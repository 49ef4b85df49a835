//! BoundingBox - Rectangle regions
//!
//! Boxes are expressed in the coordinate space of the buffer they refer to.
//! Right and bottom edges are exclusive.

use crate::error::{Error, Result};

/// A rectangle region
///
/// A small `Copy` type; passed by value throughout the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BoundingBox {
    /// Left x coordinate
    pub x: i32,
    /// Top y coordinate
    pub y: i32,
    /// Width
    pub w: i32,
    /// Height
    pub h: i32,
}

impl BoundingBox {
    /// Create a new box
    ///
    /// # Errors
    ///
    /// Returns an error if width or height is negative.
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Result<Self> {
        if w < 0 || h < 0 {
            return Err(Error::InvalidParameter(format!(
                "box dimensions must be non-negative: w={}, h={}",
                w, h
            )));
        }
        Ok(Self { x, y, w, h })
    }

    /// Create a box without validation
    pub const fn new_unchecked(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Create a box from inclusive min/max corners
    pub fn from_extent(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            w: max_x - min_x + 1,
            h: max_y - min_y + 1,
        }
    }

    /// Get the right x coordinate (exclusive)
    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Get the bottom y coordinate (exclusive)
    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Get the area
    #[inline]
    pub fn area(&self) -> i64 {
        self.w as i64 * self.h as i64
    }

    /// Check if the box is empty (zero area)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Width divided by height, or 0 for a degenerate box
    pub fn aspect_ratio(&self) -> f32 {
        if self.h <= 0 {
            0.0
        } else {
            self.w as f32 / self.h as f32
        }
    }

    /// Check if a point is inside the box
    #[inline]
    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Check whether the box lies entirely inside a `width` x `height` buffer
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        !self.is_empty()
            && self.x >= 0
            && self.y >= 0
            && self.right() as i64 <= width as i64
            && self.bottom() as i64 <= height as i64
    }

    /// Compute the intersection of two boxes
    pub fn intersect(&self, other: &BoundingBox) -> Option<BoundingBox> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if x < right && y < bottom {
            Some(BoundingBox {
                x,
                y,
                w: right - x,
                h: bottom - y,
            })
        } else {
            None
        }
    }

    /// Translate the box by (dx, dy)
    pub fn translate(&self, dx: i32, dy: i32) -> BoundingBox {
        BoundingBox {
            x: self.x + dx,
            y: self.y + dy,
            w: self.w,
            h: self.h,
        }
    }

    /// Clip the box to fit within `[0, width) x [0, height)`
    ///
    /// Returns `None` if nothing of the box remains.
    pub fn clip(&self, width: u32, height: u32) -> Option<BoundingBox> {
        let frame = BoundingBox::new_unchecked(
            0,
            0,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        );
        self.intersect(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_new_rejects_negative() {
        assert!(BoundingBox::new(0, 0, -1, 3).is_err());
        assert!(BoundingBox::new(0, 0, 0, 0).is_ok());
    }

    #[test]
    fn test_from_extent() {
        let b = BoundingBox::from_extent(2, 3, 6, 3);
        assert_eq!(b, BoundingBox::new_unchecked(2, 3, 5, 1));
    }

    #[test]
    fn test_intersect_and_clip() {
        let a = BoundingBox::new_unchecked(0, 0, 10, 10);
        let b = BoundingBox::new_unchecked(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(BoundingBox::new_unchecked(5, 5, 5, 5)));

        let far = BoundingBox::new_unchecked(20, 20, 2, 2);
        assert_eq!(a.intersect(&far), None);

        let hanging = BoundingBox::new_unchecked(-3, 8, 6, 6);
        assert_eq!(
            hanging.clip(10, 10),
            Some(BoundingBox::new_unchecked(0, 8, 3, 2))
        );
    }

    #[test]
    fn test_fits_within() {
        assert!(BoundingBox::new_unchecked(0, 0, 4, 4).fits_within(4, 4));
        assert!(!BoundingBox::new_unchecked(1, 0, 4, 4).fits_within(4, 4));
        assert!(!BoundingBox::new_unchecked(0, 0, 0, 4).fits_within(4, 4));
        assert!(!BoundingBox::new_unchecked(-1, 0, 2, 2).fits_within(4, 4));
    }

    #[test]
    fn test_aspect_ratio() {
        assert_eq!(BoundingBox::new_unchecked(0, 0, 6, 3).aspect_ratio(), 2.0);
        assert_eq!(BoundingBox::new_unchecked(0, 0, 6, 0).aspect_ratio(), 0.0);
    }
}
