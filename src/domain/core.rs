//! Core geometry types
//!
//! Pure pixel geometry shared by the viewport tracker and the host layer.
//! Coordinates are viewport-relative (the host reports section bounds the
//! same way it reports the viewport itself), with `y` growing downwards.

use serde::Serialize;

/// Rectangle in pixel coordinates
///
/// This is the fundamental building block for the viewport band calculations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    /// Creates a new rectangle
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Returns the right edge coordinate
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Returns the bottom edge coordinate
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Returns true if the rectangle covers no pixels
    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if left < right && top < bottom {
            Some(Rect::new(left, top, right - left, bottom - top))
        } else {
            None
        }
    }

    /// Shrinks the rectangle by a fraction of its own size on each side
    ///
    /// Fractions are relative to the rectangle's width (left/right) or height
    /// (top/bottom). The result is clamped so it never has negative size.
    pub fn inset_fraction(&self, insets: &Insets) -> Rect {
        let top = (self.h as f64 * insets.top).round() as i32;
        let bottom = (self.h as f64 * insets.bottom).round() as i32;
        let left = (self.w as f64 * insets.left).round() as i32;
        let right = (self.w as f64 * insets.right).round() as i32;

        Rect::new(
            self.x + left,
            self.y + top,
            (self.w - left - right).max(0),
            (self.h - top - bottom).max(0),
        )
    }
}

/// Fractional insets applied to each side of a rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Insets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Insets {
    pub fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }
}
