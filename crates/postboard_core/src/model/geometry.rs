//! Axis-aligned geometry primitives.
//!
//! # Responsibility
//! - Define the rectangle/point/size shapes shared by sections and items.
//! - Provide the overlap and point-containment tests used by placement.
//!
//! # Invariants
//! - Touching edges never count as overlap.
//! - Containment is half-open, so a point on a shared edge belongs to
//!   exactly one of two adjacent rectangles.

use serde::{Deserialize, Serialize};

/// Point on the infinite board plane.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns whether both dimensions are finite and strictly positive.
    pub fn is_positive(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Axis-aligned rectangle.
///
/// Negative extents are clamped to zero by [`Rect::new`].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn from_parts(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Same size, different origin.
    pub fn with_origin(&self, origin: Point) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            ..*self
        }
    }

    /// Returns whether every coordinate is a finite number.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Returns whether two rectangles share a region of positive area.
///
/// Rectangles that only touch along an edge or a corner do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
}

/// Returns whether `(x, y)` lies in `[rect.x, rect.right()) x [rect.y, rect.bottom())`.
pub fn contains(rect: &Rect, x: f64, y: f64) -> bool {
    x >= rect.x && x < rect.right() && y >= rect.y && y < rect.bottom()
}
