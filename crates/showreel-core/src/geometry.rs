#![forbid(unsafe_code)]

//! Geometric primitives.

/// A point in CSS pixel space, origin at the top-left of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate (grows rightward).
    pub x: f32,
    /// Vertical coordinate (grows downward).
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Signed displacement from `self` to `other` as `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn delta_to(self, other: Point) -> (f32, f32) {
        (other.x - self.x, other.y - self.y)
    }
}

/// Intersection ratio of a container with the viewport, clamped to `[0, 1]`.
///
/// Non-finite inputs collapse to `0.0` so a bogus host measurement can never
/// assert a scroll-lock.
#[inline]
#[must_use]
pub fn clamp_ratio(ratio: f32) -> f32 {
    if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
