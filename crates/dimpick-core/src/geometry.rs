#![forbid(unsafe_code)]

//! Geometric primitives for hit testing.

/// A rectangle in host cell coordinates (0-indexed, origin at top-left).
///
/// The host reports where it drew each control so pointer presses can be
/// routed. A zero-sized rectangle contains no points, which is how a control
/// that is not on screen (for example a hidden tooltip) is represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    #[must_use]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    #[must_use]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    #[must_use]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Split off `width` columns from the left, returning `(left, rest)`.
    ///
    /// Saturates: asking for more columns than exist yields the whole
    /// rectangle on the left and an empty remainder.
    #[must_use]
    pub const fn split_left(&self, width: u16) -> (Rect, Rect) {
        let w = if width < self.width { width } else { self.width };
        (
            Rect::new(self.x, self.y, w, self.height),
            Rect::new(self.x.saturating_add(w), self.y, self.width - w, self.height),
        )
    }

    /// Split off `width` columns from the right, returning `(rest, right)`.
    #[must_use]
    pub const fn split_right(&self, width: u16) -> (Rect, Rect) {
        let w = if width < self.width { width } else { self.width };
        let rest = self.width - w;
        (
            Rect::new(self.x, self.y, rest, self.height),
            Rect::new(self.x.saturating_add(rest), self.y, w, self.height),
        )
    }
}
