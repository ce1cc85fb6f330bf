// src/geometry.rs

//! Integer rectangles and the clip arithmetic built on them.

use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in pixel coordinates.
///
/// A rect with `w <= 0` or `h <= 0` is empty. Consumers treat empty rects as
/// no-ops instead of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// The rect covering a `width` x `height` surface.
    pub const fn of_size(width: i32, height: i32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// One past the last column. Saturates at `i32::MAX`.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }

    /// One past the last row. Saturates at `i32::MAX`.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.h)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// True when `(x, y)` lies inside the half-open extent of the rect.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.bottom()
    }

    /// The overlap of two rects.
    ///
    /// Disjoint inputs yield a rect with a non-positive width or height, which
    /// every consumer reads as empty.
    pub fn intersect(&self, other: &Rect) -> Rect {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.right().min(other.right());
        let y2 = self.bottom().min(other.bottom());
        Rect::new(x1, y1, span(x1, x2), span(y1, y2))
    }

    /// The same rect with negative extents made positive.
    ///
    /// Negative extents mark a flipped blit source; the destination of such a
    /// blit is sized by magnitude.
    pub fn abs_size(&self) -> Rect {
        Rect::new(self.x, self.y, self.w.saturating_abs(), self.h.saturating_abs())
    }
}

/// `end - start`, clamped into `i32`.
#[inline]
fn span(start: i32, end: i32) -> i32 {
    saturate_i32(end as i64 - start as i64)
}

/// Narrows `v` to `i32`, saturating at either end.
#[inline]
pub(crate) fn saturate_i32(v: i64) -> i32 {
    v.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}
