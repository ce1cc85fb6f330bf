// src/rasterizer.rs

//! Clipped primitive drawing on a single pixel surface.
//!
//! A [`Canvas`] owns the target [`PixelSurface`] together with the current clip
//! rect. Every primitive funnels through the clip and the plain blend rule, so
//! any input is accepted: points off the surface, empty rects and transparent
//! colors simply draw nothing.
//!
//! ```text
//!  draw_circle ───────► draw_point ───────────────┐
//!  draw_rect ─────────► draw_line ──► draw_point   ├──► clip ──► blend_plain ──► surface
//!  draw_circle_fill ──► fill_span ─────────────────┤
//!  clear ─────────────► draw_rect_fill ────────────┘
//! ```
//!
//! Image blits and text live in `blitter` and `font`; they share the same
//! clip but walk rows directly.

use crate::blend::blend_plain;
use crate::color::Color;
use crate::error::Result;
use crate::geometry::Rect;
use crate::surface::PixelSurface;
use log::trace;

/// Extent used by [`Canvas::clear`]; large enough to cover any surface.
const CLEAR_EXTENT: i32 = 0xff_ffff;

/// A pixel surface plus the clip rect that bounds every draw into it.
#[derive(Debug, Clone)]
pub struct Canvas {
    surface: PixelSurface,
    clip: Rect,
}

impl Canvas {
    /// Wraps `surface`, with the clip covering all of it.
    pub fn new(surface: PixelSurface) -> Self {
        let clip = surface.bounds();
        Self { surface, clip }
    }

    /// Creates a canvas over a fresh transparent surface.
    pub fn with_size(width: i32, height: i32) -> Result<Self> {
        Ok(Self::new(PixelSurface::new(width, height)?))
    }

    #[inline]
    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    #[inline]
    pub fn surface_mut(&mut self) -> &mut PixelSurface {
        &mut self.surface
    }

    pub fn into_surface(self) -> PixelSurface {
        self.surface
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.surface.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.surface.height()
    }

    /// The active clip. Always inside the surface bounds; may be empty.
    #[inline]
    pub fn clip(&self) -> Rect {
        self.clip
    }

    /// Restricts drawing to `rect` intersected with the surface bounds.
    pub fn set_clip(&mut self, rect: Rect) {
        self.clip = rect.intersect(&self.surface.bounds());
        trace!("Clip set to {:?} (requested {:?})", self.clip, rect);
    }

    /// Restores the clip to the whole surface.
    pub fn reset_clip(&mut self) {
        self.clip = self.surface.bounds();
    }

    /// Fills everything currently visible through the clip with `color`, then
    /// restores the clip to the full surface for the next frame.
    pub fn clear(&mut self, color: Color) {
        self.draw_rect_fill(Rect::new(0, 0, CLEAR_EXTENT, CLEAR_EXTENT), color);
        self.reset_clip();
    }

    /// Blends `color` onto a single pixel if it lies inside the clip.
    pub fn draw_point(&mut self, x: i32, y: i32, color: Color) {
        if color.is_transparent() || !self.clip.contains(x, y) {
            return;
        }
        let idx = self.surface.index(x, y);
        let dst = &mut self.surface.pixels_mut()[idx];
        *dst = blend_plain(*dst, color);
    }

    /// Draws a one-pixel line including both endpoints.
    ///
    /// Uses the error-accumulator form of Bresenham's algorithm. The walk
    /// always starts at the lexicographically smaller endpoint, so swapping
    /// the endpoints selects exactly the same pixels. Lines whose bounding
    /// box misses the clip are rejected up front, axis-aligned lines are
    /// clipped directly, and the walk stops once it has moved past the clip.
    pub fn draw_line(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: Color) {
        if color.is_transparent() {
            return;
        }
        let clip = self.clip;
        if clip.is_empty()
            || x1.max(x2) < clip.x
            || x1.min(x2) >= clip.right()
            || y1.max(y2) < clip.y
            || y1.min(y2) >= clip.bottom()
        {
            return;
        }

        if y1 == y2 {
            self.fill_span(x1 as i64, x2 as i64, y1 as i64, color);
            return;
        }
        if x1 == x2 {
            for y in y1.min(y2).max(clip.y)..=y1.max(y2).min(clip.bottom() - 1) {
                self.draw_point(x1, y, color);
            }
            return;
        }

        let ((mut x, mut y), (x_end, y_end)) = if (x1, y1) <= (x2, y2) {
            ((x1 as i64, y1 as i64), (x2 as i64, y2 as i64))
        } else {
            ((x2 as i64, y2 as i64), (x1 as i64, y1 as i64))
        };

        let dx = (x_end - x).abs();
        let sx = if x < x_end { 1 } else { -1 };
        let dy = -(y_end - y).abs();
        let sy = if y < y_end { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, color);
            if x == x_end && y == y_end {
                break;
            }
            let e2 = err << 1;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
            if past_clip(x, sx, clip.x, clip.right()) || past_clip(y, sy, clip.y, clip.bottom()) {
                break;
            }
        }
    }

    /// [`Canvas::draw_point`] for coordinates that may lie beyond `i32`.
    #[inline]
    fn plot(&mut self, x: i64, y: i64, color: Color) {
        if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
            self.draw_point(x, y, color);
        }
    }

    /// Blends `color` over columns `x_a..=x_b` of row `y`, inside the clip.
    fn fill_span(&mut self, x_a: i64, x_b: i64, y: i64, color: Color) {
        let clip = self.clip;
        if y < clip.y as i64 || y >= clip.bottom() as i64 {
            return;
        }
        let x0 = x_a.min(x_b).max(clip.x as i64);
        let x1 = x_a.max(x_b).min(clip.right() as i64 - 1);
        if x0 > x1 {
            return;
        }
        // Both ends now lie inside the clip, which lies inside the surface.
        let row = self.surface.row_mut(y as i32);
        for dst in &mut row[x0 as usize..=x1 as usize] {
            *dst = blend_plain(*dst, color);
        }
    }

    /// Draws the one-pixel border of `rect`.
    ///
    /// A rect one pixel wide or tall is a single line. Otherwise the four
    /// edges are drawn as separate lines, which blends each corner twice; with
    /// a translucent color the corners come out denser than the edges.
    pub fn draw_rect(&mut self, rect: Rect, color: Color) {
        if color.is_transparent() || rect.is_empty() {
            return;
        }
        let x1 = rect.right() - 1;
        let y1 = rect.bottom() - 1;
        if rect.w == 1 {
            self.draw_line(rect.x, rect.y, rect.x, y1, color);
        } else if rect.h == 1 {
            self.draw_line(rect.x, rect.y, x1, rect.y, color);
        } else {
            self.draw_line(rect.x, rect.y, x1, rect.y, color);
            self.draw_line(x1, rect.y, x1, y1, color);
            self.draw_line(x1, y1, rect.x, y1, color);
            self.draw_line(rect.x, y1, rect.x, rect.y, color);
        }
    }

    /// Blends `color` over every pixel of `rect` that lies inside the clip.
    pub fn draw_rect_fill(&mut self, rect: Rect, color: Color) {
        if color.is_transparent() {
            return;
        }
        let area = rect.intersect(&self.clip);
        if area.is_empty() {
            return;
        }
        let (x0, x1) = (area.x as usize, area.right() as usize);
        for y in area.y..area.bottom() {
            for dst in &mut self.surface.row_mut(y)[x0..x1] {
                *dst = blend_plain(*dst, color);
            }
        }
    }

    /// Draws a circle outline with the midpoint algorithm.
    ///
    /// The four cardinal points are emitted unconditionally, so radius 0
    /// blends the centre pixel four times. The walk ends early once every
    /// remaining point falls outside the clip.
    pub fn draw_circle(&mut self, x0: i32, y0: i32, radius: i32, color: Color) {
        if color.is_transparent() || !self.circle_touches_clip(x0, y0, radius) {
            return;
        }
        let (x0, y0, radius) = (x0 as i64, y0 as i64, radius as i64);
        let reach = reach_from(x0, self.clip.x, self.clip.right())
            .min(reach_from(y0, self.clip.y, self.clip.bottom()));

        let mut e = 1 - radius;
        let mut dx = 0;
        let mut dy = -2 * radius;
        let mut x = 0;
        let mut y = radius;

        self.plot(x0, y0 + radius, color);
        self.plot(x0, y0 - radius, color);
        self.plot(x0 + radius, y0, color);
        self.plot(x0 - radius, y0, color);

        while x < y - 1 && x <= reach {
            x += 1;
            if e >= 0 {
                y -= 1;
                dy += 2;
                e += dy;
            }
            dx += 2;
            e += dx + 1;

            self.plot(x0 + x, y0 + y, color);
            self.plot(x0 - x, y0 + y, color);
            self.plot(x0 + x, y0 - y, color);
            self.plot(x0 - x, y0 - y, color);

            if x != y {
                self.plot(x0 + y, y0 + x, color);
                self.plot(x0 - y, y0 + x, color);
                self.plot(x0 + y, y0 - x, color);
                self.plot(x0 - y, y0 - x, color);
            }
        }
    }

    /// Fills a circle with horizontal spans from the same midpoint walk as
    /// [`Canvas::draw_circle`]. Each span covers the same pixels a horizontal
    /// `draw_line` would. Radius 0 or less draws nothing.
    pub fn draw_circle_fill(&mut self, x0: i32, y0: i32, radius: i32, color: Color) {
        if color.is_transparent() || radius <= 0 || !self.circle_touches_clip(x0, y0, radius) {
            return;
        }
        let (x0, y0, radius) = (x0 as i64, y0 as i64, radius as i64);
        let reach = reach_from(y0, self.clip.y, self.clip.bottom());

        let mut e = 1 - radius;
        let mut dx = 0;
        let mut dy = -2 * radius;
        let mut x = 0;
        let mut y = radius;

        self.fill_span(x0 - radius + 1, x0 + radius, y0, color);

        while x < y - 1 && x <= reach {
            x += 1;
            if e >= 0 {
                y -= 1;
                dy += 2;
                e += dy;
                self.fill_span(x0 - x + 1, x0 + x, y0 + y, color);
                self.fill_span(x0 - x + 1, x0 + x, y0 - y, color);
            }
            dx += 2;
            e += dx + 1;

            if x != y {
                self.fill_span(x0 - y + 1, x0 + y, y0 + x, color);
                self.fill_span(x0 - y + 1, x0 + y, y0 - x, color);
            }
        }
    }

    /// True when the square bounding a circle overlaps the clip.
    fn circle_touches_clip(&self, x0: i32, y0: i32, radius: i32) -> bool {
        let r = (radius as i64).abs();
        let clip = self.clip;
        !clip.is_empty()
            && x0 as i64 + r >= clip.x as i64
            && x0 as i64 - r < clip.right() as i64
            && y0 as i64 + r >= clip.y as i64
            && y0 as i64 - r < clip.bottom() as i64
    }
}

/// True once a walk along `step` has left `lo..hi` for good.
#[inline]
fn past_clip(pos: i64, step: i64, lo: i32, hi: i32) -> bool {
    (step > 0 && pos >= hi as i64) || (step < 0 && pos < lo as i64)
}

/// The largest distance from `center` to a pixel in `lo..hi`.
#[inline]
fn reach_from(center: i64, lo: i32, hi: i32) -> i64 {
    (center - lo as i64).abs().max((hi as i64 - 1 - center).abs())
}

#[cfg(test)]
mod tests;
