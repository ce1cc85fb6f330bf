// src/blitter.rs

//! Scaled, clipped, blended image copies onto a [`Canvas`].
//!
//! Scaling uses nearest-neighbour sampling driven by per-axis fixed-point
//! accumulators: the source position advances by `(src_extent << 10) /
//! dst_extent` for each destination pixel, so no division happens inside the
//! pixel loop. When the clip cuts off leading destination rows or columns,
//! the accumulators are advanced by the skipped amount first, so the visible
//! part samples the same source pixels it would have without clipping.

use crate::blend::{
    blend_plain, blend_tinted, blend_tinted_additive, select_blend_mode, BlendMode,
};
use crate::color::Color;
use crate::geometry::Rect;
use crate::rasterizer::Canvas;
use crate::surface::PixelSurface;

/// Fractional bits of the sampling accumulators.
pub const FIXED_SHIFT: u32 = 10;

impl Canvas {
    /// Draws all of `img` unscaled with its top-left corner at `(x, y)`.
    pub fn draw_image(&mut self, img: &PixelSurface, x: i32, y: i32) {
        let dst = Rect::new(x, y, img.width(), img.height());
        self.draw_image_ex(img, dst, img.bounds(), Color::WHITE, Color::TRANSPARENT);
    }

    /// Draws the `src` region of `img` unscaled at `(x, y)`, tinted by `tint`.
    ///
    /// A negative `src.w` or `src.h` samples the source backwards from
    /// `src.x`/`src.y`, mirroring the region; the destination is sized by the
    /// magnitude of the extents.
    pub fn draw_image_region(
        &mut self,
        img: &PixelSurface,
        x: i32,
        y: i32,
        src: Rect,
        tint: Color,
    ) {
        let dst = Rect::new(x, y, src.w, src.h).abs_size();
        self.draw_image_ex(img, dst, src, tint, Color::TRANSPARENT);
    }

    /// Draws the `src` region of `img` scaled into `dst`.
    ///
    /// `tint` multiplies the source and `additive` is added to it before
    /// tinting; pass `Color::WHITE` and `Color::TRANSPARENT` for a plain copy.
    /// The blend rule is chosen once from these two colors. Samples that
    /// fall outside `img` are skipped.
    pub fn draw_image_ex(
        &mut self,
        img: &PixelSurface,
        dst: Rect,
        src: Rect,
        tint: Color,
        additive: Color,
    ) {
        if src.w == 0 || src.h == 0 || dst.w == 0 || dst.h == 0 {
            return;
        }
        match select_blend_mode(tint, additive) {
            BlendMode::Plain => self.blit_with(img, dst, src, blend_plain),
            BlendMode::Tinted => self.blit_with(img, dst, src, |d, s| blend_tinted(d, s, tint)),
            BlendMode::TintedAdditive => self.blit_with(img, dst, src, |d, s| {
                blend_tinted_additive(d, s, tint, additive)
            }),
        }
    }

    fn blit_with<F>(&mut self, img: &PixelSurface, dst: Rect, src: Rect, blend: F)
    where
        F: Fn(Color, Color) -> Color,
    {
        let visible = dst.intersect(&self.clip());
        if visible.is_empty() {
            return;
        }
        let step_x = ((src.w as i64) << FIXED_SHIFT) / dst.w as i64;
        let step_y = ((src.h as i64) << FIXED_SHIFT) / dst.h as i64;

        // Skipped leading pixels number fewer than the destination extent, so
        // the products stay within `src << FIXED_SHIFT`.
        let mut sy = ((src.y as i64) << FIXED_SHIFT) + (visible.y as i64 - dst.y as i64) * step_y;
        let sx_start =
            ((src.x as i64) << FIXED_SHIFT) + (visible.x as i64 - dst.x as i64) * step_x;
        let columns = visible.x as usize..visible.right() as usize;

        for dy in visible.y..visible.bottom() {
            let row = sy >> FIXED_SHIFT;
            if row >= 0 && row < img.height() as i64 {
                let src_row = img.row(row as i32);
                let dst_row = &mut self.surface_mut().row_mut(dy)[columns.clone()];
                let mut sx = sx_start;
                for d in dst_row {
                    let col = sx >> FIXED_SHIFT;
                    if col >= 0 && (col as usize) < src_row.len() {
                        *d = blend(*d, src_row[col as usize]);
                    }
                    sx += step_x;
                }
            }
            sy += step_y;
        }
    }
}
