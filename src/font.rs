// src/font.rs

//! Bitmap fonts cut from a 16x16 grid image, and text layout on top of them.
//!
//! A font image holds 256 equal cells, one per byte value, laid out row by
//! row. Each glyph is the cell trimmed of fully transparent columns on both
//! sides; its advance is the trimmed width plus one pixel of spacing.
//!
//! Text is single-byte only: byte `n` always selects glyph `n`, which makes
//! the built-in font a Latin-1 font. Use [`encode_latin1`] to turn a `&str`
//! into bytes; passing `str::as_bytes` directly is only correct for ASCII.

use crate::color::Color;
use crate::error::{RenderError, Result};
use crate::font_data::{FONT_8X8, GLYPH_CELL_PX};
use crate::geometry::Rect;
use crate::glyph::Glyph;
use crate::image_io;
use crate::rasterizer::Canvas;
use crate::surface::PixelSurface;
use log::debug;
use once_cell::sync::Lazy;
use std::path::Path;

/// Glyph cells per row and per column of a font image.
pub const GRID_CELLS: i32 = 16;

/// Number of glyphs in every font.
pub const GLYPH_COUNT: usize = 256;

/// Byte substituted by [`encode_latin1`] for characters outside Latin-1.
pub const REPLACEMENT_BYTE: u8 = b'?';

static BUILTIN_FONT: Lazy<Font> = Lazy::new(|| {
    let side = GRID_CELLS * GLYPH_CELL_PX as i32;
    let image = PixelSurface::from_fn(side, side, |x, y| {
        let cell = (y as usize / GLYPH_CELL_PX) * GRID_CELLS as usize + x as usize / GLYPH_CELL_PX;
        let row_bits = FONT_8X8[cell][y as usize % GLYPH_CELL_PX];
        if row_bits & (1 << (x as usize % GLYPH_CELL_PX)) != 0 {
            Color::WHITE
        } else {
            Color::TRANSPARENT
        }
    });
    let glyphs = cut_glyphs(&image);
    debug!("Built-in {}x{} font atlas ready", side, side);
    Font { image, glyphs }
});

/// A source image plus the 256 glyphs cut from it.
#[derive(Debug, Clone)]
pub struct Font {
    image: PixelSurface,
    glyphs: Box<[Glyph; GLYPH_COUNT]>,
}

impl Font {
    /// Cuts glyphs out of a 16x16 grid image.
    ///
    /// Fails with `InvalidFontSource` unless both dimensions are multiples of
    /// 16.
    pub fn from_image(image: PixelSurface) -> Result<Font> {
        if image.width() % GRID_CELLS != 0 || image.height() % GRID_CELLS != 0 {
            return Err(RenderError::InvalidFontSource {
                width: image.width(),
                height: image.height(),
            });
        }
        let glyphs = cut_glyphs(&image);
        debug!(
            "Loaded font from {}x{} image",
            image.width(),
            image.height()
        );
        Ok(Font { image, glyphs })
    }

    /// Decodes a PNG font image from memory.
    pub fn load_mem(bytes: &[u8]) -> Result<Font> {
        Font::from_image(image_io::load_image_mem(bytes)?)
    }

    /// Reads and decodes a PNG font image from disk.
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Font> {
        Font::from_image(image_io::load_image_file(path)?)
    }

    /// The 8x8 font compiled into the crate. Built on first use.
    pub fn builtin() -> &'static Font {
        &BUILTIN_FONT
    }

    pub fn image(&self) -> &PixelSurface {
        &self.image
    }

    #[inline]
    pub fn glyph(&self, byte: u8) -> Glyph {
        self.glyphs[byte as usize]
    }

    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs[..]
    }

    /// Height of one grid cell, the natural line height of the font.
    pub fn line_height(&self) -> i32 {
        self.image.height() / GRID_CELLS
    }

    /// Sum of the advances of every byte in `text`, saturating at `i32::MAX`.
    pub fn text_width(&self, text: &[u8]) -> i32 {
        text.iter()
            .fold(0i32, |width, &b| width.saturating_add(self.glyph(b).advance))
    }
}

/// Maps each char to its Latin-1 byte; anything above U+00FF becomes
/// [`REPLACEMENT_BYTE`].
pub fn encode_latin1(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(REPLACEMENT_BYTE))
        .collect()
}

fn column_has_ink(image: &PixelSurface, x: i32, y: i32, h: i32) -> bool {
    (y..y + h).any(|row| image.row(row)[x as usize].a != 0)
}

/// Shrinks a cell to its inked columns: first from the right, then from the
/// left. A cell with no ink ends up zero-width at its left edge.
fn trim_cell(image: &PixelSurface, cell: Rect) -> Rect {
    let mut r = cell;
    while r.w > 0 && !column_has_ink(image, r.x + r.w - 1, r.y, r.h) {
        r.w -= 1;
    }
    while r.w > 0 && !column_has_ink(image, r.x, r.y, r.h) {
        r.x += 1;
        r.w -= 1;
    }
    r
}

fn cut_glyphs(image: &PixelSurface) -> Box<[Glyph; GLYPH_COUNT]> {
    let cell_w = image.width() / GRID_CELLS;
    let cell_h = image.height() / GRID_CELLS;
    let mut glyphs = Box::new([Glyph::default(); GLYPH_COUNT]);

    for (i, glyph) in glyphs.iter_mut().enumerate() {
        let i = i as i32;
        let cell = Rect::new(
            cell_w * (i % GRID_CELLS),
            cell_h * (i / GRID_CELLS),
            cell_w,
            cell_h,
        );
        let rect = trim_cell(image, cell);
        *glyph = Glyph::new(rect, rect.w + 1);
    }

    // Space has no ink of its own; give it the width of a lowercase letter.
    let space_advance = glyphs[b'a' as usize].advance;
    glyphs[b' ' as usize] = Glyph::new(Rect::default(), space_advance);
    glyphs
}

impl Canvas {
    /// Draws `text` with `font`, top-left at `(x, y)`, each glyph tinted by
    /// `color`. Returns the pen x position after the last glyph.
    pub fn draw_text(&mut self, font: &Font, text: &[u8], x: i32, y: i32, color: Color) -> i32 {
        let mut pen = x;
        for &byte in text {
            let glyph = font.glyph(byte);
            self.draw_image_region(font.image(), pen, y, glyph.rect, color);
            pen = pen.saturating_add(glyph.advance);
        }
        pen
    }
}
