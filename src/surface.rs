// src/surface.rs

//! The in-memory pixel buffer every drawing operation targets.

use crate::color::Color;
use crate::error::{RenderError, Result};
use crate::geometry::Rect;
use log::trace;

/// A `width` x `height` grid of straight-alpha colors, stored row-major.
///
/// Dimensions are positive and fixed at creation. A fresh surface is fully
/// transparent black.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    pixels: Box<[Color]>,
    width: i32,
    height: i32,
}

fn pixel_count(width: i32, height: i32) -> Result<usize> {
    if width <= 0 || height <= 0 {
        return Err(RenderError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .filter(|n| n.checked_mul(std::mem::size_of::<Color>()).is_some())
        .ok_or(RenderError::ResourceExhausted { width, height })
}

impl PixelSurface {
    /// Creates a transparent surface.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let count = pixel_count(width, height)?;
        trace!("Allocating {}x{} surface", width, height);
        Ok(Self {
            pixels: vec![Color::TRANSPARENT; count].into_boxed_slice(),
            width,
            height,
        })
    }

    /// Wraps existing row-major pixel data.
    ///
    /// Fails with `InvalidDimensions` when the dimensions are not positive or
    /// do not match the number of pixels supplied.
    pub fn from_pixels(width: i32, height: i32, pixels: Vec<Color>) -> Result<Self> {
        let count = pixel_count(width, height)?;
        if pixels.len() != count {
            return Err(RenderError::InvalidDimensions { width, height });
        }
        Ok(Self {
            pixels: pixels.into_boxed_slice(),
            width,
            height,
        })
    }

    /// Builds a surface from constant dimensions known to be valid, such as
    /// the built-in font atlas.
    pub(crate) fn from_fn<F>(width: i32, height: i32, mut pixel: F) -> Self
    where
        F: FnMut(i32, i32) -> Color,
    {
        debug_assert!(width > 0 && height > 0);
        let pixels = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| pixel(x, y))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self {
            pixels,
            width,
            height,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// The rect `(0, 0, width, height)`.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::of_size(self.width, self.height)
    }

    #[inline]
    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }

    /// Linear index of `(x, y)`. The caller guarantees the point is in bounds.
    #[inline]
    pub(crate) fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.bounds().contains(x, y));
        x as usize + y as usize * self.width as usize
    }

    /// Reads one pixel, or `None` outside the surface.
    pub fn get(&self, x: i32, y: i32) -> Option<Color> {
        if self.bounds().contains(x, y) {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Overwrites one pixel without blending. Out-of-bounds writes are ignored.
    pub fn set(&mut self, x: i32, y: i32, color: Color) {
        if self.bounds().contains(x, y) {
            let idx = self.index(x, y);
            self.pixels[idx] = color;
        }
    }

    /// One full row of pixels. `y` must be in `0..height`.
    #[inline]
    pub fn row(&self, y: i32) -> &[Color] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    /// Mutable counterpart of [`PixelSurface::row`].
    #[inline]
    pub fn row_mut(&mut self, y: i32) -> &mut [Color] {
        let start = y as usize * self.width as usize;
        let width = self.width as usize;
        &mut self.pixels[start..start + width]
    }
}
