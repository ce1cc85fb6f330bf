// src/lib.rs

//! A single-buffer software renderer with a tiny game-loop engine on top.
//!
//! All drawing targets one [`PixelSurface`] through a [`Canvas`], which
//! applies the clip rect and alpha blending. Everything else (fonts, image
//! files, input, audio commands, the window) hangs off that core.

pub mod audio;
pub mod blend;
pub mod blitter;
pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod font;
pub mod font_data;
pub mod geometry;
pub mod glyph;
pub mod image_io;
pub mod input;
pub mod keys;
pub mod platform;
pub mod rasterizer;
pub mod surface;

pub use color::Color;
pub use engine::{Engine, FrameStatus};
pub use error::RenderError;
pub use font::Font;
pub use geometry::Rect;
pub use rasterizer::Canvas;
pub use surface::PixelSurface;
