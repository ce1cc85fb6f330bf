// src/platform/platform_trait.rs
//
// Defines the `Platform` trait, which abstracts over the window system the
// engine presents into and receives input from.

use crate::surface::PixelSurface;
use anyhow::Result;

use super::PlatformEvent;

/// A window the engine can draw into and read input from.
///
/// Implementations own the OS window and whatever is needed to scale the
/// screen surface into it. They report raw events; the engine interprets
/// them.
pub trait Platform {
    /// Drains every event that arrived since the last call, oldest first.
    fn poll_events(&mut self) -> Result<Vec<PlatformEvent>>;

    /// Shows `frame`, letterboxed into the current window.
    fn present(&mut self, frame: &PixelSurface) -> Result<()>;

    /// Current client area size in window pixels.
    fn window_size(&self) -> (i32, i32);

    /// Performs any necessary cleanup before the platform is dropped.
    fn shutdown(&mut self) -> Result<()>;
}
