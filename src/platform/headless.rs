// src/platform/headless.rs

use crate::platform::platform_trait::Platform;
use crate::platform::PlatformEvent;
use crate::surface::PixelSurface;
use anyhow::{bail, Result};
use log::{debug, info};

/// An off-screen platform: events are scripted by the caller and presented
/// frames are kept in memory.
#[derive(Debug)]
pub struct HeadlessPlatform {
    window_size: (i32, i32),
    events: Vec<PlatformEvent>,
    last_frame: Option<PixelSurface>,
    frames_presented: u64,
    close_after: Option<u64>,
    close_sent: bool,
    shut_down: bool,
}

impl HeadlessPlatform {
    pub fn new(window_width: i32, window_height: i32) -> Self {
        Self {
            window_size: (window_width, window_height),
            events: Vec::new(),
            last_frame: None,
            frames_presented: 0,
            close_after: None,
            close_sent: false,
            shut_down: false,
        }
    }

    /// Queues an event for the next poll. A `Resize` also changes the
    /// reported window size.
    pub fn push_event(&mut self, event: PlatformEvent) {
        if let PlatformEvent::Resize { width, height } = event {
            self.window_size = (width, height);
        }
        self.events.push(event);
    }

    /// Delivers `CloseRequested` once `frames` frames have been presented.
    pub fn close_after(&mut self, frames: u64) {
        self.close_after = Some(frames);
        self.close_sent = false;
    }

    pub fn last_frame(&self) -> Option<&PixelSurface> {
        self.last_frame.as_ref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }
}

impl Platform for HeadlessPlatform {
    fn poll_events(&mut self) -> Result<Vec<PlatformEvent>> {
        let mut events: Vec<PlatformEvent> = self.events.drain(..).collect();
        if let Some(limit) = self.close_after {
            if !self.close_sent && self.frames_presented >= limit {
                debug!("Headless platform closing after {} frames", limit);
                events.push(PlatformEvent::CloseRequested);
                self.close_sent = true;
            }
        }
        Ok(events)
    }

    fn present(&mut self, frame: &PixelSurface) -> Result<()> {
        if self.shut_down {
            bail!("present called after shutdown");
        }
        match &mut self.last_frame {
            Some(last) if last.width() == frame.width() && last.height() == frame.height() => {
                last.pixels_mut().copy_from_slice(frame.pixels());
            }
            slot => *slot = Some(frame.clone()),
        }
        self.frames_presented += 1;
        Ok(())
    }

    fn window_size(&self) -> (i32, i32) {
        self.window_size
    }

    fn shutdown(&mut self) -> Result<()> {
        info!(
            "Headless platform shut down after {} frames",
            self.frames_presented
        );
        self.shut_down = true;
        Ok(())
    }
}
