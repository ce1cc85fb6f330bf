// src/config.rs

//! Defines the configuration structures for the engine.
//!
//! The configuration is plain data deserialized from JSON. Every section and
//! every field has a default, so a partial file (or none at all) is valid.
//! The binary reads the file named by the `BLINK_CONFIG` environment variable
//! through [`CONFIG`].

use anyhow::Context;
use bitflags::bitflags;
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable naming the JSON config file.
pub const CONFIG_ENV_VAR: &str = "BLINK_CONFIG";

/// Process-wide configuration, loaded on first access from the file named by
/// [`CONFIG_ENV_VAR`], falling back to defaults.
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

bitflags! {
    /// Window creation options, as a compact flag set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct WindowFlags: u32 {
        const SCALE2X = 1 << 0;
        const SCALE3X = 1 << 1;
        const SCALE4X = 1 << 2;
        /// Keep a console attached for log output.
        const CONSOLE = 1 << 3;
        const RESIZABLE = 1 << 4;
        const HIDE_CURSOR = 1 << 5;
    }
}

impl WindowFlags {
    /// Integer window scale. When several scale flags are set the smallest
    /// wins.
    pub fn scale_factor(self) -> i32 {
        if self.contains(WindowFlags::SCALE2X) {
            2
        } else if self.contains(WindowFlags::SCALE3X) {
            3
        } else if self.contains(WindowFlags::SCALE4X) {
            4
        } else {
            1
        }
    }
}

// --- Top-Level Configuration Structure ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub timing: TimingConfig,
    pub audio: AudioConfig,
}

impl Config {
    pub fn from_json_str(json: &str) -> anyhow::Result<Config> {
        serde_json::from_str(json).context("Failed to parse config JSON")
    }

    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Config> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Config::from_json_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Loads `path`, or returns the defaults if it cannot be read or parsed.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Config {
        match Config::load(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.as_ref().display());
                config
            }
            Err(e) => {
                warn!("{:#}; using default config", e);
                Config::default()
            }
        }
    }

    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when the
    /// variable is unset.
    pub fn from_env() -> Config {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Config::load_or_default(path),
            None => {
                info!("{} not set; using default config", CONFIG_ENV_VAR);
                Config::default()
            }
        }
    }
}

// --- Window Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Screen width in logical pixels; the size of the drawing surface.
    pub width: i32,
    /// Screen height in logical pixels.
    pub height: i32,
    pub title: String,
    /// Initial window scale, 1 to 4. Other values fall back to 1.
    pub scale: i32,
    pub resizable: bool,
    pub console: bool,
    pub hide_cursor: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig {
            width: 200,
            height: 200,
            title: "Blink".to_string(),
            scale: 3,
            resizable: true,
            console: true,
            hide_cursor: false,
        }
    }
}

impl WindowConfig {
    pub fn flags(&self) -> WindowFlags {
        let mut flags = match self.scale {
            2 => WindowFlags::SCALE2X,
            3 => WindowFlags::SCALE3X,
            4 => WindowFlags::SCALE4X,
            _ => WindowFlags::empty(),
        };
        flags.set(WindowFlags::RESIZABLE, self.resizable);
        flags.set(WindowFlags::CONSOLE, self.console);
        flags.set(WindowFlags::HIDE_CURSOR, self.hide_cursor);
        flags
    }

    /// Initial window size in physical pixels, saturating at `i32::MAX`.
    pub fn window_size(&self) -> (i32, i32) {
        let scale = self.flags().scale_factor();
        (
            self.width.saturating_mul(scale),
            self.height.saturating_mul(scale),
        )
    }
}

// --- Timing Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Target frame rate. Zero or negative disables frame pacing.
    pub fps: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig { fps: 60.0 }
    }
}

/// Longest frame step pacing will wait for, in seconds.
pub const MAX_STEP_TIME: f64 = 60.0;

impl TimingConfig {
    /// Seconds per frame, or 0 when pacing is disabled. Rates below one
    /// frame per [`MAX_STEP_TIME`] are clamped to it.
    pub fn step_time(&self) -> f64 {
        if self.fps > 0.0 {
            (1.0 / self.fps).min(MAX_STEP_TIME)
        } else {
            0.0
        }
    }
}

// --- Audio Configuration ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume, 0 to 1.
    pub volume: f32,
    /// Master pan, 0 (left) to 1 (right).
    pub pan: f32,
    pub music_volume: f32,
    pub music_loop: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        AudioConfig {
            volume: 1.0,
            pan: 0.5,
            music_volume: 1.0,
            music_loop: true,
        }
    }
}
