// CLI module - command-line argument parsing
//
// Every tuning flag is optional: a given flag overrides the config file, which overrides the
// built-in defaults.

use crate::config::RenderConfig;
use crate::error::Error;
use crate::window::WindowSettings;
use clap::Parser;
use std::path::PathBuf;

/// Ambient dot-field background: a grid of dots that glow around the pointer and its trail.
#[derive(Parser, Debug)]
#[command(name = "dotfield", version, long_about = None)]
pub struct Cli {
    /// Light theme (black dots on a light page)
    #[arg(long)]
    pub light: bool,

    /// TOML file with tuning parameters
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Resting dot radius in logical px (>= 0, default 1)
    #[arg(long)]
    pub dot_size: Option<f32>,
    /// Grid spacing in logical px (>= 1, default 24)
    #[arg(long)]
    pub dot_spacing: Option<f32>,
    /// Pointer glow reach in logical px (> 0, default 120)
    #[arg(long)]
    pub glow_radius: Option<f32>,
    /// Peak glow strength, 0..=1 (default 0.3)
    #[arg(long)]
    pub glow_intensity: Option<f32>,
    /// Max trail points, 0..=4096 (default 25)
    #[arg(long)]
    pub trail_length: Option<usize>,
    /// Per-frame trail age multiplier, strictly between 0 and 1 (default 0.96)
    #[arg(long)]
    pub trail_decay: Option<f32>,

    /// Logical window width
    #[arg(long, default_value_t = 1280)]
    pub width: usize,
    /// Logical window height
    #[arg(long, default_value_t = 720)]
    pub height: usize,
    /// Device pixel ratio (>= 1)
    #[arg(long, default_value_t = 1.0)]
    pub scale: f32,
    #[arg(long, default_value_t = 60)]
    pub fps: usize,

    /// Render headless and write a PNG instead of opening a window
    #[arg(long, value_name = "PNG")]
    pub snapshot: Option<PathBuf>,
    /// Frames to render for --snapshot
    #[arg(long, default_value_t = 60)]
    pub frames: usize,

    /// Log level when RUST_LOG is not set: trace, debug, info, warn, error
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// Defaults, then the config file, then flags; validated.
    pub fn render_config(&self) -> Result<RenderConfig, Error> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };
        if self.light {
            config.is_dark = false;
        }
        if let Some(v) = self.dot_size {
            config.dot_size = v;
        }
        if let Some(v) = self.dot_spacing {
            config.dot_spacing = v;
        }
        if let Some(v) = self.glow_radius {
            config.glow_radius = v;
        }
        if let Some(v) = self.glow_intensity {
            config.glow_intensity = v;
        }
        if let Some(v) = self.trail_length {
            config.trail_length = v;
        }
        if let Some(v) = self.trail_decay {
            config.trail_decay = v;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn window_settings(&self) -> WindowSettings {
        WindowSettings {
            width: self.width,
            height: self.height,
            scale: self.scale.max(1.0),
            fps: self.fps,
        }
    }
}
