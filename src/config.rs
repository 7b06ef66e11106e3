// Tuning parameters for the dot field, plus the per-theme palette.
//
// Loaded in order of precedence:
// 1. CLI flags (highest priority, applied by `cli`)
// 2. Config file (TOML, `--config <path>`)
// 3. Built-in defaults (lowest priority)

use crate::error::Error;
use crate::types::Rgba;
use serde::Deserialize;
use std::path::Path;

/// Fixed for the lifetime of one mount; changing it means unmount + mount.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    #[serde(alias = "isDark")]
    pub is_dark: bool,
    /// Resting dot radius (logical px)
    #[serde(alias = "dotSize")]
    pub dot_size: f32,
    /// Distance between grid points (logical px)
    #[serde(alias = "dotSpacing")]
    pub dot_spacing: f32,
    /// Reach of the live pointer's glow (logical px)
    #[serde(alias = "glowRadius")]
    pub glow_radius: f32,
    /// Peak glow value, in [0, 1]
    #[serde(alias = "glowIntensity")]
    pub glow_intensity: f32,
    /// Max retained trail points
    #[serde(alias = "trailLength")]
    pub trail_length: usize,
    /// Per-frame age multiplier, in (0, 1)
    #[serde(alias = "trailDecay")]
    pub trail_decay: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            is_dark: true,
            dot_size: 1.0,
            dot_spacing: 24.0,
            glow_radius: 120.0,
            glow_intensity: 0.3,
            trail_length: 25,
            trail_decay: 0.96,
        }
    }
}

/// Smallest grid spacing (logical px); denser grids cannot hold the frame rate.
pub const MIN_DOT_SPACING: f32 = 1.0;
/// Longest trail accepted.
pub const MAX_TRAIL_LENGTH: usize = 4096;

impl RenderConfig {
    /// Parse a TOML document; missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let config: RenderConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject values that would break the glow math (division by a zero radius, a trail that never
    /// fades) or make a single frame unboundedly expensive.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.dot_spacing.is_finite() && self.dot_spacing >= MIN_DOT_SPACING) {
            return Err(Error::Config(format!(
                "dot_spacing must be >= {MIN_DOT_SPACING}, got {}",
                self.dot_spacing
            )));
        }
        if self.trail_length > MAX_TRAIL_LENGTH {
            return Err(Error::Config(format!(
                "trail_length must be <= {MAX_TRAIL_LENGTH}, got {}",
                self.trail_length
            )));
        }
        if !(self.glow_radius.is_finite() && self.glow_radius > 0.0) {
            return Err(Error::Config(format!("glow_radius must be > 0, got {}", self.glow_radius)));
        }
        if !(self.dot_size.is_finite() && self.dot_size >= 0.0) {
            return Err(Error::Config(format!("dot_size must be >= 0, got {}", self.dot_size)));
        }
        if !(0.0..=1.0).contains(&self.glow_intensity) {
            return Err(Error::Config(format!(
                "glow_intensity must be within [0, 1], got {}",
                self.glow_intensity
            )));
        }
        if !(self.trail_decay > 0.0 && self.trail_decay < 1.0) {
            return Err(Error::Config(format!(
                "trail_decay must be within (0, 1), got {}",
                self.trail_decay
            )));
        }
        Ok(())
    }

    pub fn palette(&self) -> &'static Palette {
        if self.is_dark { &DARK } else { &LIGHT }
    }
}

/// Colours for one theme. `base_alpha` is shared by the resting dot and the glow baseline.
#[derive(Debug, PartialEq)]
pub struct Palette {
    pub ink: (u8, u8, u8),
    pub base_alpha: f32,
    pub glow_alpha_scale: f32,
    /// Page colour behind the transparent layer, 0x00RRGGBB
    pub page: u32,
}

impl Palette {
    pub fn ink_with_alpha(&self, alpha: f32) -> Rgba {
        let (r, g, b) = self.ink;
        Rgba::new(r, g, b, alpha)
    }
}

pub const DARK: Palette = Palette {
    ink: (255, 255, 255),
    base_alpha: 0.08,
    glow_alpha_scale: 0.35,
    page: 0x00_0A_0A_0A,
};

pub const LIGHT: Palette = Palette {
    ink: (0, 0, 0),
    base_alpha: 0.06,
    glow_alpha_scale: 0.25,
    page: 0x00_FA_FA_FA,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let c = RenderConfig::default();
        assert!(c.is_dark);
        assert_eq!(c.dot_size, 1.0);
        assert_eq!(c.dot_spacing, 24.0);
        assert_eq!(c.glow_radius, 120.0);
        assert_eq!(c.glow_intensity, 0.3);
        assert_eq!(c.trail_length, 25);
        assert_eq!(c.trail_decay, 0.96);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let c = RenderConfig::from_toml_str("is_dark = false\nglow_radius = 80.0\n").unwrap();
        assert!(!c.is_dark);
        assert_eq!(c.glow_radius, 80.0);
        assert_eq!(c.dot_spacing, 24.0);
    }

    #[test]
    fn toml_accepts_camel_case_prop_names() {
        let c = RenderConfig::from_toml_str("trailLength = 10\ntrailDecay = 0.9\n").unwrap();
        assert_eq!(c.trail_length, 10);
        assert_eq!(c.trail_decay, 0.9);
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        assert!(matches!(
            RenderConfig::from_toml_str("glow = 1.0\n"),
            Err(Error::ConfigParse(_))
        ));
    }

    #[test]
    fn validate_rejects_out_of_range_values() {
        let bad = [
            RenderConfig { dot_spacing: 0.0, ..Default::default() },
            RenderConfig { dot_spacing: 0.001, ..Default::default() },
            RenderConfig { trail_length: MAX_TRAIL_LENGTH + 1, ..Default::default() },
            RenderConfig { trail_length: usize::MAX, ..Default::default() },
            RenderConfig { glow_radius: -1.0, ..Default::default() },
            RenderConfig { dot_size: f32::NAN, ..Default::default() },
            RenderConfig { glow_intensity: 1.5, ..Default::default() },
            RenderConfig { trail_decay: 1.0, ..Default::default() },
            RenderConfig { trail_decay: 0.0, ..Default::default() },
        ];
        for c in bad {
            assert!(matches!(c.validate(), Err(Error::Config(_))), "{c:?} should be rejected");
        }
    }

    #[test]
    fn validate_accepts_the_bounds_themselves() {
        let edge = RenderConfig {
            dot_spacing: MIN_DOT_SPACING,
            trail_length: MAX_TRAIL_LENGTH,
            ..Default::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn palette_shares_baseline_between_rest_and_glow() {
        let dark = RenderConfig::default();
        let light = RenderConfig { is_dark: false, ..Default::default() };
        assert_eq!(dark.palette().base_alpha, 0.08);
        assert_eq!(dark.palette().glow_alpha_scale, 0.35);
        assert_eq!(light.palette().base_alpha, 0.06);
        assert_eq!(light.palette().glow_alpha_scale, 0.25);
        assert_eq!(dark.palette().ink, (255, 255, 255));
        assert_eq!(light.palette().ink, (0, 0, 0));
    }
}
