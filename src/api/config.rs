use serde::{Deserialize, Serialize};

use crate::error::{MinimapError, MinimapResult};
use crate::render::Color;

/// Palette family selected by the host chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

/// Colors used to paint the selection window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimapPalette {
    /// Gripper and border color.
    pub range_background: Color,
    /// Grip strip color drawn on top of the grippers.
    pub range_fill: Color,
    /// Translucent overlay outside the selected window.
    pub shadow: Color,
}

pub const LIGHT_PALETTE: MinimapPalette = MinimapPalette {
    range_background: Color::rgba8(0xC0, 0xD1, 0xE1, 0xFF),
    range_fill: Color::rgba8(0xFF, 0xFF, 0xFF, 0xFF),
    shadow: Color::rgba8(0xE2, 0xEE, 0xF9, 0x99),
};

pub const DARK_PALETTE: MinimapPalette = MinimapPalette {
    range_background: Color::rgba8(0x56, 0x62, 0x6D, 0xFF),
    range_fill: Color::rgba8(0x24, 0x2F, 0x3E, 0xFF),
    shadow: Color::rgba8(0x30, 0x42, 0x59, 0x99),
};

#[must_use]
pub const fn apply_theme(kind: ThemeKind) -> MinimapPalette {
    match kind {
        ThemeKind::Light => LIGHT_PALETTE,
        ThemeKind::Dark => DARK_PALETTE,
    }
}

/// Public minimap bootstrap configuration.
///
/// Serializable so host applications can persist widget setup alongside
/// their chart configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MinimapConfig {
    /// Strip height in pixels; the strip is anchored to the bottom of the surface.
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default)]
    pub theme: ThemeKind,
    /// Tween duration for range changes after the first assignment.
    #[serde(default = "default_range_animation_ms")]
    pub range_animation_ms: f64,
    /// Duration forwarded to the host when it re-fits chart borders.
    #[serde(default = "default_borders_animation_ms")]
    pub borders_animation_ms: f64,
}

impl Default for MinimapConfig {
    fn default() -> Self {
        Self {
            height: default_height(),
            theme: ThemeKind::default(),
            range_animation_ms: default_range_animation_ms(),
            borders_animation_ms: default_borders_animation_ms(),
        }
    }
}

impl MinimapConfig {
    #[must_use]
    pub fn with_height(mut self, height: f64) -> Self {
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: ThemeKind) -> Self {
        self.theme = theme;
        self
    }

    #[must_use]
    pub fn with_animation_durations(mut self, range_ms: f64, borders_ms: f64) -> Self {
        self.range_animation_ms = range_ms;
        self.borders_animation_ms = borders_ms;
        self
    }

    pub fn validate(self) -> MinimapResult<Self> {
        // Body height is `height - 2`, so anything up to 2px leaves nothing to draw.
        if !self.height.is_finite() || self.height <= 2.0 {
            return Err(MinimapError::InvalidData(
                "minimap height must be finite and > 2".to_owned(),
            ));
        }
        for (name, value) in [
            ("range_animation_ms", self.range_animation_ms),
            ("borders_animation_ms", self.borders_animation_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MinimapError::InvalidData(format!(
                    "{name} must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> MinimapResult<Self> {
        let config: Self = serde_json::from_str(input)
            .map_err(|err| MinimapError::InvalidData(format!("invalid minimap config: {err}")))?;
        config.validate()
    }

    pub fn to_json_pretty(&self) -> MinimapResult<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            MinimapError::InvalidData(format!("failed to serialize minimap config: {err}"))
        })
    }
}

fn default_height() -> f64 {
    44.0
}

fn default_range_animation_ms() -> f64 {
    50.0
}

fn default_borders_animation_ms() -> f64 {
    200.0
}
