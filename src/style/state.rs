use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    effects::filter::FilterId,
    foundation::error::{CaptionError, CaptionResult},
    style::color::Color,
};

pub const DEFAULT_FONT_FAMILY: &str = "Arial, sans-serif";
pub const DEFAULT_FONT_SIZE_PX: f32 = 28.0;
pub const DEFAULT_STROKE_WIDTH_PX: f32 = 3.0;

pub const OPACITY_RANGE: (u8, u8) = (0, 100);
pub const STROKE_WIDTH_RANGE: (f32, f32) = (0.0, 10.0);
pub const FONT_SIZE_RANGE: (f32, f32) = (8.0, 120.0);

/// Every caption style field the editor exposes.
///
/// Fields are public for reading and bulk construction; the `set_*` methods clamp the same way
/// the editor controls do, and [`StyleState::normalized`] re-applies those clamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleState {
    pub caption_text: String,
    pub text_color: Color,
    pub background_color: Color,
    /// Background box opacity in percent, `0..=100`.
    pub background_opacity: u8,
    /// CSS-style family list, e.g. `"Arial, sans-serif"`.
    pub font_family: String,
    pub font_size_px: f32,
    pub stroke_width_px: f32,
    pub stroke_color: Color,
    pub filter: FilterId,
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Default for StyleState {
    fn default() -> Self {
        Self {
            caption_text: String::new(),
            text_color: Color::WHITE,
            background_color: Color::BLACK,
            background_opacity: 0,
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            font_size_px: DEFAULT_FONT_SIZE_PX,
            stroke_width_px: DEFAULT_STROKE_WIDTH_PX,
            stroke_color: Color::BLACK,
            filter: FilterId::None,
            bold: false,
            italic: false,
            underline: false,
        }
    }
}

impl StyleState {
    /// Parse a style document; missing fields take their defaults.
    pub fn from_json_str(s: &str) -> CaptionResult<Self> {
        let style: Self = serde_json::from_str(s)
            .map_err(|e| CaptionError::serde(format!("style json: {e}")))?;
        Ok(style.normalized())
    }

    pub fn from_path(path: impl AsRef<Path>) -> CaptionResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read style '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> CaptionResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| CaptionError::serde(e.to_string()))
    }

    /// Restore every field to its default.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Copy with every numeric field clamped into its control range.
    pub fn normalized(mut self) -> Self {
        self.set_background_opacity(self.background_opacity);
        self.set_stroke_width_px(self.stroke_width_px);
        self.set_font_size_px(self.font_size_px);
        if self.font_family.trim().is_empty() {
            self.font_family = DEFAULT_FONT_FAMILY.to_string();
        }
        self
    }

    pub fn set_caption_text(&mut self, text: impl Into<String>) {
        self.caption_text = text.into();
    }

    pub fn set_background_opacity(&mut self, opacity: u8) {
        self.background_opacity = opacity.clamp(OPACITY_RANGE.0, OPACITY_RANGE.1);
    }

    pub fn set_stroke_width_px(&mut self, width: f32) {
        self.stroke_width_px = clamp_finite(width, STROKE_WIDTH_RANGE, DEFAULT_STROKE_WIDTH_PX);
    }

    pub fn set_font_size_px(&mut self, size: f32) {
        self.font_size_px = clamp_finite(size, FONT_SIZE_RANGE, DEFAULT_FONT_SIZE_PX);
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) {
        self.font_family = family.into();
    }

    /// Background fill color with the opacity folded into alpha.
    ///
    /// Alpha is `floor(opacity / 100 * 255)`, so 100% is fully opaque and 0% is `None`.
    pub fn background_fill(&self) -> Option<Color> {
        if self.background_opacity == 0 {
            return None;
        }
        let pct = u32::from(self.background_opacity.min(OPACITY_RANGE.1));
        let alpha = (pct * 255 / 100) as u8;
        Some(self.background_color.with_alpha(alpha))
    }

    pub fn has_caption(&self) -> bool {
        !self.caption_text.is_empty()
    }
}

fn clamp_finite(v: f32, (lo, hi): (f32, f32), fallback: f32) -> f32 {
    if v.is_finite() { v.clamp(lo, hi) } else { fallback }
}

#[cfg(test)]
#[path = "../../tests/unit/style/state.rs"]
mod tests;
