use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    foundation::{
        core::Size,
        error::{CaptionError, CaptionResult},
    },
    render::CornerStyle,
    style::color::Color,
};

/// Preview container in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PreviewSize {
    pub width: f64,
    pub height: f64,
}

impl Default for PreviewSize {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 600.0,
        }
    }
}

impl PreviewSize {
    pub fn to_size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Session settings loaded from JSON. Every field is optional.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    pub preview: PreviewSize,
    pub letterbox_color: Color,
    /// Resample factor for file downloads.
    pub download_scale: f64,
    pub clipboard_scale: f64,
    pub corner_style: CornerStyle,
    /// Extra directory scanned for `.ttf/.otf/.ttc` fonts.
    pub fonts_dir: Option<PathBuf>,
    pub output_dir: PathBuf,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            preview: PreviewSize::default(),
            letterbox_color: Color::BLACK,
            download_scale: 2.0,
            clipboard_scale: 1.0,
            corner_style: CornerStyle::Sharp,
            fonts_dir: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(s: &str) -> CaptionResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| CaptionError::serde(format!("parse editor config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> CaptionResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    pub fn validate(&self) -> CaptionResult<()> {
        let PreviewSize { width, height } = self.preview;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(CaptionError::validation(format!(
                "preview size must be positive, got {width}x{height}"
            )));
        }
        for (name, v) in [
            ("download_scale", self.download_scale),
            ("clipboard_scale", self.clipboard_scale),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(CaptionError::validation(format!(
                    "{name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }

    /// Font directories to scan in addition to system fonts.
    pub fn font_dirs(&self) -> Vec<PathBuf> {
        self.fonts_dir.iter().cloned().collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/config.rs"]
mod tests;
