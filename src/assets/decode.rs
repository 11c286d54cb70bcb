use std::{path::Path, sync::Arc};

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::{
    core::{Canvas, Size, premultiply_rgba8_in_place},
    error::{CaptionError, CaptionResult},
};

/// Decoded source image in premultiplied RGBA8 form.
#[derive(Clone)]
pub struct SourceImage {
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl std::fmt::Debug for SourceImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl SourceImage {
    #[tracing::instrument(fields(path = %path.as_ref().display()))]
    pub fn from_path(path: impl AsRef<Path> + std::fmt::Debug) -> CaptionResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("read image '{}'", path.display()))
            .map_err(|e| CaptionError::decode(format!("{e:#}")))?;
        decode_image(&bytes)
    }

    /// Decode a `data:image/...;base64,...` URL as produced by a file reader.
    pub fn from_data_url(url: &str) -> CaptionResult<Self> {
        let (_, bytes) = parse_data_url(url)?;
        decode_image(&bytes)
    }

    /// Load from either a data URL or a filesystem path.
    pub fn open(source: &str) -> CaptionResult<Self> {
        if source.trim_start().starts_with("data:") {
            Self::from_data_url(source)
        } else {
            Self::from_path(source)
        }
    }

    /// Wrap already-premultiplied pixels.
    pub fn from_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> CaptionResult<Self> {
        let canvas = Canvas::new(width, height)?;
        if rgba8_premul.len() != canvas.byte_len() {
            return Err(CaptionError::validation(
                "source pixels must match width*height*4",
            ));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    pub fn natural_size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Resample to `target` with high-quality filtering, staying premultiplied.
    pub fn scaled_premul(&self, target: Canvas) -> CaptionResult<Vec<u8>> {
        if target.width == self.width && target.height == self.height {
            return Ok(self.rgba8_premul.as_ref().clone());
        }
        let src = image::RgbaImage::from_raw(
            self.width,
            self.height,
            self.rgba8_premul.as_ref().clone(),
        )
        .ok_or_else(|| CaptionError::surface("source pixel buffer has the wrong length"))?;
        let scaled = image::imageops::resize(
            &src,
            target.width,
            target.height,
            image::imageops::FilterType::CatmullRom,
        );
        let mut out = scaled.into_raw();
        // Bicubic overshoot can push color above alpha, which is invalid when premultiplied.
        for px in out.chunks_exact_mut(4) {
            let a = px[3];
            px[0] = px[0].min(a);
            px[1] = px[1].min(a);
            px[2] = px[2].min(a);
        }
        Ok(out)
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn decode_image(bytes: &[u8]) -> CaptionResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| CaptionError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(CaptionError::decode("image has no pixels"));
    }

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);
    tracing::debug!(width, height, "image decoded");

    Ok(SourceImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Split a base64 data URL into its media type and payload bytes.
pub fn parse_data_url(url: &str) -> CaptionResult<(String, Vec<u8>)> {
    let rest = url
        .trim()
        .strip_prefix("data:")
        .ok_or_else(|| CaptionError::decode("data URL must start with 'data:'"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| CaptionError::decode("data URL is missing ','"))?;
    let Some(mime) = meta.strip_suffix(";base64") else {
        return Err(CaptionError::decode("only base64 data URLs are supported"));
    };
    let mime = if mime.is_empty() {
        "text/plain".to_string()
    } else {
        mime.to_ascii_lowercase()
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| CaptionError::decode(format!("invalid base64 payload: {e}")))?;
    Ok((mime, bytes))
}

/// Encode bytes as a base64 data URL.
pub fn to_data_url(mime: &str, bytes: &[u8]) -> String {
    format!(
        "data:{mime};base64,{}",
        base64::engine::general_purpose::STANDARD.encode(bytes)
    )
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
