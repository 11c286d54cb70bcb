use std::{
    io::Cursor,
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use anyhow::Context;

use crate::{
    foundation::{
        core::Size,
        error::{CaptionError, CaptionResult},
    },
    layout::fit::aspect_fit,
    render::FrameRGBA,
};

/// Prefix of downloaded file names.
pub const FILE_NAME_PREFIX: &str = "captioned-image-";

/// Cut the image region out of a composite and resample it by `factor`.
///
/// The image placement inside `frame` is recomputed from `natural`, so letterbox bands of a
/// container-sized frame are dropped. A natural-size frame passes through uncropped.
#[tracing::instrument(skip(frame), fields(w = frame.width, h = frame.height))]
pub fn export_image(
    frame: &FrameRGBA,
    natural: Size,
    factor: f64,
) -> CaptionResult<image::RgbaImage> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(CaptionError::validation(format!(
            "export scale must be finite and > 0, got {factor}"
        )));
    }
    let canvas = frame.canvas()?;
    let fit = aspect_fit(natural, canvas.size())?;

    let x = (fit.offset_x.round() as u32).min(canvas.width - 1);
    let y = (fit.offset_y.round() as u32).min(canvas.height - 1);
    let w = (fit.rendered_width.round() as u32).clamp(1, canvas.width - x);
    let h = (fit.rendered_height.round() as u32).clamp(1, canvas.height - y);

    let full = frame.to_rgba_image()?;
    let cropped = if (x, y, w, h) == (0, 0, canvas.width, canvas.height) {
        full
    } else {
        image::imageops::crop_imm(&full, x, y, w, h).to_image()
    };

    if factor == 1.0 {
        return Ok(cropped);
    }
    let out_w = (f64::from(w) * factor).round().max(1.0) as u32;
    let out_h = (f64::from(h) * factor).round().max(1.0) as u32;
    tracing::debug!(out_w, out_h, factor, "resampling export");
    Ok(image::imageops::resize(
        &cropped,
        out_w,
        out_h,
        image::imageops::FilterType::CatmullRom,
    ))
}

pub fn encode_png(img: &image::RgbaImage) -> CaptionResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| CaptionError::encode(format!("encode png: {e}")))?;
    Ok(buf)
}

/// `captioned-image-<unix-millis>.png`
pub fn export_file_name(unix_millis: u128) -> String {
    format!("{FILE_NAME_PREFIX}{unix_millis}.png")
}

pub fn unix_millis_now() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}

/// Encode `img` and write it into `dir` under a timestamped name.
#[tracing::instrument(skip(img), fields(dir = %dir.display()))]
pub fn write_png(dir: &Path, img: &image::RgbaImage) -> CaptionResult<PathBuf> {
    let bytes = encode_png(img)?;
    std::fs::create_dir_all(dir)
        .with_context(|| format!("create output dir '{}'", dir.display()))?;
    let path = dir.join(export_file_name(unix_millis_now()));
    std::fs::write(&path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    tracing::info!(path = %path.display(), "export written");
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/unit/export/pipeline.rs"]
mod tests;
