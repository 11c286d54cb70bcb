use rayon::prelude::*;

use crate::{
    effects::filter::{FilterOp, normalize_ops},
    foundation::error::{CaptionError, CaptionResult},
};

/// Apply a filter chain in place to a premultiplied RGBA8 buffer.
///
/// `px_scale` converts blur lengths from CSS pixels into buffer pixels. Each primitive clamps its
/// output before the next one runs.
#[tracing::instrument(skip(rgba_premul, ops), fields(ops = ops.len()))]
pub fn apply_filter_ops(
    rgba_premul: &mut [u8],
    width: u32,
    height: u32,
    ops: &[FilterOp],
    px_scale: f32,
) -> CaptionResult<()> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CaptionError::surface("filter buffer size overflow"))?;
    if rgba_premul.len() != expected_len {
        return Err(CaptionError::validation(
            "filter expects a buffer matching width*height*4",
        ));
    }
    if width == 0 || height == 0 {
        return Ok(());
    }

    for op in normalize_ops(ops) {
        match op {
            FilterOp::Blur { std_dev_px } => {
                let sigma = std_dev_px * px_scale.max(0.0);
                let radius = blur_radius_for_sigma(sigma);
                if radius == 0 {
                    continue;
                }
                let out = blur_rgba8_premul(rgba_premul, width, height, radius, sigma)?;
                rgba_premul.copy_from_slice(&out);
            }
            other => {
                if let Some(m) = other.color_matrix() {
                    color_matrix_rgba8_premul_in_place(rgba_premul, width, m);
                }
            }
        }
    }
    Ok(())
}

/// Kernel half-width covering three standard deviations.
pub fn blur_radius_for_sigma(sigma: f32) -> u32 {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    (sigma * 3.0).ceil().min(256.0) as u32
}

fn color_matrix_rgba8_premul_in_place(rgba: &mut [u8], width: u32, m: [f32; 20]) {
    let row_len = (width as usize) * 4;
    rgba.par_chunks_mut(row_len).for_each(|row| {
        for px in row.chunks_exact_mut(4) {
            let out = color_matrix_px(px, &m);
            px.copy_from_slice(&out);
        }
    });
}

fn color_matrix_px(s: &[u8], m: &[f32; 20]) -> [u8; 4] {
    let pr = s[0] as f32 / 255.0;
    let pg = s[1] as f32 / 255.0;
    let pb = s[2] as f32 / 255.0;
    let pa = s[3] as f32 / 255.0;

    // Matrices operate on straight color.
    let inv_a = if pa > 0.0 { 1.0 / pa } else { 0.0 };
    let r = pr * inv_a;
    let g = pg * inv_a;
    let b = pb * inv_a;
    let a = pa;

    let out_r = (m[0] * r + m[1] * g + m[2] * b + m[3] * a + m[4]).clamp(0.0, 1.0);
    let out_g = (m[5] * r + m[6] * g + m[7] * b + m[8] * a + m[9]).clamp(0.0, 1.0);
    let out_b = (m[10] * r + m[11] * g + m[12] * b + m[13] * a + m[14]).clamp(0.0, 1.0);
    let out_a = (m[15] * r + m[16] * g + m[17] * b + m[18] * a + m[19]).clamp(0.0, 1.0);

    [
        (out_r * out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        (out_g * out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        (out_b * out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// Separable Gaussian blur with edge clamping and Q16 fixed-point weights.
pub fn blur_rgba8_premul(
    src: &[u8],
    width: u32,
    height: u32,
    radius: u32,
    sigma: f32,
) -> CaptionResult<Vec<u8>> {
    let expected_len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CaptionError::surface("blur buffer size overflow"))?;
    if src.len() != expected_len {
        return Err(CaptionError::validation(
            "blur_rgba8_premul expects src matching width*height*4",
        ));
    }
    if radius == 0 || expected_len == 0 {
        return Ok(src.to_vec());
    }

    let kernel = gaussian_kernel_q16(radius, sigma)?;
    let mut tmp = vec![0u8; expected_len];
    let mut out = vec![0u8; expected_len];

    horizontal_pass(src, &mut tmp, width, &kernel);
    vertical_pass(&tmp, &mut out, width, height, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> CaptionResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(CaptionError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Rounding drift goes to the center tap so weights sum to exactly 1.0.
    let delta = 65536 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &[u8], dst: &mut [u8], width: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let w = width as i32;
    let row_len = (width as usize) * 4;
    dst.par_chunks_mut(row_len)
        .zip(src.par_chunks(row_len))
        .for_each(|(dst_row, src_row)| {
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = (x + ki as i32 - radius).clamp(0, w - 1);
                    let idx = (sx as usize) * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src_row[idx + c]);
                    }
                }
                let out_idx = (x as usize) * 4;
                for c in 0..4 {
                    dst_row[out_idx + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &[u8], dst: &mut [u8], width: u32, height: u32, k: &[u32]) {
    let radius = (k.len() / 2) as i32;
    let h = height as i32;
    let row_len = (width as usize) * 4;
    dst.par_chunks_mut(row_len)
        .enumerate()
        .for_each(|(y, dst_row)| {
            let y = y as i32;
            for x in 0..width as usize {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = (y + ki as i32 - radius).clamp(0, h - 1);
                    let idx = (sy as usize) * row_len + x * 4;
                    for c in 0..4 {
                        acc[c] += u64::from(kw) * u64::from(src[idx + c]);
                    }
                }
                for c in 0..4 {
                    dst_row[x * 4 + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    v.min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/effects/apply.rs"]
mod tests;
