use crate::foundation::error::{CaptionError, CaptionResult};

pub use kurbo::{Affine, Point, Rect, RoundedRect, Size, Vec2};

/// Integer pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Largest edge the CPU rasterizer can address.
    pub const MAX_EDGE: u32 = u16::MAX as u32;

    pub fn new(width: u32, height: u32) -> CaptionResult<Self> {
        if width == 0 || height == 0 {
            return Err(CaptionError::validation(format!(
                "canvas must be non-empty, got {width}x{height}"
            )));
        }
        Ok(Self { width, height })
    }

    /// Round a fractional size to the nearest non-empty pixel canvas.
    pub fn from_size(size: Size) -> CaptionResult<Self> {
        if !size.width.is_finite() || !size.height.is_finite() {
            return Err(CaptionError::validation("canvas size must be finite"));
        }
        let w = size.width.round().max(1.0);
        let h = size.height.round().max(1.0);
        if w > f64::from(u32::MAX) || h > f64::from(u32::MAX) {
            return Err(CaptionError::validation("canvas size overflows u32"));
        }
        Self::new(w as u32, h as u32)
    }

    pub fn size(self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Dimensions as the `u16` pair used by `vello_cpu`.
    pub fn as_u16(self) -> CaptionResult<(u16, u16)> {
        let w: u16 = self.width.try_into().map_err(|_| {
            CaptionError::surface(format!("surface width {} exceeds u16", self.width))
        })?;
        let h: u16 = self.height.try_into().map_err(|_| {
            CaptionError::surface(format!("surface height {} exceeds u16", self.height))
        })?;
        Ok((w, h))
    }

    pub fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        let [r, g, b, a] = premul_px([r, g, b, a]);
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

pub(crate) fn premul_px(px: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = px;
    let a16 = u16::from(a);
    let premul = |c: u8| -> u8 { (((u16::from(c) * a16) + 127) / 255) as u8 };
    [premul(r), premul(g), premul(b), a]
}

pub(crate) fn unpremul_px(px: [u8; 4]) -> [u8; 4] {
    let [r, g, b, a] = px;
    if a == 0 {
        return [0, 0, 0, 0];
    }
    if a == 255 {
        return px;
    }
    let a32 = u32::from(a);
    let unpremul = |c: u8| -> u8 { ((u32::from(c) * 255 + a32 / 2) / a32).min(255) as u8 };
    [unpremul(r), unpremul(g), unpremul(b), a]
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let out = premul_px([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}

pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let out = unpremul_px([px[0], px[1], px[2], px[3]]);
        px.copy_from_slice(&out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
