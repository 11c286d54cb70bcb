use crate::{
    foundation::{
        core::{Canvas, unpremultiply_rgba8_in_place},
        error::{CaptionError, CaptionResult},
    },
    style::color::Color,
    text::shaper::to_cpu_color,
};

/// A composited frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    /// Whether `data` holds premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    pub fn canvas(&self) -> CaptionResult<Canvas> {
        Canvas::new(self.width, self.height)
    }

    /// Straight-alpha copy as an `image` buffer.
    pub fn to_rgba_image(&self) -> CaptionResult<image::RgbaImage> {
        let mut data = self.data.clone();
        if self.premultiplied {
            unpremultiply_rgba8_in_place(&mut data);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| CaptionError::surface("frame byte length does not match its size"))
    }

    /// Pixel at `(x, y)` in stored form, `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Owned `vello_cpu` target with the matching render context.
pub(crate) struct CpuSurface {
    pub(crate) canvas: Canvas,
    pub(crate) ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    /// Allocate a surface whose first draw op fills it with `clear`.
    ///
    /// `render_to_pixmap` replaces every pixel of the target, so the fill has to be recorded in
    /// the context rather than written into the pixmap.
    pub(crate) fn new(canvas: Canvas, clear: Color) -> CaptionResult<Self> {
        let (w, h) = canvas.as_u16()?;
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        if clear.a > 0 {
            ctx.set_paint(to_cpu_color(clear));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(w),
                f64::from(h),
            ));
        }
        Ok(Self {
            canvas,
            ctx,
            pixmap: vello_cpu::Pixmap::new(w, h),
        })
    }

    /// Rasterize everything recorded in `ctx` and read the pixels back.
    pub(crate) fn finish(mut self) -> FrameRGBA {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
        FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

/// Image paint over premultiplied RGBA8 pixels.
pub(crate) fn image_paint(
    rgba8_premul: &[u8],
    canvas: Canvas,
) -> CaptionResult<vello_cpu::Image> {
    let (w, h) = canvas.as_u16()?;
    if rgba8_premul.len() != canvas.byte_len() {
        return Err(CaptionError::surface("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels: Vec<_> = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, may_have_opacities);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(std::sync::Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

/// Flatten any kurbo shape into the path type `vello_cpu` consumes.
pub(crate) fn shape_to_cpu(shape: &impl kurbo::Shape) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(0.1) {
        match el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
