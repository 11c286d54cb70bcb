use crate::{
    assets::SourceImage,
    effects::{apply::apply_filter_ops, filter::FilterId},
    foundation::{
        core::{Affine, Canvas, Rect, RoundedRect, Size},
        error::{CaptionError, CaptionResult},
    },
    layout::{
        caption::{CaptionLayout, CaptionMetrics, layout_caption},
        fit::{FitLayout, aspect_fit},
    },
    render::surface::{CpuSurface, FrameRGBA, image_paint, shape_to_cpu},
    style::{color::Color, state::StyleState},
    text::{LinePaint, StrokePaint, TextFace, TextRenderer, shaper::to_cpu_color},
};

/// Edge length of a filter thumbnail tile.
pub const THUMBNAIL_EDGE: u32 = 100;

/// Corner treatment of the caption background box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CornerStyle {
    #[default]
    Sharp,
    Rounded,
}

/// Draws the source image, its filter and the caption onto CPU surfaces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Compositor {
    /// Fill for the container area the image does not cover.
    pub letterbox: Color,
    pub corners: CornerStyle,
}

impl Default for Compositor {
    fn default() -> Self {
        Self {
            letterbox: Color::BLACK,
            corners: CornerStyle::Sharp,
        }
    }
}

/// One composite to draw.
struct Scene<'a> {
    canvas: Canvas,
    clear: Color,
    fit: FitLayout,
    filter: FilterId,
    /// Preview pixels per rendered pixel; multiplies caption metrics and blur lengths.
    scale: f64,
    style: Option<&'a StyleState>,
}

impl Compositor {
    pub fn new(letterbox: Color, corners: CornerStyle) -> Self {
        Self { letterbox, corners }
    }

    /// Live preview: the image aspect-fitted into `container` with letterbox fill.
    #[tracing::instrument(skip(self, source, style, text), fields(w = container.width, h = container.height))]
    pub fn render_preview(
        &self,
        source: &SourceImage,
        style: &StyleState,
        container: Size,
        text: &mut dyn TextRenderer,
    ) -> CaptionResult<(FrameRGBA, FitLayout)> {
        let canvas = Canvas::from_size(container)?;
        let fit = aspect_fit(source.natural_size(), canvas.size())?;
        let frame = self.compose(
            source,
            Scene {
                canvas,
                clear: self.letterbox,
                fit,
                filter: style.filter,
                scale: 1.0,
                style: Some(style),
            },
            text,
        )?;
        Ok((frame, fit))
    }

    /// Natural-resolution composite whose caption matches a preview drawn at
    /// `preview_rendered_width`.
    #[tracing::instrument(skip(self, source, style, text), fields(w = source.width, h = source.height))]
    pub fn render_full(
        &self,
        source: &SourceImage,
        style: &StyleState,
        preview_rendered_width: f64,
        text: &mut dyn TextRenderer,
    ) -> CaptionResult<FrameRGBA> {
        if !preview_rendered_width.is_finite() || preview_rendered_width <= 0.0 {
            return Err(CaptionError::validation(
                "preview rendered width must be finite and > 0",
            ));
        }
        let natural = source.natural_size();
        let canvas = Canvas::new(source.width, source.height)?;
        let scale = natural.width / preview_rendered_width;
        tracing::debug!(scale, "full resolution scale");

        self.compose(
            source,
            Scene {
                canvas,
                clear: Color::rgba(0, 0, 0, 0),
                fit: FitLayout::identity(natural),
                filter: style.filter,
                scale,
                style: Some(style),
            },
            text,
        )
    }

    /// 100×100 tile of the image on black, with `filter` applied to the whole tile.
    ///
    /// The band around the image is filtered too, so `invert` turns it white.
    pub fn render_thumbnail(
        &self,
        source: &SourceImage,
        filter: FilterId,
    ) -> CaptionResult<FrameRGBA> {
        let canvas = Canvas::new(THUMBNAIL_EDGE, THUMBNAIL_EDGE)?;
        let fit = aspect_fit(source.natural_size(), canvas.size())?;
        let mut tile = self.compose(
            source,
            Scene {
                canvas,
                clear: Color::BLACK,
                fit,
                filter: FilterId::None,
                scale: 1.0,
                style: None,
            },
            &mut NoText,
        )?;
        let ops = filter.ops();
        if !ops.is_empty() {
            apply_filter_ops(&mut tile.data, tile.width, tile.height, &ops, 1.0)?;
        }
        Ok(tile)
    }

    /// One thumbnail per filter preset, in menu order.
    #[tracing::instrument(skip(self, source))]
    pub fn render_thumbnails(
        &self,
        source: &SourceImage,
    ) -> CaptionResult<Vec<(FilterId, FrameRGBA)>> {
        FilterId::ALL
            .iter()
            .map(|&id| Ok((id, self.render_thumbnail(source, id)?)))
            .collect()
    }

    fn compose(
        &self,
        source: &SourceImage,
        scene: Scene<'_>,
        text: &mut dyn TextRenderer,
    ) -> CaptionResult<FrameRGBA> {
        let mut surface = CpuSurface::new(scene.canvas, scene.clear)?;

        let image_canvas = Canvas::from_size(scene.fit.rendered_size())?;
        let mut pixels = source.scaled_premul(image_canvas)?;
        let ops = scene.filter.ops();
        if !ops.is_empty() {
            apply_filter_ops(
                &mut pixels,
                image_canvas.width,
                image_canvas.height,
                &ops,
                scene.scale as f32,
            )?;
        }

        let paint = image_paint(&pixels, image_canvas)?;
        let ctx = &mut surface.ctx;
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_transform(affine_to_cpu(Affine::translate((
            scene.fit.offset_x.round(),
            scene.fit.offset_y.round(),
        ))));
        ctx.set_paint(paint);
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image_canvas.width),
            f64::from(image_canvas.height),
        ));
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        if let Some(style) = scene.style.filter(|s| s.has_caption()) {
            self.draw_caption(ctx, style, &scene.fit, scene.scale, text)?;
        }

        Ok(surface.finish())
    }

    fn draw_caption(
        &self,
        ctx: &mut vello_cpu::RenderContext,
        style: &StyleState,
        fit: &FitLayout,
        scale: f64,
        text: &mut dyn TextRenderer,
    ) -> CaptionResult<CaptionLayout> {
        let metrics = CaptionMetrics::new(
            f64::from(style.font_size_px),
            f64::from(style.stroke_width_px),
            scale,
        );
        text.select_face(&TextFace {
            family: style.font_family.clone(),
            size_px: metrics.font_size as f32,
            bold: style.bold,
            italic: style.italic,
        })?;
        let layout = layout_caption(text, &style.caption_text, fit, metrics);

        if let Some(fill) = style.background_fill() {
            ctx.set_paint(to_cpu_color(fill));
            match self.corners {
                CornerStyle::Sharp => ctx.fill_rect(&rect_to_cpu(layout.background)),
                CornerStyle::Rounded => {
                    let rounded =
                        RoundedRect::from_rect(layout.background, metrics.corner_radius);
                    ctx.fill_path(&shape_to_cpu(&rounded));
                }
            }
        }

        let paint = LinePaint {
            fill: style.text_color,
            stroke: (metrics.stroke_width > 0.0).then_some(StrokePaint {
                color: style.stroke_color,
                width: metrics.stroke_width,
            }),
        };
        for line in &layout.lines {
            text.draw_line(ctx, &line.text, line.origin(), &paint)?;
            if style.underline && line.width > 0.0 {
                ctx.set_paint(to_cpu_color(style.text_color));
                ctx.fill_rect(&rect_to_cpu(underline_rect(
                    line.origin().x,
                    line.baseline_y,
                    line.width,
                    metrics.font_size,
                )));
            }
        }
        Ok(layout)
    }
}

/// Bar under a line: `0.1em` below the baseline, `max(1, size/15)` thick.
pub fn underline_rect(left: f64, baseline_y: f64, width: f64, font_size: f64) -> Rect {
    let top = baseline_y + font_size * 0.1;
    let thickness = (font_size / 15.0).max(1.0);
    Rect::new(left, top, left + width, top + thickness)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

/// Stand-in renderer for composites that never draw text.
struct NoText;

impl crate::layout::wrap::TextMeasure for NoText {
    fn measure(&mut self, _text: &str) -> f64 {
        0.0
    }
}

impl TextRenderer for NoText {
    fn select_face(&mut self, _face: &TextFace) -> CaptionResult<()> {
        Ok(())
    }

    fn draw_line(
        &mut self,
        _ctx: &mut vello_cpu::RenderContext,
        _text: &str,
        _origin: crate::foundation::core::Point,
        _paint: &LinePaint,
    ) -> CaptionResult<()> {
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
