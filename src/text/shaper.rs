use std::{borrow::Cow, collections::HashMap};

use crate::{
    foundation::{
        core::Point,
        error::{CaptionError, CaptionResult},
    },
    layout::wrap::{FixedAdvance, TextMeasure},
    style::color::Color,
    text::{LinePaint, TextFace, TextRenderer, fonts::FontBook},
};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct FaceKey {
    family_css: String,
    bold: bool,
    italic: bool,
}

/// A resolved face with its own font collection so shaping can only pick this face.
struct LoadedFace {
    font_ctx: parley::FontContext,
    family_name: String,
    font: vello_cpu::peniko::FontData,
}

/// [`TextRenderer`] backed by Parley shaping and `vello_cpu` glyph rasterization.
pub struct TextShaper {
    book: FontBook,
    layout_ctx: parley::LayoutContext<()>,
    faces: HashMap<FaceKey, LoadedFace>,
    current: Option<(FaceKey, f32)>,
}

impl TextShaper {
    pub fn new(book: FontBook) -> Self {
        Self {
            book,
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
            current: None,
        }
    }

    pub fn font_book(&self) -> &FontBook {
        &self.book
    }

    /// Family name of the currently selected face, as registered with the shaper.
    pub fn current_family(&self) -> Option<&str> {
        let (key, _) = self.current.as_ref()?;
        self.faces.get(key).map(|f| f.family_name.as_str())
    }

    fn load_face(&mut self, key: &FaceKey) -> CaptionResult<()> {
        if self.faces.contains_key(key) {
            return Ok(());
        }
        let resolved = self.book.resolve(&key.family_css, key.bold, key.italic)?;

        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(resolved.data.as_ref().clone()),
            None,
        );
        let family_id = families
            .iter()
            .find(|(_, fonts)| fonts.iter().any(|f| f.index() == resolved.index))
            .or_else(|| families.first())
            .map(|(id, _)| *id)
            .ok_or_else(|| CaptionError::font("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| CaptionError::font("registered font family has no name"))?
            .to_string();

        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(resolved.data.as_ref().clone()),
            resolved.index,
        );
        self.faces.insert(
            key.clone(),
            LoadedFace {
                font_ctx,
                family_name,
                font,
            },
        );
        Ok(())
    }

    /// Single-line layout of `text` in the selected face.
    fn layout_line(&mut self, text: &str) -> CaptionResult<(parley::Layout<()>, &LoadedFace)> {
        let (key, size_px) = self
            .current
            .clone()
            .ok_or_else(|| CaptionError::font("no text face selected"))?;
        let face = self
            .faces
            .get_mut(&key)
            .ok_or_else(|| CaptionError::font("selected face is not loaded"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut face.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(Cow::Owned(face.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        Ok((layout, face))
    }
}

impl TextMeasure for TextShaper {
    fn measure(&mut self, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let measured = self
            .layout_line(text)
            .map(|(layout, _)| f64::from(layout.width()));
        match measured {
            Ok(width) => width,
            Err(e) => {
                let size = self.current.as_ref().map_or(16.0, |(_, s)| *s);
                tracing::debug!(error = %e, "measuring without a face, using fixed advance");
                FixedAdvance::for_font_size(f64::from(size)).measure(text)
            }
        }
    }
}

impl TextRenderer for TextShaper {
    fn select_face(&mut self, face: &TextFace) -> CaptionResult<()> {
        if !face.size_px.is_finite() || face.size_px <= 0.0 {
            return Err(CaptionError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let key = FaceKey {
            family_css: face.family.clone(),
            bold: face.bold,
            italic: face.italic,
        };
        self.load_face(&key)?;
        self.current = Some((key, face.size_px));
        Ok(())
    }

    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: Point,
        paint: &LinePaint,
    ) -> CaptionResult<()> {
        if text.trim().is_empty() {
            return Ok(());
        }
        let (layout, face) = self.layout_line(text)?;
        let Some(line) = layout.lines().next() else {
            return Ok(());
        };
        let baseline = f64::from(line.metrics().baseline);

        let mut runs = Vec::<(f32, Vec<vello_cpu::Glyph>)>::new();
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run
                .positioned_glyphs()
                .map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                })
                .collect();
            runs.push((run.run().font_size(), glyphs));
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            origin.x,
            origin.y - baseline,
        )));

        // The whole outline goes down before any fill so fills are never covered by a
        // neighbouring run's stroke.
        if let Some(stroke) = paint.stroke.filter(|s| s.width > 0.0) {
            ctx.set_stroke(
                vello_cpu::kurbo::Stroke::new(stroke.width)
                    .with_join(vello_cpu::kurbo::Join::Round)
                    .with_miter_limit(2.0),
            );
            ctx.set_paint(to_cpu_color(stroke.color));
            for (font_size, glyphs) in &runs {
                ctx.glyph_run(&face.font)
                    .font_size(*font_size)
                    .stroke_glyphs(glyphs.clone().into_iter());
            }
        }

        ctx.set_paint(to_cpu_color(paint.fill));
        for (font_size, glyphs) in runs {
            ctx.glyph_run(&face.font)
                .font_size(font_size)
                .fill_glyphs(glyphs.into_iter());
        }

        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

pub(crate) fn to_cpu_color(c: Color) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/text/shaper.rs"]
mod tests;
