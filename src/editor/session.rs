use std::path::{Path, PathBuf};

use crate::{
    assets::SourceImage,
    editor::config::EditorConfig,
    effects::filter::FilterId,
    export::{ClipboardSink, export_image, write_png},
    foundation::error::{CaptionError, CaptionResult},
    layout::fit::{FitLayout, aspect_fit},
    render::{Compositor, FrameRGBA},
    style::state::StyleState,
    text::{TextRenderer, fonts::FontBook, shaper::TextShaper},
};

/// One editing session: the loaded image, its style and the text renderer.
pub struct Editor<R = TextShaper> {
    config: EditorConfig,
    style: StyleState,
    source: Option<SourceImage>,
    text: R,
}

impl Editor<TextShaper> {
    /// Session using system fonts plus `config.fonts_dir`.
    pub fn new(config: EditorConfig) -> Self {
        let book = FontBook::load(&config.font_dirs());
        Self::with_renderer(config, TextShaper::new(book))
    }
}

impl<R: TextRenderer> Editor<R> {
    pub fn with_renderer(config: EditorConfig, text: R) -> Self {
        Self {
            config,
            style: StyleState::default(),
            source: None,
            text,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut EditorConfig {
        &mut self.config
    }

    pub fn style(&self) -> &StyleState {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut StyleState {
        &mut self.style
    }

    pub fn set_style(&mut self, style: StyleState) {
        self.style = style.normalized();
    }

    pub fn source(&self) -> Option<&SourceImage> {
        self.source.as_ref()
    }

    pub fn text_renderer(&self) -> &R {
        &self.text
    }

    pub fn set_image(&mut self, source: SourceImage) {
        tracing::debug!(width = source.width, height = source.height, "image loaded");
        self.source = Some(source);
    }

    /// Decode a path or data URL and make it the current image.
    pub fn load_image(&mut self, source: &str) -> CaptionResult<()> {
        let img = SourceImage::open(source)?;
        self.set_image(img);
        Ok(())
    }

    /// Drop the image and return every style field to its default.
    pub fn reset(&mut self) {
        self.source = None;
        self.style.reset();
    }

    fn compositor(&self) -> Compositor {
        Compositor::new(self.config.letterbox_color, self.config.corner_style)
    }

    fn require_source(&self) -> CaptionResult<&SourceImage> {
        self.source
            .as_ref()
            .ok_or_else(|| CaptionError::validation("no image loaded"))
    }

    /// Placement of the image inside the preview container.
    pub fn preview_fit(&self) -> CaptionResult<FitLayout> {
        let source = self.require_source()?;
        aspect_fit(source.natural_size(), self.config.preview.to_size())
    }

    pub fn preview(&mut self) -> CaptionResult<FrameRGBA> {
        let compositor = self.compositor();
        let container = self.config.preview.to_size();
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| CaptionError::validation("no image loaded"))?;
        let (frame, _) = compositor.render_preview(source, &self.style, container, &mut self.text)?;
        Ok(frame)
    }

    /// Full-resolution composite, cropped and resampled by `factor`.
    #[tracing::instrument(skip(self))]
    pub fn render_export(&mut self, factor: f64) -> CaptionResult<image::RgbaImage> {
        let fit = self.preview_fit()?;
        let compositor = self.compositor();
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| CaptionError::validation("no image loaded"))?;
        let frame =
            compositor.render_full(source, &self.style, fit.rendered_width, &mut self.text)?;
        export_image(&frame, source.natural_size(), factor)
    }

    /// Write `captioned-image-<ms>.png` into `dir` (or the configured output dir).
    pub fn export_to_dir(&mut self, dir: Option<&Path>) -> CaptionResult<PathBuf> {
        let img = self.render_export(self.config.download_scale)?;
        let dir = dir.map_or_else(|| self.config.output_dir.clone(), Path::to_path_buf);
        write_png(&dir, &img)
    }

    pub fn copy_to_clipboard(&mut self, sink: &mut dyn ClipboardSink) -> CaptionResult<()> {
        let img = self.render_export(self.config.clipboard_scale)?;
        sink.copy_image(&img)?;
        tracing::info!(sink = sink.name(), "copied to clipboard");
        Ok(())
    }

    pub fn thumbnails(&self) -> CaptionResult<Vec<(FilterId, FrameRGBA)>> {
        self.compositor().render_thumbnails(self.require_source()?)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
