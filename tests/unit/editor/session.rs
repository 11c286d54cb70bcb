use super::*;
use crate::{
    foundation::core::Point,
    layout::wrap::{FixedAdvance, TextMeasure},
    style::color::Color,
    text::{LinePaint, TextFace},
};

#[derive(Default)]
struct CountingText {
    size: f64,
    drawn: usize,
}

impl TextMeasure for CountingText {
    fn measure(&mut self, text: &str) -> f64 {
        FixedAdvance::for_font_size(self.size).measure(text)
    }
}

impl TextRenderer for CountingText {
    fn select_face(&mut self, face: &TextFace) -> CaptionResult<()> {
        self.size = f64::from(face.size_px);
        Ok(())
    }

    fn draw_line(
        &mut self,
        _ctx: &mut vello_cpu::RenderContext,
        _text: &str,
        _origin: Point,
        _paint: &LinePaint,
    ) -> CaptionResult<()> {
        self.drawn += 1;
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSink {
    sizes: Vec<(u32, u32)>,
}

impl ClipboardSink for RecordingSink {
    fn name(&self) -> &str {
        "recording"
    }

    fn copy_image(&mut self, img: &image::RgbaImage) -> CaptionResult<()> {
        self.sizes.push(img.dimensions());
        Ok(())
    }
}

fn editor_with_image(width: u32, height: u32) -> Editor<CountingText> {
    let mut editor = Editor::with_renderer(EditorConfig::default(), CountingText::default());
    let px = [10u8, 20, 30, 255].repeat((width * height) as usize);
    editor.set_image(SourceImage::from_premul(width, height, px).unwrap());
    editor
}

#[test]
fn operations_without_image_fail_validation() {
    let mut editor = Editor::with_renderer(EditorConfig::default(), CountingText::default());
    assert!(matches!(
        editor.preview().unwrap_err(),
        CaptionError::Validation(_)
    ));
    let err = editor.render_export(1.0).unwrap_err();
    assert_eq!(err.user_message("Export"), "Export failed: no image loaded");
    assert!(editor.thumbnails().is_err());
}

#[test]
fn preview_uses_configured_container() {
    let mut editor = editor_with_image(300, 100);
    let frame = editor.preview().unwrap();
    assert_eq!((frame.width, frame.height), (900, 600));

    let fit = editor.preview_fit().unwrap();
    assert_eq!(fit.rendered_width, 900.0);
    assert_eq!(fit.offset_y, 150.0);
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
}

#[test]
fn export_is_natural_size_times_download_scale() {
    let mut editor = editor_with_image(300, 100);
    editor.style_mut().set_caption_text("hello world");
    let img = editor.render_export(editor.config().download_scale).unwrap();
    assert_eq!(img.dimensions(), (600, 200));
    assert_eq!(editor.text_renderer().drawn, 1);
}

#[test]
fn export_to_dir_writes_png() {
    let dir = std::env::temp_dir().join(format!("captioner_session_{}", std::process::id()));
    let mut editor = editor_with_image(8, 4);
    editor.config_mut().download_scale = 1.0;

    let path = editor.export_to_dir(Some(&dir)).unwrap();
    let written = image::open(&path).unwrap().to_rgba8();
    assert_eq!(written.dimensions(), (8, 4));
    assert_eq!(written.get_pixel(3, 2).0, [10, 20, 30, 255]);
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn copy_uses_clipboard_scale() {
    let mut editor = editor_with_image(30, 20);
    let mut sink = RecordingSink::default();
    editor.copy_to_clipboard(&mut sink).unwrap();
    assert_eq!(sink.sizes, vec![(30, 20)]);
}

#[test]
fn reset_clears_image_and_style() {
    let mut editor = editor_with_image(4, 4);
    editor.style_mut().set_caption_text("caption");
    editor.style_mut().background_color = Color::WHITE;
    editor.style_mut().filter = FilterId::Sepia;

    editor.reset();
    assert!(editor.source().is_none());
    assert_eq!(editor.style(), &StyleState::default());
}

#[test]
fn set_style_normalizes() {
    let mut editor = editor_with_image(4, 4);
    let mut style = StyleState::default();
    style.font_size_px = 500.0;
    editor.set_style(style);
    assert_eq!(editor.style().font_size_px, 120.0);
}

#[test]
fn thumbnails_follow_filter_order() {
    let editor = editor_with_image(10, 10);
    let ids: Vec<_> = editor.thumbnails().unwrap().into_iter().map(|(id, _)| id).collect();
    assert_eq!(ids, FilterId::ALL.to_vec());
}
