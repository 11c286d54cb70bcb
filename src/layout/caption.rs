use crate::{
    foundation::core::{Point, Rect},
    layout::{
        fit::FitLayout,
        wrap::{TextMeasure, wrap_caption},
    },
};

/// Fraction of the rendered image width available to a caption line.
pub const MAX_WIDTH_RATIO: f64 = 0.9;
/// Line advance as a multiple of the font size.
pub const LINE_HEIGHT_RATIO: f64 = 1.2;
/// Baseline position within a line box, as a fraction of the line height.
pub const BASELINE_RATIO: f64 = 0.8;

const PADDING_X: f64 = 16.0;
const PADDING_Y: f64 = 8.0;
const BOTTOM_MARGIN: f64 = 24.0;
const CORNER_RADIUS: f64 = 8.0;

/// Caption box geometry in preview pixels, multiplied by a render scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CaptionMetrics {
    pub scale: f64,
    pub font_size: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub padding_y: f64,
    pub bottom_margin: f64,
    pub stroke_width: f64,
    pub corner_radius: f64,
}

impl CaptionMetrics {
    pub fn new(font_size_px: f64, stroke_width_px: f64, scale: f64) -> Self {
        let font_size = font_size_px * scale;
        Self {
            scale,
            font_size,
            line_height: font_size * LINE_HEIGHT_RATIO,
            padding_x: PADDING_X * scale,
            padding_y: PADDING_Y * scale,
            bottom_margin: BOTTOM_MARGIN * scale,
            stroke_width: stroke_width_px * scale,
            corner_radius: CORNER_RADIUS * scale,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CaptionLine {
    pub text: String,
    pub width: f64,
    /// Horizontal center of the line.
    pub center_x: f64,
    /// Alphabetic baseline.
    pub baseline_y: f64,
}

impl CaptionLine {
    /// Left edge of the line's ink box.
    pub fn origin(&self) -> Point {
        Point::new(self.center_x - self.width / 2.0, self.baseline_y)
    }
}

/// Wrapped and positioned caption block.
#[derive(Clone, Debug, PartialEq)]
pub struct CaptionLayout {
    pub metrics: CaptionMetrics,
    pub max_width: f64,
    pub lines: Vec<CaptionLine>,
    /// Box behind the text: widest line plus horizontal padding, all lines plus vertical padding.
    pub background: Rect,
}

impl CaptionLayout {
    pub fn block_height(&self) -> f64 {
        self.lines.len() as f64 * self.metrics.line_height
    }

    pub fn widest_line(&self) -> f64 {
        self.lines.iter().map(|l| l.width).fold(0.0, f64::max)
    }
}

/// Wrap `caption` and anchor it horizontally centered near the bottom of `fit`.
///
/// `measure` must already be configured for `metrics.font_size`.
pub fn layout_caption<M: TextMeasure + ?Sized>(
    measure: &mut M,
    caption: &str,
    fit: &FitLayout,
    metrics: CaptionMetrics,
) -> CaptionLayout {
    let max_width = fit.rendered_width * MAX_WIDTH_RATIO;
    let texts = wrap_caption(measure, caption, max_width);
    let widths: Vec<f64> = texts.iter().map(|t| measure.measure(t)).collect();

    let max_text_width = widths.iter().copied().fold(0.0, f64::max);
    let text_height = texts.len() as f64 * metrics.line_height;
    let bg_width = max_text_width + metrics.padding_x * 2.0;
    let bg_height = text_height + metrics.padding_y * 2.0;

    let center_x = fit.offset_x + fit.rendered_width / 2.0;
    let bg_x = center_x - bg_width / 2.0;
    let bg_y = fit.offset_y + fit.rendered_height - metrics.bottom_margin - bg_height;

    let lines = texts
        .into_iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (text, width))| CaptionLine {
            text,
            width,
            center_x,
            baseline_y: bg_y + metrics.padding_y + (i as f64 + BASELINE_RATIO) * metrics.line_height,
        })
        .collect();

    tracing::debug!(
        max_width,
        bg_width,
        bg_height,
        bg_x,
        bg_y,
        "caption layout"
    );

    CaptionLayout {
        metrics,
        max_width,
        lines,
        background: Rect::new(bg_x, bg_y, bg_x + bg_width, bg_y + bg_height),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/caption.rs"]
mod tests;
