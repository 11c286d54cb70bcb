//! Font resolution and caption text drawing.
//!
//! [`TextRenderer`] is the seam between caption layout and the font stack: the compositor only
//! measures strings and asks for lines to be drawn at a baseline origin.

/// Installed/user font lookup by CSS family lists.
pub mod fonts;
/// Parley-shaped glyph runs drawn with `vello_cpu`.
pub mod shaper;

use crate::{
    foundation::{core::Point, error::CaptionResult},
    layout::wrap::TextMeasure,
    style::color::Color,
};

/// Face request derived from the style state and render scale.
#[derive(Clone, Debug, PartialEq)]
pub struct TextFace {
    pub family: String,
    pub size_px: f32,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokePaint {
    pub color: Color,
    pub width: f64,
}

/// How one caption line is painted: optional outline first, then fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinePaint {
    pub fill: Color,
    pub stroke: Option<StrokePaint>,
}

/// Measures and draws single lines of caption text.
pub trait TextRenderer: TextMeasure {
    /// Select the face used by subsequent `measure`/`draw_line` calls.
    fn select_face(&mut self, face: &TextFace) -> CaptionResult<()>;

    /// Draw `text` with its left edge at `origin.x` and alphabetic baseline at `origin.y`.
    fn draw_line(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        text: &str,
        origin: Point,
        paint: &LinePaint,
    ) -> CaptionResult<()>;
}
