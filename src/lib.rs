#![forbid(unsafe_code)]
//! Image captioning: aspect-fit an image, wrap a styled caption over it, apply a filter preset
//! and export the result as PNG.

pub mod assets;
pub mod editor;
pub mod effects;
pub mod export;
pub mod foundation;
pub mod layout;
pub mod render;
pub mod style;
pub mod text;

pub use assets::SourceImage;
pub use editor::{Editor, EditorConfig};
pub use effects::filter::{FilterId, FilterOp, parse_css_filter};
pub use export::{ClipboardKind, ClipboardSink, export_image, open_clipboard};
pub use foundation::{
    core::{Canvas, Rgba8Premul},
    error::{CaptionError, CaptionResult},
};
pub use layout::{caption::layout_caption, fit::aspect_fit, wrap::wrap_caption};
pub use render::{Compositor, CornerStyle, FrameRGBA};
pub use style::{color::Color, state::StyleState};
pub use text::{TextRenderer, fonts::FontBook, shaper::TextShaper};
