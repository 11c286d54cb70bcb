//! CPU compositing of the captioned image.

pub mod compositor;
pub mod surface;

pub use compositor::{Compositor, CornerStyle, THUMBNAIL_EDGE, underline_rect};
pub use surface::FrameRGBA;
