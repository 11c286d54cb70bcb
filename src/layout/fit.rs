use crate::foundation::{
    core::{Rect, Size},
    error::{CaptionError, CaptionResult},
};

/// Placement of an aspect-fitted image inside a container.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FitLayout {
    pub rendered_width: f64,
    pub rendered_height: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl FitLayout {
    /// Identity placement: the content fills a canvas of its own size.
    pub fn identity(size: Size) -> Self {
        Self {
            rendered_width: size.width,
            rendered_height: size.height,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn rendered_size(&self) -> Size {
        Size::new(self.rendered_width, self.rendered_height)
    }

    /// Content rectangle in container coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.offset_x + self.rendered_width,
            self.offset_y + self.rendered_height,
        )
    }

    /// Whether the container shows letterbox bands around the content.
    pub fn has_letterbox(&self) -> bool {
        self.offset_x > 0.0 || self.offset_y > 0.0
    }
}

/// Scale `natural` to fit entirely inside `container`, preserving aspect ratio, centered.
///
/// When the content is relatively wider than the container the width matches exactly,
/// otherwise the height does.
pub fn aspect_fit(natural: Size, container: Size) -> CaptionResult<FitLayout> {
    check_size("natural", natural)?;
    check_size("container", container)?;

    let img_aspect = natural.width / natural.height;
    let container_aspect = container.width / container.height;

    let (rendered_width, rendered_height) = if img_aspect > container_aspect {
        (container.width, container.width / img_aspect)
    } else {
        (container.height * img_aspect, container.height)
    };

    Ok(FitLayout {
        rendered_width,
        rendered_height,
        offset_x: (container.width - rendered_width) / 2.0,
        offset_y: (container.height - rendered_height) / 2.0,
    })
}

fn check_size(what: &str, s: Size) -> CaptionResult<()> {
    if !(s.width.is_finite() && s.height.is_finite()) || s.width <= 0.0 || s.height <= 0.0 {
        return Err(CaptionError::validation(format!(
            "{what} size must be finite and > 0, got {}x{}",
            s.width, s.height
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
