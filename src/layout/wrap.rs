/// Horizontal advance of a run of text in the currently selected face.
pub trait TextMeasure {
    fn measure(&mut self, text: &str) -> f64;
}

/// Measures every `char` with the same advance. Useful where glyph metrics do not matter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedAdvance {
    pub advance_px: f64,
}

impl FixedAdvance {
    /// Typical average advance of a proportional face: `0.6 * font_size`.
    pub fn for_font_size(font_size_px: f64) -> Self {
        Self {
            advance_px: font_size_px * 0.6,
        }
    }
}

impl TextMeasure for FixedAdvance {
    fn measure(&mut self, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance_px
    }
}

/// Split on explicit line breaks, then greedily wrap each paragraph to `max_width`.
///
/// A paragraph that is blank after trimming yields exactly one empty line, so vertical spacing
/// typed by the user survives.
pub fn wrap_caption<M: TextMeasure + ?Sized>(
    measure: &mut M,
    caption: &str,
    max_width: f64,
) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in caption.split('\n') {
        let paragraph = paragraph.strip_suffix('\r').unwrap_or(paragraph);
        if paragraph.trim().is_empty() {
            lines.push(String::new());
        } else {
            lines.extend(wrap_paragraph(measure, paragraph, max_width));
        }
    }
    lines
}

/// Greedy word wrap on single spaces.
///
/// A word moves to a new line only when appending it would exceed `max_width` and the current
/// line is non-empty, so a single word wider than `max_width` still gets its own line.
pub fn wrap_paragraph<M: TextMeasure + ?Sized>(
    measure: &mut M,
    text: &str,
    max_width: f64,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split(' ') {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if measure.measure(&candidate) > max_width && !current.is_empty() {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        } else {
            current = candidate;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/wrap.rs"]
mod tests;
