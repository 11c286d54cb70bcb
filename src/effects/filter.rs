use serde::{Deserialize, Serialize};

use crate::foundation::error::{CaptionError, CaptionResult};

/// Named image filter presets offered by the editor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum FilterId {
    #[default]
    None,
    Cinematic,
    Grainy,
    Grayscale,
    Sepia,
    Blur,
    Brightness,
    Contrast,
    Saturate,
    Invert,
}

impl FilterId {
    /// All presets in picker order.
    pub const ALL: [FilterId; 10] = [
        FilterId::None,
        FilterId::Cinematic,
        FilterId::Grainy,
        FilterId::Grayscale,
        FilterId::Sepia,
        FilterId::Blur,
        FilterId::Brightness,
        FilterId::Contrast,
        FilterId::Saturate,
        FilterId::Invert,
    ];

    /// Resolve an identifier; unknown identifiers fall back to [`FilterId::None`].
    pub fn from_id(id: &str) -> Self {
        match id.trim().to_ascii_lowercase().as_str() {
            "cinematic" => Self::Cinematic,
            "grainy" => Self::Grainy,
            "grayscale" => Self::Grayscale,
            "sepia" => Self::Sepia,
            "blur" => Self::Blur,
            "brightness" => Self::Brightness,
            "contrast" => Self::Contrast,
            "saturate" => Self::Saturate,
            "invert" => Self::Invert,
            "none" => Self::None,
            other => {
                tracing::warn!(filter = other, "unknown filter id, using none");
                Self::None
            }
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Cinematic => "cinematic",
            Self::Grainy => "grainy",
            Self::Grayscale => "grayscale",
            Self::Sepia => "sepia",
            Self::Blur => "blur",
            Self::Brightness => "brightness",
            Self::Contrast => "contrast",
            Self::Saturate => "saturate",
            Self::Invert => "invert",
        }
    }

    /// Human label shown next to filter thumbnails.
    pub fn label(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Cinematic => "Cinematic",
            Self::Grainy => "Grainy",
            Self::Grayscale => "Grayscale",
            Self::Sepia => "Sepia",
            Self::Blur => "Blur",
            Self::Brightness => "Bright",
            Self::Contrast => "Contrast",
            Self::Saturate => "Saturate",
            Self::Invert => "Invert",
        }
    }

    /// Canvas `filter` string equivalent.
    pub fn css(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Cinematic => "contrast(1.4) saturate(1.3) brightness(0.95)",
            Self::Grainy => "saturate(0.6) brightness(1.1) contrast(0.9)",
            Self::Grayscale => "grayscale(100%)",
            Self::Sepia => "sepia(100%)",
            Self::Blur => "blur(4px)",
            Self::Brightness => "brightness(1.2)",
            Self::Contrast => "contrast(1.2)",
            Self::Saturate => "saturate(1.5)",
            Self::Invert => "invert(100%)",
        }
    }

    /// Primitive chain applied in order.
    pub fn ops(self) -> Vec<FilterOp> {
        use FilterOp::*;
        match self {
            Self::None => Vec::new(),
            Self::Cinematic => vec![Contrast(1.4), Saturate(1.3), Brightness(0.95)],
            Self::Grainy => vec![Saturate(0.6), Brightness(1.1), Contrast(0.9)],
            Self::Grayscale => vec![Grayscale(1.0)],
            Self::Sepia => vec![Sepia(1.0)],
            Self::Blur => vec![Blur { std_dev_px: 4.0 }],
            Self::Brightness => vec![Brightness(1.2)],
            Self::Contrast => vec![Contrast(1.2)],
            Self::Saturate => vec![Saturate(1.5)],
            Self::Invert => vec![Invert(1.0)],
        }
    }
}

impl From<String> for FilterId {
    fn from(value: String) -> Self {
        Self::from_id(&value)
    }
}

/// One CSS filter primitive.
///
/// Amount-style primitives (`grayscale`, `sepia`, `invert`) take a fraction in `[0, 1]`;
/// multiplier primitives take a non-negative factor. Blur lengths are in CSS pixels of the
/// surface the filter is drawn onto.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FilterOp {
    Grayscale(f32),
    Sepia(f32),
    Saturate(f32),
    Brightness(f32),
    Contrast(f32),
    Invert(f32),
    Blur { std_dev_px: f32 },
}

impl FilterOp {
    pub fn css(self) -> String {
        match self {
            Self::Grayscale(a) => format!("grayscale({}%)", a * 100.0),
            Self::Sepia(a) => format!("sepia({}%)", a * 100.0),
            Self::Invert(a) => format!("invert({}%)", a * 100.0),
            Self::Saturate(v) => format!("saturate({v})"),
            Self::Brightness(v) => format!("brightness({v})"),
            Self::Contrast(v) => format!("contrast({v})"),
            Self::Blur { std_dev_px } => format!("blur({std_dev_px}px)"),
        }
    }

    /// Whether applying this primitive leaves every pixel unchanged.
    pub fn is_identity(self) -> bool {
        match self {
            Self::Grayscale(a) | Self::Sepia(a) | Self::Invert(a) => a == 0.0,
            Self::Saturate(v) | Self::Brightness(v) | Self::Contrast(v) => v == 1.0,
            Self::Blur { std_dev_px } => std_dev_px <= 0.0,
        }
    }

    /// 4x5 row-major color matrix over straight RGBA in `[0, 1]`, or `None` for blur.
    pub fn color_matrix(self) -> Option<[f32; 20]> {
        let m = match self {
            Self::Grayscale(a) => {
                let s = 1.0 - a.clamp(0.0, 1.0);
                [
                    0.2126 + 0.7874 * s,
                    0.7152 - 0.7152 * s,
                    0.0722 - 0.0722 * s,
                    0.0,
                    0.0,
                    0.2126 - 0.2126 * s,
                    0.7152 + 0.2848 * s,
                    0.0722 - 0.0722 * s,
                    0.0,
                    0.0,
                    0.2126 - 0.2126 * s,
                    0.7152 - 0.7152 * s,
                    0.0722 + 0.9278 * s,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    1.0,
                    0.0,
                ]
            }
            Self::Sepia(a) => {
                let s = 1.0 - a.clamp(0.0, 1.0);
                [
                    0.393 + 0.607 * s,
                    0.769 - 0.769 * s,
                    0.189 - 0.189 * s,
                    0.0,
                    0.0,
                    0.349 - 0.349 * s,
                    0.686 + 0.314 * s,
                    0.168 - 0.168 * s,
                    0.0,
                    0.0,
                    0.272 - 0.272 * s,
                    0.534 - 0.534 * s,
                    0.131 + 0.869 * s,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    1.0,
                    0.0,
                ]
            }
            Self::Saturate(v) => {
                let s = v.max(0.0);
                [
                    0.213 + 0.787 * s,
                    0.715 - 0.715 * s,
                    0.072 - 0.072 * s,
                    0.0,
                    0.0,
                    0.213 - 0.213 * s,
                    0.715 + 0.285 * s,
                    0.072 - 0.072 * s,
                    0.0,
                    0.0,
                    0.213 - 0.213 * s,
                    0.715 - 0.715 * s,
                    0.072 + 0.928 * s,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    0.0,
                    1.0,
                    0.0,
                ]
            }
            Self::Brightness(v) => linear_transfer(v.max(0.0), 0.0),
            Self::Contrast(v) => {
                let c = v.max(0.0);
                linear_transfer(c, 0.5 - 0.5 * c)
            }
            Self::Invert(a) => {
                let a = a.clamp(0.0, 1.0);
                linear_transfer(1.0 - 2.0 * a, a)
            }
            Self::Blur { .. } => return None,
        };
        Some(m)
    }
}

fn linear_transfer(slope: f32, intercept: f32) -> [f32; 20] {
    [
        slope, 0.0, 0.0, 0.0, intercept, //
        0.0, slope, 0.0, 0.0, intercept, //
        0.0, 0.0, slope, 0.0, intercept, //
        0.0, 0.0, 0.0, 1.0, 0.0,
    ]
}

/// Render a primitive chain back to a canvas filter string.
pub fn ops_to_css(ops: &[FilterOp]) -> String {
    if ops.is_empty() {
        return "none".to_string();
    }
    ops.iter()
        .map(|op| op.css())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a canvas filter string such as `"contrast(1.4) blur(2px)"`.
pub fn parse_css_filter(css: &str) -> CaptionResult<Vec<FilterOp>> {
    let css = css.trim();
    if css.is_empty() || css.eq_ignore_ascii_case("none") {
        return Ok(Vec::new());
    }

    let mut out = Vec::new();
    let mut rest = css;
    while !rest.is_empty() {
        let open = rest
            .find('(')
            .ok_or_else(|| CaptionError::validation(format!("expected '(' in filter '{rest}'")))?;
        let close = rest[open..]
            .find(')')
            .map(|i| open + i)
            .ok_or_else(|| CaptionError::validation(format!("unclosed filter '{rest}'")))?;

        let name = rest[..open].trim().to_ascii_lowercase();
        let arg = rest[open + 1..close].trim();
        out.push(parse_primitive(&name, arg)?);

        rest = rest[close + 1..].trim_start();
    }
    Ok(out)
}

fn parse_primitive(name: &str, arg: &str) -> CaptionResult<FilterOp> {
    match name {
        "grayscale" => Ok(FilterOp::Grayscale(parse_amount(name, arg)?.min(1.0))),
        "sepia" => Ok(FilterOp::Sepia(parse_amount(name, arg)?.min(1.0))),
        "invert" => Ok(FilterOp::Invert(parse_amount(name, arg)?.min(1.0))),
        "saturate" => Ok(FilterOp::Saturate(parse_amount(name, arg)?)),
        "brightness" => Ok(FilterOp::Brightness(parse_amount(name, arg)?)),
        "contrast" => Ok(FilterOp::Contrast(parse_amount(name, arg)?)),
        "blur" => {
            let len = arg.strip_suffix("px").unwrap_or(arg).trim();
            let std_dev_px = if len.is_empty() {
                0.0
            } else {
                parse_number(name, len)?
            };
            Ok(FilterOp::Blur { std_dev_px })
        }
        _ => Err(CaptionError::validation(format!(
            "unknown filter function '{name}'"
        ))),
    }
}

/// `50%` and `0.5` are equivalent; a missing argument means the full effect.
fn parse_amount(name: &str, arg: &str) -> CaptionResult<f32> {
    if arg.is_empty() {
        return Ok(1.0);
    }
    match arg.strip_suffix('%') {
        Some(pct) => Ok(parse_number(name, pct.trim())? / 100.0),
        None => parse_number(name, arg),
    }
}

fn parse_number(name: &str, s: &str) -> CaptionResult<f32> {
    let v: f32 = s
        .parse()
        .map_err(|_| CaptionError::validation(format!("{name}: invalid number '{s}'")))?;
    if !v.is_finite() || v < 0.0 {
        return Err(CaptionError::validation(format!(
            "{name}: value must be finite and >= 0"
        )));
    }
    Ok(v)
}

/// Drop primitives that leave pixels unchanged.
pub fn normalize_ops(ops: &[FilterOp]) -> Vec<FilterOp> {
    ops.iter().copied().filter(|op| !op.is_identity()).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/effects/filter.rs"]
mod tests;
