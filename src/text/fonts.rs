use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use usvg::fontdb;

use crate::foundation::error::{CaptionError, CaptionResult};

const SANS_FALLBACKS: &[&str] = &[
    "Arial",
    "Helvetica",
    "Liberation Sans",
    "DejaVu Sans",
    "Noto Sans",
    "Roboto",
];
const SERIF_FALLBACKS: &[&str] = &[
    "Times New Roman",
    "Liberation Serif",
    "DejaVu Serif",
    "Noto Serif",
];
const MONO_FALLBACKS: &[&str] = &[
    "Courier New",
    "Liberation Mono",
    "DejaVu Sans Mono",
    "Noto Sans Mono",
];

/// One entry of a CSS `font-family` list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FamilyName {
    Named(String),
    Serif,
    SansSerif,
    Monospace,
    Cursive,
    Fantasy,
}

/// Split a CSS family list such as `"'Open Sans', Arial, sans-serif"`.
pub fn parse_family_list(css: &str) -> Vec<FamilyName> {
    css.split(',')
        .map(|part| part.trim().trim_matches(|c| c == '"' || c == '\''))
        .filter(|part| !part.is_empty())
        .map(|part| match part.to_ascii_lowercase().as_str() {
            "serif" => FamilyName::Serif,
            "sans-serif" => FamilyName::SansSerif,
            "monospace" => FamilyName::Monospace,
            "cursive" => FamilyName::Cursive,
            "fantasy" => FamilyName::Fantasy,
            _ => FamilyName::Named(part.to_string()),
        })
        .collect()
}

/// Font face bytes selected for a family/weight/style request.
#[derive(Clone)]
pub struct ResolvedFont {
    pub data: Arc<Vec<u8>>,
    /// Face index inside a collection file.
    pub index: u32,
    pub family: String,
    pub bold: bool,
    pub italic: bool,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolvedFont")
            .field("data_len", &self.data.len())
            .field("index", &self.index)
            .field("family", &self.family)
            .field("bold", &self.bold)
            .field("italic", &self.italic)
            .finish()
    }
}

/// Installed and user-supplied fonts, queried by CSS family lists.
#[derive(Clone)]
pub struct FontBook {
    db: Arc<fontdb::Database>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("faces", &self.face_count())
            .finish()
    }
}

impl FontBook {
    pub fn empty() -> Self {
        Self {
            db: Arc::new(fontdb::Database::new()),
        }
    }

    /// System fonts plus every `.ttf/.otf/.ttc` in `extra_dirs`.
    #[tracing::instrument]
    pub fn load(extra_dirs: &[PathBuf]) -> Self {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        for dir in extra_dirs {
            load_fonts_from_dir(&mut db, dir);
        }
        tracing::debug!(faces = db.len(), "font database loaded");
        Self { db: Arc::new(db) }
    }

    /// Book holding only the given font file contents.
    pub fn from_font_data(fonts: impl IntoIterator<Item = Vec<u8>>) -> Self {
        let mut db = fontdb::Database::new();
        for data in fonts {
            db.load_font_data(data);
        }
        Self { db: Arc::new(db) }
    }

    pub fn face_count(&self) -> usize {
        self.db.len()
    }

    /// Pick the best face for `family_css`, falling back to common faces and finally to any face.
    pub fn resolve(&self, family_css: &str, bold: bool, italic: bool) -> CaptionResult<ResolvedFont> {
        let requested = parse_family_list(family_css);
        let mut names = Vec::<String>::new();
        for fam in &requested {
            match fam {
                FamilyName::Named(n) => names.push(n.clone()),
                FamilyName::Serif => names.extend(SERIF_FALLBACKS.iter().map(|s| s.to_string())),
                FamilyName::Monospace => {
                    names.extend(MONO_FALLBACKS.iter().map(|s| s.to_string()))
                }
                FamilyName::SansSerif | FamilyName::Cursive | FamilyName::Fantasy => {
                    names.extend(SANS_FALLBACKS.iter().map(|s| s.to_string()))
                }
            }
        }
        names.extend(SANS_FALLBACKS.iter().map(|s| s.to_string()));

        let families: Vec<fontdb::Family<'_>> =
            names.iter().map(|n| fontdb::Family::Name(n)).collect();
        let query = fontdb::Query {
            families: &families,
            weight: if bold {
                fontdb::Weight::BOLD
            } else {
                fontdb::Weight::NORMAL
            },
            stretch: fontdb::Stretch::Normal,
            style: if italic {
                fontdb::Style::Italic
            } else {
                fontdb::Style::Normal
            },
        };

        let id = self
            .db
            .query(&query)
            .or_else(|| self.db.faces().next().map(|f| f.id))
            .ok_or_else(|| {
                CaptionError::font(format!("no font face available for '{family_css}'"))
            })?;

        let face = self
            .db
            .face(id)
            .ok_or_else(|| CaptionError::font("resolved font face disappeared"))?;
        let family = face
            .families
            .first()
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| face.post_script_name.clone());
        let face_bold = face.weight.0 >= fontdb::Weight::SEMIBOLD.0;
        let face_italic = face.style != fontdb::Style::Normal;

        let (data, index) = self
            .db
            .with_face_data(id, |data, index| (data.to_vec(), index))
            .ok_or_else(|| CaptionError::font(format!("cannot read font data for '{family}'")))?;

        tracing::debug!(family_css, family = %family, bold = face_bold, italic = face_italic, "font resolved");
        Ok(ResolvedFont {
            data: Arc::new(data),
            index,
            family,
            bold: face_bold,
            italic: face_italic,
        })
    }
}

fn load_fonts_from_dir(db: &mut fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "font directory not readable");
        return;
    };

    for entry in rd.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(ext) = path.extension().and_then(|s| s.to_str()) else {
            continue;
        };
        let ext = ext.to_ascii_lowercase();
        if ext != "ttf" && ext != "otf" && ext != "ttc" {
            continue;
        }
        if let Err(e) = db.load_font_file(&path) {
            tracing::warn!(path = %path.display(), error = %e, "skipping font file");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/fonts.rs"]
mod tests;
