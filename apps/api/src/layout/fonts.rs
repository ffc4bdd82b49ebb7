//! Font resources: the WinAnsi code page, the regular/bold face pair the layout
//! engine draws with, and text sanitizing against what those faces can show.
//!
//! Two sources are supported. `FontSource::Standard` uses the built-in
//! Helvetica pair, which every PDF reader supplies. `FontSource::TrueType`
//! loads two font files from disk and embeds them; a file that cannot be read,
//! parsed, or lacks the basic Latin glyphs is a hard error.

use std::path::{Path, PathBuf};

use tracing::info;
use ttf_parser::Face;

use crate::layout::font_metrics::{
    self, FontMetricTable, FontWeight, CODE_COUNT, FIRST_CODE,
};
use crate::render::RenderError;

/// Glyph drawn in front of résumé bullet items.
pub const BULLET_GLYPH: char = '•';

/// Characters an embedded face must provide before it is accepted.
const REQUIRED_GLYPHS: &str =
    " ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789.,:-•";

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi code page
// ────────────────────────────────────────────────────────────────────────────

/// Code points of the 0x80..=0x9F block; `None` marks an undefined slot.
#[rustfmt::skip]
const WIN_ANSI_HIGH: [Option<char>; 32] = [
    Some('€'), None, Some('‚'), Some('ƒ'), Some('„'), Some('…'), Some('†'), Some('‡'),
    Some('ˆ'), Some('‰'), Some('Š'), Some('‹'), Some('Œ'), None, Some('Ž'), None,
    None, Some('‘'), Some('’'), Some('“'), Some('”'), Some('•'), Some('–'), Some('—'),
    Some('˜'), Some('™'), Some('š'), Some('›'), Some('œ'), None, Some('ž'), Some('Ÿ'),
];

/// Maps a character to its WinAnsi code, if it has one.
pub fn encode_win_ansi(ch: char) -> Option<u8> {
    match ch {
        ' '..='~' | '\u{A0}'..='\u{FF}' => Some(ch as u8),
        _ => WIN_ANSI_HIGH
            .iter()
            .position(|slot| *slot == Some(ch))
            .map(|idx| 0x80 + idx as u8),
    }
}

/// Maps a WinAnsi code back to its character.
pub fn decode_win_ansi(code: u8) -> Option<char> {
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as char),
        0x80..=0x9F => WIN_ANSI_HIGH[(code - 0x80) as usize],
        _ => None,
    }
}

/// Stand-ins for common typographic characters outside the code page.
fn substitute(ch: char) -> Option<char> {
    match ch {
        '\t' | '\u{2002}' | '\u{2003}' | '\u{2009}' | '\u{200A}' | '\u{202F}' => Some(' '),
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2212}' => Some('-'),
        '\u{2032}' => Some('\''),
        '\u{2033}' => Some('"'),
        _ => None,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Faces
// ────────────────────────────────────────────────────────────────────────────

/// Where the regular/bold pair comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    Standard,
    TrueType { regular: PathBuf, bold: PathBuf },
}

/// Font program bytes and descriptor values for an embedded face.
/// Vertical values are in 1/1000 em.
#[derive(Debug, Clone)]
pub struct EmbeddedProgram {
    pub data: Vec<u8>,
    pub bbox: [i32; 4],
    pub stem_v: i16,
    pub flags: u32,
}

#[derive(Debug, Clone)]
pub struct FontFace {
    /// PDF `/BaseFont` name.
    pub base_font: String,
    pub metrics: FontMetricTable,
    pub embedded: Option<EmbeddedProgram>,
}

impl FontFace {
    fn standard(weight: FontWeight) -> Self {
        match weight {
            FontWeight::Regular => Self {
                base_font: "Helvetica".to_string(),
                metrics: font_metrics::helvetica(),
                embedded: None,
            },
            FontWeight::Bold => Self {
                base_font: "Helvetica-Bold".to_string(),
                metrics: font_metrics::helvetica_bold(),
                embedded: None,
            },
        }
    }

    /// Parses a TrueType program and builds its WinAnsi width table.
    pub fn from_truetype(
        data: Vec<u8>,
        base_font: String,
        weight: FontWeight,
    ) -> Result<Self, RenderError> {
        let parse_error = |reason: String| RenderError::FontParse {
            name: base_font.clone(),
            reason,
        };

        let (metrics, bbox) = {
            let face = Face::parse(&data, 0).map_err(|e| parse_error(e.to_string()))?;
            let units_per_em = face.units_per_em() as i32;
            if units_per_em == 0 {
                return Err(parse_error("units per em is zero".to_string()));
            }
            let scale = |value: i16| value as i32 * 1000 / units_per_em;

            let mut widths = [0u16; CODE_COUNT];
            for (idx, slot) in widths.iter_mut().enumerate() {
                let Some(ch) = decode_win_ansi(FIRST_CODE + idx as u8) else {
                    continue;
                };
                if let Some(glyph) = face.glyph_index(ch) {
                    let advance = face.glyph_hor_advance(glyph).unwrap_or(0) as i32;
                    *slot = (advance * 1000 / units_per_em) as u16;
                }
            }

            let ascent = scale(face.ascender());
            let metrics = FontMetricTable::new(
                widths,
                ascent as i16,
                scale(face.descender()) as i16,
                face.capital_height().map(scale).unwrap_or(ascent) as i16,
            );
            let rect = face.global_bounding_box();
            let bbox = [
                scale(rect.x_min),
                scale(rect.y_min),
                scale(rect.x_max),
                scale(rect.y_max),
            ];
            (metrics, bbox)
        };

        let missing: String = REQUIRED_GLYPHS
            .chars()
            .filter(|ch| !metrics.has_glyph(*ch))
            .collect();
        if !missing.is_empty() {
            return Err(RenderError::MissingGlyphs {
                name: base_font,
                missing,
            });
        }

        let stem_v = match weight {
            FontWeight::Regular => 80,
            FontWeight::Bold => 140,
        };

        Ok(Self {
            base_font,
            metrics,
            embedded: Some(EmbeddedProgram {
                data,
                bbox,
                stem_v,
                // Nonsymbolic
                flags: 1 << 5,
            }),
        })
    }
}

/// PDF names may not contain whitespace or delimiters.
fn base_font_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name: String = stem
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if name.is_empty() {
        "EmbeddedFont".to_string()
    } else {
        name
    }
}

fn load_face(path: &Path, weight: FontWeight) -> Result<FontFace, RenderError> {
    let data = std::fs::read(path).map_err(|source| RenderError::FontIo {
        path: path.to_path_buf(),
        source,
    })?;
    FontFace::from_truetype(data, base_font_name(path), weight)
}

// ────────────────────────────────────────────────────────────────────────────
// Font set
// ────────────────────────────────────────────────────────────────────────────

/// Text with every undrawable character removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub text: String,
    pub dropped: usize,
}

/// The regular/bold pair shared by every render.
#[derive(Debug, Clone)]
pub struct FontSet {
    regular: FontFace,
    bold: FontFace,
}

impl Default for FontSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl FontSet {
    pub fn standard() -> Self {
        Self {
            regular: FontFace::standard(FontWeight::Regular),
            bold: FontFace::standard(FontWeight::Bold),
        }
    }

    pub fn load(source: &FontSource) -> Result<Self, RenderError> {
        match source {
            FontSource::Standard => Ok(Self::standard()),
            FontSource::TrueType { regular, bold } => {
                let set = Self {
                    regular: load_face(regular, FontWeight::Regular)?,
                    bold: load_face(bold, FontWeight::Bold)?,
                };
                info!(
                    regular = %set.regular.base_font,
                    bold = %set.bold.base_font,
                    "Loaded TrueType fonts for embedding"
                );
                Ok(set)
            }
        }
    }

    pub fn face(&self, weight: FontWeight) -> &FontFace {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    pub fn metrics(&self, weight: FontWeight) -> &FontMetricTable {
        &self.face(weight).metrics
    }

    pub fn is_embedded(&self) -> bool {
        self.regular.embedded.is_some() || self.bold.embedded.is_some()
    }

    fn drawable(&self, ch: char) -> bool {
        self.regular.metrics.has_glyph(ch) && self.bold.metrics.has_glyph(ch)
    }

    /// Removes characters neither face can draw. Newlines survive, carriage
    /// returns vanish, and a few typographic spaces and dashes are folded to
    /// their ASCII forms instead of being dropped.
    pub fn sanitize(&self, text: &str) -> Sanitized {
        let mut out = String::with_capacity(text.len());
        let mut dropped = 0;
        for ch in text.chars() {
            match ch {
                '\n' => out.push('\n'),
                '\r' => {}
                _ if self.drawable(ch) => out.push(ch),
                _ => match substitute(ch) {
                    Some(replacement) if self.drawable(replacement) => out.push(replacement),
                    _ => dropped += 1,
                },
            }
        }
        Sanitized { text: out, dropped }
    }
}
