//! Page geometry and type scale per document kind. All lengths are PDF points.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which document is being laid out. Always supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resume => "resume",
            Self::CoverLetter => "cover_letter",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resume" => Ok(Self::Resume),
            "cover_letter" => Ok(Self::CoverLetter),
            other => Err(format!("unknown document kind '{other}'")),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Page geometry
// ────────────────────────────────────────────────────────────────────────────

/// US Letter, 8.5in x 11in.
pub const LETTER_WIDTH_PT: f32 = 612.0;
pub const LETTER_HEIGHT_PT: f32 = 792.0;

pub const PT_PER_MM: f32 = 72.0 / 25.4;
pub const PT_PER_INCH: f32 = 72.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
}

impl PageGeometry {
    pub fn printable_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right
    }

    pub fn printable_height(&self) -> f32 {
        self.height - self.margin_top - self.margin_bottom
    }

    /// Y of the top margin line (PDF origin is bottom-left).
    pub fn top(&self) -> f32 {
        self.height - self.margin_top
    }

    /// Y below which nothing may be drawn.
    pub fn bottom(&self) -> f32 {
        self.margin_bottom
    }

    pub fn left(&self) -> f32 {
        self.margin_left
    }

    pub fn right(&self) -> f32 {
        self.width - self.margin_right
    }
}

/// Résumés trade margin for density; letters keep the one-inch convention.
pub fn page_geometry(kind: DocumentKind) -> PageGeometry {
    match kind {
        DocumentKind::Resume => PageGeometry {
            width: LETTER_WIDTH_PT,
            height: LETTER_HEIGHT_PT,
            margin_left: 20.0 * PT_PER_MM,
            margin_right: 20.0 * PT_PER_MM,
            margin_top: 20.0 * PT_PER_MM,
            margin_bottom: 15.0 * PT_PER_MM,
        },
        DocumentKind::CoverLetter => PageGeometry {
            width: LETTER_WIDTH_PT,
            height: LETTER_HEIGHT_PT,
            margin_left: PT_PER_INCH,
            margin_right: PT_PER_INCH,
            margin_top: PT_PER_INCH,
            margin_bottom: PT_PER_INCH,
        },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Type scale
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TypeScale {
    pub name_size: f32,
    pub title_size: f32,
    pub body_size: f32,
    /// Smallest size the contact line may shrink to.
    pub contact_floor: f32,
    pub contact_step: f32,
    /// Line height as a multiple of font size.
    pub leading: f32,
}

impl TypeScale {
    pub fn line_height(&self, size: f32) -> f32 {
        size * self.leading
    }

    pub fn body_line_height(&self) -> f32 {
        self.line_height(self.body_size)
    }
}

pub fn type_scale(kind: DocumentKind) -> TypeScale {
    let body_size = match kind {
        DocumentKind::Resume => 11.0,
        DocumentKind::CoverLetter => 12.0,
    };
    TypeScale {
        name_size: 20.0,
        title_size: 13.0,
        body_size,
        contact_floor: 7.0,
        contact_step: 0.5,
        leading: 1.25,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_margins_are_twenty_mm() {
        let geometry = page_geometry(DocumentKind::Resume);
        assert!((geometry.margin_left - 56.69).abs() < 0.01);
        assert!((geometry.margin_bottom - 42.52).abs() < 0.01);
        assert!((geometry.printable_width() - (612.0 - 2.0 * 56.6929)).abs() < 0.01);
    }

    #[test]
    fn test_cover_letter_has_one_inch_margins() {
        let geometry = page_geometry(DocumentKind::CoverLetter);
        assert_eq!(geometry.printable_width(), 468.0);
        assert_eq!(geometry.top(), 720.0);
        assert_eq!(geometry.bottom(), 72.0);
    }

    #[test]
    fn test_resume_is_denser_than_letter() {
        let resume = page_geometry(DocumentKind::Resume);
        let letter = page_geometry(DocumentKind::CoverLetter);
        assert!(resume.printable_width() > letter.printable_width());
        assert!(resume.printable_height() > letter.printable_height());
    }

    #[test]
    fn test_kind_parses_and_serializes() {
        assert_eq!("resume".parse::<DocumentKind>(), Ok(DocumentKind::Resume));
        assert_eq!("cover_letter".parse::<DocumentKind>(), Ok(DocumentKind::CoverLetter));
        assert!("letter".parse::<DocumentKind>().is_err());
        assert_eq!(
            serde_json::to_string(&DocumentKind::CoverLetter).unwrap(),
            "\"cover_letter\""
        );
    }

    #[test]
    fn test_type_scale_orders_sizes() {
        let scale = type_scale(DocumentKind::Resume);
        assert!(scale.name_size > scale.title_size);
        assert!(scale.title_size > scale.body_size);
        assert!(scale.contact_floor < scale.body_size);
    }
}
