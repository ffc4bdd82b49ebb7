//! Rendering entry points: normalized body text in, PDF bytes out.
//!
//! `render` sanitizes the body against the loaded fonts, lays it out for the
//! requested kind, and serializes the pages. It does no I/O of its own;
//! `render_to_path` is the same pipeline followed by a single file write.

mod error;
mod writer;

use std::path::Path;

use bytes::Bytes;
use tracing::{debug, warn};

use crate::layout::{layout_document, DocumentKind, FontSet};
use crate::profile::SectionSet;

pub use error::RenderError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Flate-compress content streams and embedded font programs.
    pub compress: bool,
    /// Résumé section titles the layout engine recognizes.
    pub section_titles: Vec<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::for_sections(&SectionSet::default(), true)
    }
}

impl RenderOptions {
    pub fn for_sections(sections: &SectionSet, compress: bool) -> Self {
        Self {
            compress,
            section_titles: sections
                .rendered_titles()
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub bytes: Bytes,
    pub page_count: usize,
}

pub fn render(
    body: &str,
    kind: DocumentKind,
    fonts: &FontSet,
    options: &RenderOptions,
) -> Result<RenderOutput, RenderError> {
    let sanitized = fonts.sanitize(body);
    if sanitized.dropped > 0 {
        warn!(
            kind = %kind,
            dropped = sanitized.dropped,
            "Dropped characters the fonts cannot draw"
        );
    }

    let document = layout_document(&sanitized.text, kind, fonts, &options.section_titles);
    let bytes = writer::write_pdf(&document, fonts, options.compress)?;

    debug!(
        kind = %kind,
        pages = document.page_count(),
        bytes = bytes.len(),
        "Rendered document"
    );

    Ok(RenderOutput {
        bytes: Bytes::from(bytes),
        page_count: document.page_count(),
    })
}

/// Renders and writes the PDF to `path`, replacing any existing file.
pub fn render_to_path(
    body: &str,
    kind: DocumentKind,
    fonts: &FontSet,
    options: &RenderOptions,
    path: &Path,
) -> Result<RenderOutput, RenderError> {
    let output = render(body, kind, fonts, options)?;
    std::fs::write(path, &output.bytes).map_err(|source| RenderError::Output {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use flate2::read::ZlibDecoder;

    use super::*;

    const RESUME: &str = "Jane Doe\n123 Main St\n555-1234\njane@x.com\n\n\
        SUMMARY\nI build things (mostly compilers).\n\nEDUCATION\nB.S. CS\n\n\
        RELEVANT WORK EXPERIENCE\nEngineer at Acme\n2019 - 2023\n- did X\n- did Y";

    const LETTER: &str = "Jane Doe\n\nMarch 05, 2026\n\nDear Acme Hiring Team,\n\n\
        I am writing to apply for the platform engineering role. Over the last six years I have \
        built and operated distributed systems that serve millions of users.\n\n\
        Sincerely,\nJane Doe";

    fn plain() -> RenderOptions {
        RenderOptions {
            compress: false,
            ..RenderOptions::default()
        }
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    fn text(output: &RenderOutput) -> String {
        String::from_utf8_lossy(&output.bytes).into_owned()
    }

    #[test]
    fn test_output_is_a_pdf_file() {
        let output = render(RESUME, DocumentKind::Resume, &FontSet::standard(), &plain()).unwrap();
        let pdf = text(&output);
        assert!(pdf.starts_with("%PDF-1."));
        assert!(pdf.trim_end().ends_with("%%EOF"));
        assert!(pdf.contains("/MediaBox [0 0 612 792]"));
        assert!(pdf.contains("/BaseFont /Helvetica-Bold"));
        assert!(pdf.contains("/Encoding /WinAnsiEncoding"));
        assert!(pdf.contains("(Jane Doe) Tj"));
        assert!(pdf.contains("compilers"));
        assert_eq!(output.page_count, 1);
    }

    #[test]
    fn test_render_is_byte_identical_for_identical_input() {
        let fonts = FontSet::standard();
        for kind in [DocumentKind::Resume, DocumentKind::CoverLetter] {
            let body = if kind == DocumentKind::Resume { RESUME } else { LETTER };
            let first = render(body, kind, &fonts, &RenderOptions::default()).unwrap();
            let second = render(body, kind, &fonts, &RenderOptions::default()).unwrap();
            assert_eq!(first.bytes, second.bytes, "{kind} output must be deterministic");
        }
    }

    #[test]
    fn test_cover_letter_uses_word_spacing_for_justification() {
        let output = render(LETTER, DocumentKind::CoverLetter, &FontSet::standard(), &plain()).unwrap();
        let pdf = text(&output);
        let stretched = pdf
            .lines()
            .filter(|l| l.ends_with(" Tw") && *l != "0 Tw")
            .count();
        assert!(stretched >= 1);
    }

    #[test]
    fn test_page_count_matches_page_objects() {
        let mut body = String::from("Jane Doe\n\nRELEVANT WORK EXPERIENCE\n");
        for i in 0..80 {
            body.push_str(&format!("\nJob {i}\n2020\n- built a thing\n- shipped a thing\n"));
        }
        let output = render(&body, DocumentKind::Resume, &FontSet::standard(), &plain()).unwrap();
        let pdf = text(&output);
        assert!(output.page_count > 1);
        let page_objects = pdf.matches("/Type /Page").count() - pdf.matches("/Type /Pages").count();
        assert_eq!(page_objects, output.page_count);
        assert!(pdf.contains(&format!("/Count {}", output.page_count)));
    }

    #[test]
    fn test_compressed_content_decodes_to_operators() {
        let output = render(RESUME, DocumentKind::Resume, &FontSet::standard(), &RenderOptions::default()).unwrap();
        let bytes = &output.bytes[..];
        let filter = find(bytes, b"/FlateDecode").unwrap();
        let start = filter + find(&bytes[filter..], b"stream\n").unwrap() + b"stream\n".len();
        let end = start + find(&bytes[start..], b"\nendstream").unwrap();
        let mut decoded = String::new();
        ZlibDecoder::new(&bytes[start..end]).read_to_string(&mut decoded).unwrap();
        assert!(decoded.contains("(Jane Doe) Tj"));
    }

    #[test]
    fn test_truetype_fonts_are_embedded() {
        let path = std::path::PathBuf::from("/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf");
        if !path.exists() {
            return;
        }
        let fonts = FontSet::load(&crate::layout::FontSource::TrueType {
            regular: path.clone(),
            bold: path,
        })
        .unwrap();
        let output = render(RESUME, DocumentKind::Resume, &fonts, &plain()).unwrap();
        let pdf = text(&output);
        assert!(pdf.contains("/Subtype /TrueType"));
        assert!(pdf.contains("/BaseFont /DejaVuSans"));
        assert!(pdf.contains("/FontFile2"));
        assert!(pdf.contains("/Length1"));
    }

    #[test]
    fn test_unsupported_characters_are_dropped_not_fatal() {
        let body = "Jane Doe 🦀\n\nSUMMARY\n漢字 Rustacean";
        let output = render(body, DocumentKind::Resume, &FontSet::standard(), &plain()).unwrap();
        let pdf = text(&output);
        assert!(pdf.contains("(Jane Doe) Tj"));
        assert!(pdf.contains("(Rustacean) Tj"));
    }

    #[test]
    fn test_render_to_path_writes_the_same_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        let fonts = FontSet::standard();
        let written = render_to_path(RESUME, DocumentKind::Resume, &fonts, &plain(), &path).unwrap();
        let in_memory = render(RESUME, DocumentKind::Resume, &fonts, &plain()).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), in_memory.bytes.to_vec());
        assert_eq!(written.bytes, in_memory.bytes);
    }

    #[test]
    fn test_render_to_unwritable_path_is_an_output_error() {
        let path = Path::new("/nonexistent-dir/out.pdf");
        let err = render_to_path(RESUME, DocumentKind::Resume, &FontSet::standard(), &plain(), path)
            .unwrap_err();
        assert!(matches!(err, RenderError::Output { .. }));
        assert!(!err.is_resource_failure());
    }
}
