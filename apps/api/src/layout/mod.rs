// Page Layout Engine: normalized document body -> paginated display list.
// Each call owns its LayoutContext; nothing is shared between concurrent renders.

pub mod context;
pub mod cover_letter;
pub mod document;
pub mod font_metrics;
pub mod fonts;
pub mod geometry;
pub mod header;
pub mod resume;
pub mod wrap;

pub use context::{DrawOp, LaidOutDocument, Page, TextRun};
pub use font_metrics::FontWeight;
pub use fonts::{FontSet, FontSource};
pub use geometry::DocumentKind;

/// Lays out `body` as the given kind. `titles` are the résumé section titles
/// to recognize; cover letters ignore them.
pub fn layout_document(
    body: &str,
    kind: DocumentKind,
    fonts: &FontSet,
    titles: &[String],
) -> LaidOutDocument {
    match kind {
        DocumentKind::Resume => resume::layout_resume(body, fonts, titles),
        DocumentKind::CoverLetter => cover_letter::layout_cover_letter(body, fonts),
    }
}
