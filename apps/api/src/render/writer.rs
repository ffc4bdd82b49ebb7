//! PDF serialization of a laid-out document through `pdf-writer`.
//!
//! Object numbers are assigned in a fixed order and the file carries no
//! timestamps or file IDs, so identical input always yields identical bytes.

use std::io::Write;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref, Str, TextStr};

use crate::layout::context::{DrawOp, LaidOutDocument, Page};
use crate::layout::font_metrics::{FontWeight, FIRST_CODE};
use crate::layout::fonts::{encode_win_ansi, FontFace, FontSet};
use crate::layout::geometry::DocumentKind;
use crate::render::RenderError;

const PRODUCER: &str = "tailor";
const WIN_ANSI: Name<'static> = Name(b"WinAnsiEncoding");

fn font_resource(weight: FontWeight) -> Name<'static> {
    match weight {
        FontWeight::Regular => Name(b"F1"),
        FontWeight::Bold => Name(b"F2"),
    }
}

fn compress_data(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

/// Hands out object references in allocation order.
struct RefAllocator {
    next: i32,
}

impl RefAllocator {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn next(&mut self) -> Ref {
        let id = Ref::new(self.next);
        self.next += 1;
        id
    }
}

/// Encodes text for a WinAnsi font. Characters outside the code page are
/// skipped; callers sanitize beforehand.
pub fn encode_text(text: &str) -> Vec<u8> {
    text.chars().filter_map(encode_win_ansi).collect()
}

/// Content stream for one page of the display list.
fn page_content(page: &Page) -> Vec<u8> {
    let mut content = Content::new();
    for op in &page.ops {
        match op {
            DrawOp::Text(run) => {
                content.begin_text();
                content.set_font(font_resource(run.weight), run.size);
                content.set_word_spacing(run.word_spacing);
                content.set_text_matrix([1.0, 0.0, 0.0, 1.0, run.x, run.baseline]);
                content.show(Str(&encode_text(&run.text)));
                content.end_text();
            }
            DrawOp::Rule {
                x_start,
                x_end,
                y,
                thickness,
            } => {
                content.save_state();
                content.set_line_width(*thickness);
                content.move_to(*x_start, *y);
                content.line_to(*x_end, *y);
                content.stroke();
                content.restore_state();
            }
        }
    }
    content.finish()
}

/// Writes a stream object, Flate-compressed when `compress` is set.
/// `raw_len` records the uncompressed length as `/Length1` (font programs).
fn write_stream(
    pdf: &mut Pdf,
    id: Ref,
    data: &[u8],
    compress: bool,
    raw_len: Option<usize>,
) -> std::io::Result<()> {
    let payload = if compress { compress_data(data)? } else { data.to_vec() };
    let mut stream = pdf.stream(id, &payload);
    if compress {
        stream.filter(Filter::FlateDecode);
    }
    if let Some(len) = raw_len {
        stream.pair(Name(b"Length1"), len as i32);
    }
    stream.finish();
    Ok(())
}

/// Writes the font dictionary for `face`, plus descriptor and program for
/// embedded faces.
fn write_font(
    pdf: &mut Pdf,
    refs: &mut RefAllocator,
    id: Ref,
    face: &FontFace,
    compress: bool,
) -> std::io::Result<()> {
    let base_font = Name(face.base_font.as_bytes());
    let Some(program) = &face.embedded else {
        pdf.type1_font(id).base_font(base_font).encoding_predefined(WIN_ANSI);
        return Ok(());
    };

    let descriptor_id = refs.next();
    let file_id = refs.next();

    let mut font = pdf.indirect(id).dict();
    font.pair(Name(b"Type"), Name(b"Font"));
    font.pair(Name(b"Subtype"), Name(b"TrueType"));
    font.pair(Name(b"BaseFont"), base_font);
    font.pair(Name(b"FirstChar"), i32::from(FIRST_CODE));
    font.pair(Name(b"LastChar"), 255);
    font.insert(Name(b"Widths"))
        .array()
        .items(face.metrics.widths().iter().map(|&w| i32::from(w)));
    font.pair(Name(b"FontDescriptor"), descriptor_id);
    font.pair(Name(b"Encoding"), WIN_ANSI);
    font.finish();

    let mut descriptor = pdf.indirect(descriptor_id).dict();
    descriptor.pair(Name(b"Type"), Name(b"FontDescriptor"));
    descriptor.pair(Name(b"FontName"), base_font);
    descriptor.pair(Name(b"Flags"), program.flags as i32);
    descriptor.insert(Name(b"FontBBox")).array().items(program.bbox);
    descriptor.pair(Name(b"ItalicAngle"), 0);
    descriptor.pair(Name(b"Ascent"), i32::from(face.metrics.ascent));
    descriptor.pair(Name(b"Descent"), i32::from(face.metrics.descent));
    descriptor.pair(Name(b"CapHeight"), i32::from(face.metrics.cap_height));
    descriptor.pair(Name(b"StemV"), i32::from(program.stem_v));
    descriptor.pair(Name(b"FontFile2"), file_id);
    descriptor.finish();

    write_stream(pdf, file_id, &program.data, compress, Some(program.data.len()))
}

fn document_title(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Resume => "Resume",
        DocumentKind::CoverLetter => "Cover Letter",
    }
}

/// Serializes a laid-out document to PDF bytes.
pub fn write_pdf(document: &LaidOutDocument, fonts: &FontSet, compress: bool) -> Result<Vec<u8>, RenderError> {
    let mut refs = RefAllocator::new();
    let catalog_id = refs.next();
    let pages_id = refs.next();
    let info_id = refs.next();
    let regular_id = refs.next();
    let bold_id = refs.next();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(pages_id);
    pdf.document_info(info_id)
        .title(TextStr(document_title(document.kind)))
        .producer(TextStr(PRODUCER));

    write_font(&mut pdf, &mut refs, regular_id, fonts.face(FontWeight::Regular), compress)?;
    write_font(&mut pdf, &mut refs, bold_id, fonts.face(FontWeight::Bold), compress)?;

    let geometry = &document.geometry;
    let media_box = Rect::new(0.0, 0.0, geometry.width, geometry.height);
    let mut kids = Vec::with_capacity(document.pages.len());
    for page in &document.pages {
        let page_id = refs.next();
        let content_id = refs.next();

        let mut writer = pdf.page(page_id);
        writer.media_box(media_box);
        writer.parent(pages_id);
        writer.contents(content_id);
        writer
            .resources()
            .fonts()
            .pair(font_resource(FontWeight::Regular), regular_id)
            .pair(font_resource(FontWeight::Bold), bold_id);
        writer.finish();

        write_stream(&mut pdf, content_id, &page_content(page), compress, None)?;
        kids.push(page_id);
    }

    pdf.pages(pages_id).kids(kids.iter().copied()).count(kids.len() as i32);

    Ok(pdf.finish())
}
