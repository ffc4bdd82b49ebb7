//! Cover-letter layout in block-letter format: sender and date lines flush
//! left, a bold salutation, justified paragraphs, and a closing set apart by
//! extra leading.

use crate::compose::{closing_start, is_salutation};
use crate::layout::context::{Align, LaidOutDocument, LayoutContext};
use crate::layout::document::blocks;
use crate::layout::font_metrics::FontWeight;
use crate::layout::fonts::FontSet;
use crate::layout::geometry::DocumentKind;

pub fn layout_cover_letter(body: &str, fonts: &FontSet) -> LaidOutDocument {
    let mut ctx = LayoutContext::new(fonts, DocumentKind::CoverLetter);
    let scale = *ctx.scale();
    let size = scale.body_size;
    let line_height = scale.body_line_height();
    let paragraph_gap = line_height * 0.75;

    let blocks = blocks(body);
    let salutation = blocks.iter().position(|b| is_salutation(b[0]));
    let joined: Vec<String> = blocks.iter().map(|b| b.join("\n")).collect();
    let closing = closing_start(joined.as_slice()).filter(|idx| salutation.map_or(true, |s| *idx > s));

    let body_start = salutation.unwrap_or(0);
    let body_end = closing.unwrap_or(blocks.len());

    // Envelope: sender block and date, one unjustified line each.
    for block in &blocks[..body_start] {
        for line in block {
            ctx.paragraph(line, FontWeight::Regular, size, Align::Left, 0.0);
        }
        ctx.gap(line_height);
    }

    for (idx, block) in blocks[body_start..body_end].iter().enumerate() {
        if idx == 0 && salutation.is_some() {
            for line in block {
                ctx.paragraph(line, FontWeight::Bold, size, Align::Left, 0.0);
            }
            ctx.gap(paragraph_gap);
            continue;
        }
        ctx.paragraph(&block.join(" "), FontWeight::Regular, size, Align::Justify, 0.0);
        ctx.gap(paragraph_gap);
    }

    if closing.is_some() {
        let closing_blocks = &blocks[body_end..];
        let lines: usize = closing_blocks.iter().map(Vec::len).sum();
        ctx.gap(line_height);
        ctx.keep_together(line_height * lines as f32);
        for (block_idx, block) in closing_blocks.iter().enumerate() {
            if block_idx > 0 {
                ctx.gap(line_height);
            }
            for (line_idx, line) in block.iter().enumerate() {
                let weight = if block_idx == 0 && line_idx == 0 {
                    FontWeight::Bold
                } else {
                    FontWeight::Regular
                };
                ctx.paragraph(line, weight, size, Align::Left, 0.0);
            }
        }
    }

    ctx.finish()
}
