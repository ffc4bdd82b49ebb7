//! Résumé layout: header, then each non-empty section as a bold title over a
//! thin rule, with justified prose and hanging-indent bullets.

use crate::layout::context::{rule_height, Align, LaidOutDocument, LayoutContext};
use crate::layout::document::{blocks, segment, strip_bullet_marker, work_entries, WorkEntry};
use crate::layout::font_metrics::FontWeight;
use crate::layout::fonts::{FontSet, BULLET_GLYPH};
use crate::layout::geometry::DocumentKind;
use crate::layout::header::layout_header;
use crate::profile::labels::WORK_EXPERIENCE;

/// Bullet glyph offset from the left margin.
pub const BULLET_GUTTER: f32 = 4.0;
/// Bullet text offset from the left margin; wrapped lines align here too.
pub const BULLET_INDENT: f32 = 14.0;
pub const RULE_THICKNESS: f32 = 0.5;

/// Lays out a normalized résumé body. Sections are recognized by `titles`;
/// sections with an empty body are omitted.
pub fn layout_resume(body: &str, fonts: &FontSet, titles: &[String]) -> LaidOutDocument {
    let mut ctx = LayoutContext::new(fonts, DocumentKind::Resume);
    let doc = segment(body, titles);

    layout_header(&mut ctx, &doc.header);

    let section_gap = ctx.scale().body_line_height();
    for section in doc.sections.iter().filter(|s| !s.body.is_empty()) {
        ctx.gap(section_gap);
        layout_section_title(&mut ctx, section.title);
        if section.title == WORK_EXPERIENCE {
            layout_work_experience(&mut ctx, &section.body);
        } else {
            layout_blocks(&mut ctx, &section.body);
        }
    }

    ctx.finish()
}

/// Title, rule and the blank line after it, kept with the first body line.
fn layout_section_title(ctx: &mut LayoutContext<'_>, title: &str) {
    let scale = *ctx.scale();
    let title_gap = scale.body_line_height() * 0.5;
    ctx.keep_together(
        scale.line_height(scale.title_size)
            + rule_height(RULE_THICKNESS)
            + title_gap
            + scale.body_line_height(),
    );
    ctx.paragraph(title, FontWeight::Bold, scale.title_size, Align::Left, 0.0);
    ctx.rule(RULE_THICKNESS);
    ctx.gap(title_gap);
}

fn layout_blocks(ctx: &mut LayoutContext<'_>, body: &str) {
    let scale = *ctx.scale();
    for (idx, block) in blocks(body).iter().enumerate() {
        if idx > 0 {
            ctx.gap(scale.body_line_height() * 0.4);
        }
        for line in block {
            match strip_bullet_marker(line) {
                Some(text) => layout_bullet(ctx, text),
                None => ctx.paragraph(line, FontWeight::Regular, scale.body_size, Align::Justify, 0.0),
            }
        }
    }
}

fn layout_work_experience(ctx: &mut LayoutContext<'_>, body: &str) {
    let scale = *ctx.scale();
    for (idx, entry) in work_entries(body).iter().enumerate() {
        if idx > 0 {
            ctx.gap(scale.body_line_height() * 0.5);
        }
        layout_entry(ctx, entry);
    }
}

fn layout_entry(ctx: &mut LayoutContext<'_>, entry: &WorkEntry<'_>) {
    let scale = *ctx.scale();
    let size = scale.body_size;
    let width = ctx.geometry().printable_width();

    let heading = ctx.wrap(entry.heading, FontWeight::Bold, size, width);
    let dates = entry
        .dates
        .map(|d| ctx.wrap(d, FontWeight::Regular, size, width))
        .unwrap_or_default();
    let follows = if dates.is_empty() && entry.bullets.is_empty() { 0 } else { 1 };
    // heading + dates stay together with the next line
    ctx.keep_together(scale.body_line_height() * (heading.len() + dates.len() + follows) as f32);

    ctx.draw_lines(&heading, FontWeight::Bold, size, Align::Left, 0.0);
    ctx.draw_lines(&dates, FontWeight::Regular, size, Align::Left, 0.0);
    for bullet in &entry.bullets {
        layout_bullet(ctx, bullet);
    }
}

/// One bullet: glyph in the gutter, text indented, continuation lines
/// aligned with the first line's text. Kept on one page when it fits.
fn layout_bullet(ctx: &mut LayoutContext<'_>, text: &str) {
    let scale = *ctx.scale();
    let size = scale.body_size;
    let lines = ctx.wrap(
        text,
        FontWeight::Regular,
        size,
        ctx.geometry().printable_width() - BULLET_INDENT,
    );
    if lines.is_empty() {
        return;
    }
    ctx.keep_together(scale.line_height(size) * lines.len() as f32);

    let baseline = ctx.next_baseline(size);
    let glyph_x = ctx.geometry().left() + BULLET_GUTTER;
    let mut glyph = [0u8; 4];
    ctx.push_text(
        glyph_x,
        baseline,
        FontWeight::Regular,
        size,
        BULLET_GLYPH.encode_utf8(&mut glyph),
        0.0,
    );
    ctx.draw_lines(&lines, FontWeight::Regular, size, Align::Left, BULLET_INDENT);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::compose_resume;
    use crate::layout::context::{DrawOp, TextRun};
    use crate::profile::{parse_profile, SectionSet};

    const RAW: &str = "HEADER:\nJane Doe\n123 Main St\n555-1234\njane@x.com\n\n\
        SUMMARY:\nI build things.\n\nEDUCATION:\nB.S. CS\n\n\
        RELEVANT WORK EXPERIENCE:\nEngineer at Acme\n2019 - 2023\n- did X\n- did Y\n\n\
        Intern at Initech\n- did Z\n\n\
        COVER LETTER INFO:\nFull Name: Jane Doe\nCompany Name: Acme\n";

    fn titles() -> Vec<String> {
        SectionSet::default()
            .rendered_titles()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    fn layout(body: &str) -> LaidOutDocument {
        layout_resume(body, &FontSet::standard(), &titles())
    }

    fn find<'a>(doc: &'a LaidOutDocument, text: &str) -> &'a TextRun {
        doc.text_runs()
            .find(|r| r.text == text)
            .unwrap_or_else(|| panic!("no run '{text}' in:\n{}", doc.plain_text()))
    }

    #[test]
    fn test_reference_resume_lays_out_in_order() {
        let profile = parse_profile(RAW, &SectionSet::default());
        let doc = layout(&compose_resume(&profile));
        assert_eq!(doc.page_count(), 1);
        assert_eq!(
            doc.plain_text(),
            "Jane Doe\n123 Main St  |  555-1234  |  jane@x.com\nSUMMARY\nI build things.\n\
             EDUCATION\nB.S. CS\nRELEVANT WORK EXPERIENCE\nEngineer at Acme\n2019 - 2023\n\
             •\ndid X\n•\ndid Y\nIntern at Initech\n•\ndid Z"
        );
    }

    #[test]
    fn test_titles_are_bold_with_a_rule() {
        let profile = parse_profile(RAW, &SectionSet::default());
        let doc = layout(&compose_resume(&profile));
        let title = find(&doc, "SUMMARY");
        assert_eq!(title.weight, FontWeight::Bold);
        assert_eq!(title.size, 13.0);
        let rules = doc.pages[0]
            .ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Rule { .. }))
            .count();
        assert_eq!(rules, 3);
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let doc = layout("Jane Doe\n\nSUMMARY\n\nEDUCATION\n\nB.S. CS\n\nRELEVANT WORK EXPERIENCE");
        let text = doc.plain_text();
        assert!(!text.contains("SUMMARY"));
        assert!(text.contains("EDUCATION"));
        assert!(!text.contains("RELEVANT WORK EXPERIENCE"));
    }

    #[test]
    fn test_empty_body_renders_single_blank_page() {
        let doc = layout("");
        assert_eq!(doc.page_count(), 1);
        assert_eq!(doc.text_runs().count(), 0);
    }

    #[test]
    fn test_bullet_continuation_lines_align_with_text() {
        let long = "did X ".repeat(60);
        let body = format!("Jane\n\nRELEVANT WORK EXPERIENCE\n\nEngineer\n- {}", long.trim());
        let doc = layout(&body);
        let left = doc.geometry.left();
        let bullet_lines: Vec<&TextRun> = doc
            .text_runs()
            .filter(|r| r.text.starts_with("did X"))
            .collect();
        assert!(bullet_lines.len() > 1, "bullet should wrap");
        for line in &bullet_lines {
            assert!((line.x - (left + BULLET_INDENT)).abs() < 1e-3);
            assert!(line.right_edge() <= doc.geometry.right() + 1e-3);
        }
        let glyph = find(&doc, "•");
        assert!((glyph.x - (left + BULLET_GUTTER)).abs() < 1e-3);
        assert_eq!(glyph.baseline, bullet_lines[0].baseline);
    }

    #[test]
    fn test_long_resume_paginates_within_margins() {
        let mut body = String::from("Jane Doe\n555-1234\n\nRELEVANT WORK EXPERIENCE\n\n");
        for job in 0..25 {
            body.push_str(&format!(
                "Engineer {job} at Company {job}\n2010 - 2012\n\
                 - Built and operated services handling millions of requests per day with strict latency budgets\n\
                 - Mentored four engineers\n\n"
            ));
        }
        let doc = layout(&body);
        assert!(doc.page_count() > 1);
        let g = doc.geometry;
        for page in &doc.pages {
            for run in page.text_runs() {
                assert!(run.x >= g.left() - 1e-3);
                assert!(run.right_edge() <= g.right() + 1e-3);
                assert!(run.baseline + run.size <= g.top() + 1e-3);
                assert!(run.baseline - 0.25 * run.size >= g.bottom() - 1e-3);
            }
        }
    }

    #[test]
    fn test_bullet_glyph_never_orphaned_from_its_text() {
        let mut body = String::from("Jane\n\nRELEVANT WORK EXPERIENCE\n\nEngineer\n");
        for i in 0..120 {
            body.push_str(&format!("- item {i} with a fairly long description that may wrap onto a second line here\n"));
        }
        let doc = layout(&body);
        for page in &doc.pages {
            let runs: Vec<_> = page.text_runs().collect();
            for (idx, run) in runs.iter().enumerate() {
                if run.text == "•" {
                    let next = runs.get(idx + 1).expect("glyph must be followed by text on the same page");
                    assert_eq!(next.baseline, run.baseline);
                }
            }
        }
    }

    #[test]
    fn test_extra_sections_lay_out_like_prose() {
        let titles: Vec<String> = SectionSet::with_applications_and_games()
            .rendered_titles()
            .into_iter()
            .map(str::to_string)
            .collect();
        let doc = layout_resume(
            "Jane\n\nAPPLICATIONS AND GAMES\n\nTetris clone in Rust\n- 10k downloads",
            &FontSet::standard(),
            &titles,
        );
        assert!(doc.plain_text().contains("APPLICATIONS AND GAMES\nTetris clone in Rust\n•\n10k downloads"));
    }
}
