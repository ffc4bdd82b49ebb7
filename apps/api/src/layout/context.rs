//! Layout state: the cursor, the page list, and the display list each page
//! accumulates. One `LayoutContext` belongs to exactly one render call.

use serde::Serialize;

use crate::layout::font_metrics::FontWeight;
use crate::layout::fonts::FontSet;
use crate::layout::geometry::{page_geometry, type_scale, DocumentKind, PageGeometry, TypeScale};
use crate::layout::wrap::{wrap_text, WrappedLine};

// ────────────────────────────────────────────────────────────────────────────
// Display list
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    /// Stretch inter-word spaces to the full width; last line stays left.
    Justify,
}

/// One positioned line of text. `x`/`baseline` are in PDF user space.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextRun {
    pub x: f32,
    pub baseline: f32,
    pub weight: FontWeight,
    pub size: f32,
    pub text: String,
    /// Natural width, before word spacing.
    pub width: f32,
    /// Extra space added to every space character.
    pub word_spacing: f32,
}

impl TextRun {
    pub fn rendered_width(&self) -> f32 {
        self.width + self.word_spacing * self.text.matches(' ').count() as f32
    }

    pub fn right_edge(&self) -> f32 {
        self.x + self.rendered_width()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Text(TextRun),
    Rule {
        x_start: f32,
        x_end: f32,
        y: f32,
        thickness: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            DrawOp::Rule { .. } => None,
        })
    }
}

/// A fully paginated document, ready for serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutDocument {
    pub kind: DocumentKind,
    pub geometry: PageGeometry,
    pub pages: Vec<Page>,
}

impl LaidOutDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn text_runs(&self) -> impl Iterator<Item = &TextRun> {
        self.pages.iter().flat_map(Page::text_runs)
    }

    /// Every line's text in drawing order, one per line.
    pub fn plain_text(&self) -> String {
        self.text_runs()
            .map(|run| run.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Context
// ────────────────────────────────────────────────────────────────────────────

/// Space above and below a horizontal rule.
const RULE_PADDING: f32 = 2.0;

/// Vertical space a rule of `thickness` occupies.
pub fn rule_height(thickness: f32) -> f32 {
    2.0 * RULE_PADDING + thickness
}

pub struct LayoutContext<'a> {
    fonts: &'a FontSet,
    kind: DocumentKind,
    geometry: PageGeometry,
    scale: TypeScale,
    pages: Vec<Page>,
    /// Top of the next line box.
    cursor_y: f32,
    page_has_content: bool,
}

impl<'a> LayoutContext<'a> {
    pub fn new(fonts: &'a FontSet, kind: DocumentKind) -> Self {
        let geometry = page_geometry(kind);
        Self {
            fonts,
            kind,
            geometry,
            scale: type_scale(kind),
            pages: vec![Page::default()],
            cursor_y: geometry.top(),
            page_has_content: false,
        }
    }

    pub fn fonts(&self) -> &FontSet {
        self.fonts
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn scale(&self) -> &TypeScale {
        &self.scale
    }

    pub fn cursor_y(&self) -> f32 {
        self.cursor_y
    }

    pub fn remaining(&self) -> f32 {
        self.cursor_y - self.geometry.bottom()
    }

    pub fn line_height(&self, size: f32) -> f32 {
        self.scale.line_height(size)
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.cursor_y = self.geometry.top();
        self.page_has_content = false;
    }

    /// Starts a new page unless `height` still fits above the bottom margin.
    /// A fresh page never breaks again, so oversized content cannot loop.
    pub fn ensure_space(&mut self, height: f32) {
        if self.page_has_content && height > self.remaining() + f32::EPSILON {
            self.new_page();
        }
    }

    /// Like `ensure_space`, but only for blocks that fit on a fresh page.
    /// Taller blocks flow across the break line by line.
    pub fn keep_together(&mut self, height: f32) {
        if height <= self.geometry.printable_height() {
            self.ensure_space(height);
        }
    }

    /// Vertical whitespace. Suppressed at the top of a page.
    pub fn gap(&mut self, height: f32) {
        if self.page_has_content {
            self.cursor_y -= height;
        }
    }

    /// Reserves one line box and returns its baseline.
    pub fn next_baseline(&mut self, size: f32) -> f32 {
        self.ensure_space(self.line_height(size));
        self.cursor_y - size
    }

    pub fn advance(&mut self, height: f32) {
        self.cursor_y -= height;
        self.page_has_content = true;
    }

    fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn push_text(
        &mut self,
        x: f32,
        baseline: f32,
        weight: FontWeight,
        size: f32,
        text: &str,
        word_spacing: f32,
    ) {
        let width = self.fonts.metrics(weight).measure(text, size);
        self.current_page().ops.push(DrawOp::Text(TextRun {
            x,
            baseline,
            weight,
            size,
            text: text.to_string(),
            width,
            word_spacing,
        }));
    }

    pub fn wrap(&self, text: &str, weight: FontWeight, size: f32, max_width: f32) -> Vec<WrappedLine> {
        wrap_text(text, self.fonts.metrics(weight), size, max_width)
    }

    /// Draws pre-wrapped lines starting at `indent` from the left margin.
    pub fn draw_lines(
        &mut self,
        lines: &[WrappedLine],
        weight: FontWeight,
        size: f32,
        align: Align,
        indent: f32,
    ) {
        let available = self.geometry.printable_width() - indent;
        let left = self.geometry.left() + indent;
        let line_height = self.line_height(size);
        for (idx, line) in lines.iter().enumerate() {
            let is_last = idx + 1 == lines.len();
            let (x, word_spacing) = match align {
                Align::Left => (left, 0.0),
                Align::Center => (left + ((available - line.width) / 2.0).max(0.0), 0.0),
                Align::Justify if !is_last && line.gaps > 0 => {
                    (left, ((available - line.width) / line.gaps as f32).max(0.0))
                }
                Align::Justify => (left, 0.0),
            };
            let baseline = self.next_baseline(size);
            self.push_text(x, baseline, weight, size, &line.text, word_spacing);
            self.advance(line_height);
        }
    }

    /// Wraps and draws `text` as one paragraph.
    pub fn paragraph(&mut self, text: &str, weight: FontWeight, size: f32, align: Align, indent: f32) {
        let lines = self.wrap(text, weight, size, self.geometry.printable_width() - indent);
        self.draw_lines(&lines, weight, size, align, indent);
    }

    /// A full-width horizontal rule below the cursor.
    pub fn rule(&mut self, thickness: f32) {
        self.ensure_space(rule_height(thickness));
        let y = self.cursor_y - RULE_PADDING;
        let (x_start, x_end) = (self.geometry.left(), self.geometry.right());
        self.current_page().ops.push(DrawOp::Rule {
            x_start,
            x_end,
            y,
            thickness,
        });
        self.advance(rule_height(thickness));
    }

    pub fn finish(self) -> LaidOutDocument {
        LaidOutDocument {
            kind: self.kind,
            geometry: self.geometry,
            pages: self.pages,
        }
    }
}
