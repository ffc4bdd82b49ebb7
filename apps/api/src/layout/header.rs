//! The two-zone header: a centered bold name line over a single centered
//! contact line that shrinks until it fits the printable width.

use crate::layout::context::{Align, LayoutContext};
use crate::layout::document::header_fields;
use crate::layout::font_metrics::{FontMetricTable, FontWeight};
use crate::layout::geometry::TypeScale;
use crate::layout::wrap::{wrap_text, WrappedLine};

pub const CONTACT_SEPARATOR: &str = "  |  ";

/// Size and lines chosen for the contact line.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactFit {
    pub size: f32,
    pub lines: Vec<WrappedLine>,
}

fn single_line(text: String, metrics: &FontMetricTable, size: f32) -> WrappedLine {
    WrappedLine {
        width: metrics.measure(&text, size),
        gaps: text.matches(' ').count(),
        text,
    }
}

/// Largest size in `body_size, body_size - step, ..., floor` at which the
/// joined contact fields fit on one line. Past the floor, fields are packed
/// onto as many centered lines as needed, never split mid-field unless a
/// single field is itself too wide.
pub fn fit_contact_line(
    fields: &[&str],
    metrics: &FontMetricTable,
    scale: &TypeScale,
    max_width: f32,
) -> ContactFit {
    let joined = fields.join(CONTACT_SEPARATOR);
    let mut size = scale.body_size;
    loop {
        let width = metrics.measure(&joined, size);
        if width <= max_width {
            return ContactFit {
                size,
                lines: vec![single_line(joined, metrics, size)],
            };
        }
        let next = size - scale.contact_step;
        if next < scale.contact_floor - f32::EPSILON {
            break;
        }
        size = next;
    }

    let size = scale.contact_floor;
    let mut lines: Vec<WrappedLine> = Vec::new();
    let mut current = String::new();
    for field in fields {
        let candidate = if current.is_empty() {
            field.to_string()
        } else {
            format!("{current}{CONTACT_SEPARATOR}{field}")
        };
        if metrics.measure(&candidate, size) <= max_width {
            current = candidate;
            continue;
        }
        if !current.is_empty() {
            lines.push(single_line(std::mem::take(&mut current), metrics, size));
        }
        current = field.to_string();
        if metrics.measure(&current, size) > max_width {
            lines.extend(wrap_text(&current, metrics, size, max_width));
            current.clear();
        }
    }
    if !current.is_empty() {
        lines.push(single_line(current, metrics, size));
    }
    ContactFit { size, lines }
}

/// Draws the header block. An empty header draws nothing.
pub fn layout_header(ctx: &mut LayoutContext<'_>, header: &str) {
    let fields = header_fields(header);
    let Some((name, contact)) = fields.split_first() else {
        return;
    };
    let scale = *ctx.scale();
    ctx.paragraph(name, FontWeight::Bold, scale.name_size, Align::Center, 0.0);

    if contact.is_empty() {
        return;
    }
    let fit = fit_contact_line(
        contact,
        ctx.fonts().metrics(FontWeight::Regular),
        &scale,
        ctx.geometry().printable_width(),
    );
    ctx.draw_lines(&fit.lines, FontWeight::Regular, fit.size, Align::Center, 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::helvetica;
    use crate::layout::fonts::FontSet;
    use crate::layout::geometry::{page_geometry, type_scale, DocumentKind};

    #[test]
    fn test_short_contact_line_keeps_body_size() {
        let scale = type_scale(DocumentKind::Resume);
        let fit = fit_contact_line(&["123 Main St", "555-1234", "jane@x.com"], &helvetica(), &scale, 498.0);
        assert_eq!(fit.size, scale.body_size);
        assert_eq!(fit.lines.len(), 1);
        assert_eq!(fit.lines[0].text, "123 Main St  |  555-1234  |  jane@x.com");
    }

    #[test]
    fn test_long_contact_line_shrinks_stepwise() {
        let scale = type_scale(DocumentKind::Resume);
        let metrics = helvetica();
        let fields = [
            "1234 Extraordinarily Long Boulevard Name, Apartment 5678",
            "+1 (555) 123-4567",
            "jane.doe.the.engineer@example.com",
        ];
        let max_width = page_geometry(DocumentKind::Resume).printable_width();
        let natural = metrics.measure(&fields.join(CONTACT_SEPARATOR), scale.body_size);
        assert!(natural > max_width, "fixture must overflow at body size");

        let fit = fit_contact_line(&fields, &metrics, &scale, max_width);
        assert!(fit.size < scale.body_size);
        assert!(fit.size >= scale.contact_floor);
        assert_eq!(fit.lines.len(), 1);
        assert!(fit.lines[0].width <= max_width);
        // one step larger would not have fit
        let larger = metrics.measure(&fit.lines[0].text, fit.size + scale.contact_step);
        assert!(larger > max_width);
    }

    #[test]
    fn test_contact_line_wraps_at_floor_without_overflow() {
        let scale = type_scale(DocumentKind::Resume);
        let metrics = helvetica();
        let fields: Vec<String> = (0..12).map(|i| format!("contact-field-number-{i}@example.com")).collect();
        let refs: Vec<&str> = fields.iter().map(String::as_str).collect();
        let max_width = page_geometry(DocumentKind::Resume).printable_width();

        let fit = fit_contact_line(&refs, &metrics, &scale, max_width);
        assert_eq!(fit.size, scale.contact_floor);
        assert!(fit.lines.len() > 1);
        for line in &fit.lines {
            assert!(line.width <= max_width, "'{}' is {}pt", line.text, line.width);
        }
        let all: String = fit.lines.iter().map(|l| l.text.clone()).collect::<Vec<_>>().join(" ");
        for field in &fields {
            assert!(all.contains(field.as_str()), "{field} was lost");
        }
    }

    #[test]
    fn test_layout_header_draws_name_then_single_contact_line() {
        let fonts = FontSet::standard();
        let mut ctx = LayoutContext::new(&fonts, DocumentKind::Resume);
        layout_header(&mut ctx, "Jane Doe\n123 Main St\n555-1234\njane@x.com");
        let doc = ctx.finish();
        let runs: Vec<_> = doc.text_runs().collect();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].text, "Jane Doe");
        assert_eq!(runs[0].weight, FontWeight::Bold);
        assert_eq!(runs[0].size, 20.0);
        assert_eq!(runs[1].weight, FontWeight::Regular);
        assert!(runs[1].baseline < runs[0].baseline);
    }

    #[test]
    fn test_layout_header_empty_draws_nothing() {
        let fonts = FontSet::standard();
        let mut ctx = LayoutContext::new(&fonts, DocumentKind::Resume);
        layout_header(&mut ctx, "   ");
        assert_eq!(ctx.finish().text_runs().count(), 0);
    }
}
