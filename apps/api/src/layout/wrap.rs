//! Greedy word wrapping against measured glyph widths.
//!
//! Lines break only at spaces. A single word wider than the whole line is the
//! one exception: it is split between characters so no line ever overflows.

use crate::layout::font_metrics::FontMetricTable;

/// One wrapped line and its natural width in points.
#[derive(Debug, Clone, PartialEq)]
pub struct WrappedLine {
    pub text: String,
    pub width: f32,
    /// Number of inter-word spaces, used for justification.
    pub gaps: usize,
}

impl WrappedLine {
    fn from_words(words: &[String], metrics: &FontMetricTable, size: f32) -> Self {
        let text = words.join(" ");
        Self {
            width: metrics.measure(&text, size),
            gaps: words.len().saturating_sub(1),
            text,
        }
    }
}

/// Splits a word wider than `max_width` into pieces that each fit.
fn split_long_word(word: &str, metrics: &FontMetricTable, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;
    for ch in word.chars() {
        let mut buf = [0u8; 4];
        let ch_width = metrics.measure(ch.encode_utf8(&mut buf), size);
        if !current.is_empty() && current_width + ch_width > max_width {
            pieces.push(std::mem::take(&mut current));
            current_width = 0.0;
        }
        current.push(ch);
        current_width += ch_width;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

/// Wraps `text` into lines no wider than `max_width` points at `size`.
///
/// Runs of whitespace collapse to one space. Empty or blank input yields no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size: f32,
    max_width: f32,
) -> Vec<WrappedLine> {
    let space_w = metrics.space_width(size);
    let mut lines = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure(word, size);
        if word_w > max_width {
            if !current.is_empty() {
                lines.push(WrappedLine::from_words(&current, metrics, size));
                current.clear();
            }
            let mut pieces = split_long_word(word, metrics, size, max_width);
            // The last piece may share its line with the words that follow.
            if let Some(last) = pieces.pop() {
                for piece in pieces {
                    lines.push(WrappedLine::from_words(&[piece], metrics, size));
                }
                current_width = metrics.measure(&last, size);
                current.push(last);
            }
            continue;
        }

        if !current.is_empty() && current_width + space_w + word_w > max_width {
            lines.push(WrappedLine::from_words(&current, metrics, size));
            current.clear();
            current_width = 0.0;
        }
        if !current.is_empty() {
            current_width += space_w;
        }
        current_width += word_w;
        current.push(word.to_string());
    }
    if !current.is_empty() {
        lines.push(WrappedLine::from_words(&current, metrics, size));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::font_metrics::helvetica;

    #[test]
    fn test_empty_text_returns_no_lines() {
        assert!(wrap_text("", &helvetica(), 11.0, 400.0).is_empty());
        assert!(wrap_text("   \n ", &helvetica(), 11.0, 400.0).is_empty());
    }

    #[test]
    fn test_short_text_stays_on_one_line() {
        let lines = wrap_text("Built a compiler", &helvetica(), 11.0, 400.0);
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Built a compiler");
        assert_eq!(lines[0].gaps, 2);
    }

    #[test]
    fn test_long_text_wraps_within_width() {
        let metrics = helvetica();
        let text = "Designed and shipped a distributed build cache that cut CI times \
                    by forty percent across three hundred repositories and two data centers";
        let lines = wrap_text(text, &metrics, 11.0, 200.0);
        assert!(lines.len() > 2, "expected several lines, got {}", lines.len());
        for line in &lines {
            assert!(line.width <= 200.0, "line '{}' is {}pt wide", line.text, line.width);
        }
        let rejoined: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(rejoined.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let lines = wrap_text("a   b\tc", &helvetica(), 11.0, 400.0);
        assert_eq!(lines[0].text, "a b c");
    }

    #[test]
    fn test_oversized_word_is_split() {
        let metrics = helvetica();
        let word = "x".repeat(200);
        let lines = wrap_text(&word, &metrics, 11.0, 100.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.width <= 100.0);
        }
        let joined: String = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(joined, word);
    }

    #[test]
    fn test_line_width_matches_measurement() {
        let metrics = helvetica();
        let lines = wrap_text("Jane Doe", &metrics, 20.0, 500.0);
        assert!((lines[0].width - metrics.measure("Jane Doe", 20.0)).abs() < 1e-3);
    }
}
