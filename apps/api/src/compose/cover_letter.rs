//! Cover-letter envelope around generated prose.
//!
//! ```text
//! <Full Name>
//! <Address>
//! <Phone>
//! <Email>
//!
//! October 18, 2026
//!
//! Dear <Company Name> Hiring Team,
//!
//! <prose paragraphs>
//!
//! Sincerely,
//! <Full Name>
//! ```

use chrono::NaiveDate;

use crate::profile::CoverLetterInfo;

/// Salutation used when the company name is unknown.
pub const FALLBACK_SALUTATION: &str = "Dear Hiring Manager,";
pub const CLOSING: &str = "Sincerely,";

/// Openers that mark a closing block the model added on its own.
const CLOSING_OPENERS: &[&str] = &[
    "Sincerely",
    "Best regards",
    "Kind regards",
    "Warm regards",
    "Regards",
    "Yours sincerely",
    "Yours truly",
    "Respectfully",
];

/// Formats `date` as `Month DD, YYYY` (English month names, no locale lookup).
pub fn format_letter_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

pub fn salutation(info: &CoverLetterInfo) -> String {
    match info.company_name() {
        Some(company) => format!("Dear {} Hiring Team,", company.trim()),
        None => FALLBACK_SALUTATION.to_string(),
    }
}

/// Builds the full cover-letter body from generated prose and sender details.
///
/// Missing sender fields are skipped rather than printed empty. Any salutation
/// or closing the model echoed inside `prose` is stripped so the envelope is
/// never duplicated.
pub fn compose_cover_letter_body(prose: &str, info: &CoverLetterInfo, date: NaiveDate) -> String {
    let mut blocks: Vec<String> = Vec::new();

    let sender: Vec<&str> = [info.full_name(), info.address(), info.phone(), info.email()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .collect();
    if !sender.is_empty() {
        blocks.push(sender.join("\n"));
    }

    blocks.push(format_letter_date(date));
    blocks.push(salutation(info));

    let paragraphs = prose_paragraphs(prose);
    if !paragraphs.is_empty() {
        blocks.push(paragraphs.join("\n\n"));
    }

    match info.full_name() {
        Some(name) => blocks.push(format!("{CLOSING}\n{}", name.trim())),
        None => blocks.push(CLOSING.to_string()),
    }

    blocks.join("\n\n")
}

/// Splits prose into trimmed paragraphs, dropping an echoed salutation at the
/// start and an echoed closing block at the end.
fn prose_paragraphs(prose: &str) -> Vec<String> {
    let mut paragraphs: Vec<String> = prose
        .split("\n\n")
        .map(|p| {
            p.lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .filter(|p| !p.is_empty())
        .collect();

    if let Some(first) = paragraphs.first_mut() {
        if is_salutation(first) {
            // The salutation may share a block with the first sentence.
            *first = first
                .split_once('\n')
                .map(|(_, rest)| rest.to_string())
                .unwrap_or_default();
        }
    }
    paragraphs.retain(|p| !p.is_empty());

    if let Some(pos) = closing_start(&paragraphs) {
        paragraphs.truncate(pos);
    }

    paragraphs
}

/// Whether a line opens the letter's greeting.
pub fn is_salutation(line: &str) -> bool {
    line.trim_start().starts_with("Dear ")
}

/// Whether a block opens with a line that is only a closing phrase, such as
/// `Sincerely,` or `Best regards`. A sentence that merely starts with one of
/// those words ("Respectfully, I believe ...") is body text.
pub fn is_closing(block: &str) -> bool {
    let first_line = block.lines().next().unwrap_or_default().trim();
    let phrase = first_line.trim_end_matches([',', '.']).trim_end();
    CLOSING_OPENERS
        .iter()
        .any(|opener| phrase.eq_ignore_ascii_case(opener))
}

/// A lone short line without sentence punctuation, e.g. a signed name.
fn is_signature(block: &str) -> bool {
    let mut lines = block.lines();
    let (Some(line), None) = (lines.next(), lines.next()) else {
        return false;
    };
    let line = line.trim();
    !line.is_empty()
        && line.split_whitespace().count() <= 6
        && !line.ends_with(['.', '!', '?', ':'])
}

/// Index of the trailing closing block: the last block, or the one before it
/// when the last block is only a signature line.
pub fn closing_start<B: AsRef<str>>(blocks: &[B]) -> Option<usize> {
    let last = blocks.len().checked_sub(1)?;
    if is_closing(blocks[last].as_ref()) {
        return Some(last);
    }
    let prev = last.checked_sub(1)?;
    (is_closing(blocks[prev].as_ref()) && is_signature(blocks[last].as_ref())).then_some(prev)
}
