//! Line-oriented section parser.
//!
//! The scanner is a two-state machine: before the first recognised label every
//! line is discarded (model preambles such as "Sure! Here is..."), afterwards
//! every line, blank ones included, is appended to the active section until the
//! next label line. Blank lines are kept because they delimit work-experience
//! entries.

use std::collections::BTreeMap;

use tracing::debug;

use crate::profile::labels::{SectionKind, SectionLabel, SectionSet};
use crate::profile::models::{CoverLetterInfo, ExtraSection, ParsedProfile};

enum ScanState {
    /// No label seen yet.
    Preamble,
    /// Accumulating into the section at this index of the label set.
    Active(usize),
}

/// Parses labeled free text into a `ParsedProfile`.
///
/// Never fails: a missing section yields an empty string, map or sequence, and
/// is listed in `ParsedProfile::missing_sections`. A duplicated label restarts
/// that section, so the last occurrence wins.
pub fn parse_profile(raw: &str, sections: &SectionSet) -> ParsedProfile {
    let bodies = scan_sections(raw, sections);

    let mut profile = ParsedProfile::default();
    for (idx, label) in sections.labels().iter().enumerate() {
        let Some(body) = bodies.get(&idx) else {
            profile.missing_sections.push(label.title.clone());
            continue;
        };
        assign_section(&mut profile, label, body);
    }

    debug!(
        work_entries = profile.work_experience.len(),
        cover_letter_keys = profile.cover_letter_info.len(),
        missing = ?profile.missing_sections,
        "Parsed generated profile"
    );

    profile
}

/// Scans `raw` and returns the trimmed body of every section that appeared,
/// keyed by label index.
fn scan_sections(raw: &str, sections: &SectionSet) -> BTreeMap<usize, String> {
    let mut bodies: BTreeMap<usize, Vec<&str>> = BTreeMap::new();
    let mut state = ScanState::Preamble;

    for line in raw.lines() {
        if let Some((idx, label)) = match_label(sections, line) {
            // The token is excluded; anything after it on the same line is body text.
            let rest = line[label.token().len()..].trim();
            let acc = bodies.entry(idx).or_default();
            acc.clear();
            if !rest.is_empty() {
                acc.push(rest);
            }
            state = ScanState::Active(idx);
            continue;
        }

        match state {
            ScanState::Preamble => {}
            ScanState::Active(idx) => {
                // Whitespace-only lines are normalised to empty so that entry
                // boundaries are always a bare "\n\n".
                let line = line.trim_end();
                bodies.entry(idx).or_default().push(line);
            }
        }
    }

    bodies
        .into_iter()
        .map(|(idx, lines)| (idx, lines.join("\n").trim().to_string()))
        .collect()
}

fn match_label<'a>(sections: &'a SectionSet, line: &str) -> Option<(usize, &'a SectionLabel)> {
    let label = sections.match_line(line)?;
    let idx = sections.labels().iter().position(|l| l == label)?;
    Some((idx, label))
}

fn assign_section(profile: &mut ParsedProfile, label: &SectionLabel, body: &str) {
    match label.kind {
        SectionKind::Header => profile.header = body.to_string(),
        SectionKind::Summary => profile.summary = body.to_string(),
        SectionKind::Education => profile.education = body.to_string(),
        SectionKind::WorkExperience => profile.work_experience = split_entries(body),
        SectionKind::CoverLetterInfo => profile.cover_letter_info = parse_key_values(body),
        SectionKind::Extra => profile.extras.push(ExtraSection {
            title: label.title.clone(),
            body: body.to_string(),
        }),
    }
}

/// Splits a section body on blank-line boundaries, dropping empty entries.
pub fn split_entries(body: &str) -> Vec<String> {
    body.split("\n\n")
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

/// Parses `Key: Value` lines, splitting on the first colon.
///
/// Lines without a colon, or with an empty key, are skipped.
pub fn parse_key_values(body: &str) -> CoverLetterInfo {
    body.lines()
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}
