//! Reads a normalized document body back into its parts: the header block,
//! titled sections, blank-line separated blocks, and work-experience entries.

/// Glyphs that open a bullet line in generated text.
const BULLET_MARKERS: [char; 3] = ['-', '*', '•'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section<'a> {
    pub title: &'a str,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentedDocument<'a> {
    /// Everything before the first section title, trimmed.
    pub header: String,
    pub sections: Vec<Section<'a>>,
}

/// Splits a body on its section title lines.
///
/// A line is a title only when, once trimmed, it equals one of `titles` and
/// it opens the body or follows a blank line. A title-looking line in the
/// middle of a paragraph stays body text.
pub fn segment<'a>(body: &str, titles: &'a [String]) -> SegmentedDocument<'a> {
    let mut header = String::new();
    let mut sections: Vec<(&'a str, String)> = Vec::new();
    let mut prev_blank = true;

    for line in body.lines() {
        let trimmed = line.trim();
        let title = prev_blank
            .then(|| titles.iter().find(|t| t.as_str() == trimmed))
            .flatten();
        if let Some(title) = title {
            sections.push((title.as_str(), String::new()));
        } else {
            let target = match sections.last_mut() {
                Some((_, text)) => text,
                None => &mut header,
            };
            target.push_str(line.trim_end());
            target.push('\n');
        }
        prev_blank = trimmed.is_empty();
    }

    SegmentedDocument {
        header: header.trim().to_string(),
        sections: sections
            .into_iter()
            .map(|(title, text)| Section {
                title,
                body: text.trim().to_string(),
            })
            .collect(),
    }
}

/// Header fields, one per line, or comma-separated when the header is a single line.
pub fn header_fields(header: &str) -> Vec<&str> {
    let lines: Vec<&str> = header
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    match lines.as_slice() {
        [single] if single.contains(',') => single
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect(),
        _ => lines,
    }
}

/// Groups non-blank lines into blocks separated by one or more blank lines.
pub fn blocks(body: &str) -> Vec<Vec<&str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(trimmed);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }
    blocks
}

/// Returns the bullet text when `line` starts with a bullet marker.
pub fn strip_bullet_marker(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let first = trimmed.chars().next()?;
    if !BULLET_MARKERS.contains(&first) {
        return None;
    }
    let rest = &trimmed[first.len_utf8()..];
    // "-5%" or "*nix" are text, "- did X" and "•did X" are bullets
    if first == '•' || rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

/// One work-experience entry.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkEntry<'a> {
    pub heading: &'a str,
    pub dates: Option<&'a str>,
    pub bullets: Vec<&'a str>,
}

/// Decomposes a block: title/company line, an optional dates line, then bullets.
/// The second line counts as dates only when it carries no bullet marker.
pub fn parse_entry<'a>(lines: &[&'a str]) -> WorkEntry<'a> {
    let Some((&first, rest)) = lines.split_first() else {
        return WorkEntry::default();
    };
    let mut rest = rest.iter().copied();
    let mut entry = WorkEntry {
        heading: strip_bullet_marker(first).unwrap_or(first),
        ..WorkEntry::default()
    };
    if let Some(second) = rest.next() {
        match strip_bullet_marker(second) {
            Some(bullet) => entry.bullets.push(bullet),
            None => entry.dates = Some(second),
        }
    }
    entry
        .bullets
        .extend(rest.map(|line| strip_bullet_marker(line).unwrap_or(line)));
    entry.bullets.retain(|b| !b.is_empty());
    entry
}

/// Groups work-experience blocks into entries. A block that opens with a
/// bullet continues the previous entry, so bullets separated by blank lines
/// stay with their job.
pub fn work_entries<'a>(body: &'a str) -> Vec<WorkEntry<'a>> {
    let mut entries: Vec<WorkEntry<'a>> = Vec::new();
    for block in blocks(body) {
        let continues = strip_bullet_marker(block[0]).is_some();
        match entries.last_mut() {
            Some(last) if continues => last.bullets.extend(
                block
                    .iter()
                    .copied()
                    .map(|line| strip_bullet_marker(line).unwrap_or(line))
                    .filter(|b| !b.is_empty()),
            ),
            _ => entries.push(parse_entry(&block)),
        }
    }
    entries
}
