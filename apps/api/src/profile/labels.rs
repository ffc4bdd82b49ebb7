//! Section label tokens recognised by the parser.
//!
//! The label set is configuration: the analysis prompt and the parser must be
//! built from the same `SectionSet` so that every label the model is asked to
//! produce is also one the parser recognises.

use serde::{Deserialize, Serialize};

/// The semantic role a labeled section plays in the parsed profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Header,
    Summary,
    Education,
    WorkExperience,
    CoverLetterInfo,
    /// Any additional titled section (e.g. "APPLICATIONS AND GAMES").
    Extra,
}

/// A single recognised label, e.g. `SUMMARY:`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLabel {
    /// Upper-case title without the trailing colon, e.g. `RELEVANT WORK EXPERIENCE`.
    pub title: String,
    pub kind: SectionKind,
}

impl SectionLabel {
    pub fn new(title: impl Into<String>, kind: SectionKind) -> Self {
        Self {
            title: title.into(),
            kind,
        }
    }

    /// The exact token that opens this section at the start of a line.
    pub fn token(&self) -> String {
        format!("{}:", self.title)
    }

    /// Whether the section's title is printed in the rendered résumé.
    pub fn is_rendered_title(&self) -> bool {
        !matches!(self.kind, SectionKind::Header | SectionKind::CoverLetterInfo)
    }
}

/// Ordered set of labels recognised for one generation prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSet {
    labels: Vec<SectionLabel>,
}

pub const HEADER: &str = "HEADER";
pub const SUMMARY: &str = "SUMMARY";
pub const EDUCATION: &str = "EDUCATION";
pub const WORK_EXPERIENCE: &str = "RELEVANT WORK EXPERIENCE";
pub const APPLICATIONS_AND_GAMES: &str = "APPLICATIONS AND GAMES";
pub const COVER_LETTER_INFO: &str = "COVER LETTER INFO";

impl Default for SectionSet {
    fn default() -> Self {
        Self::new(vec![
            SectionLabel::new(HEADER, SectionKind::Header),
            SectionLabel::new(SUMMARY, SectionKind::Summary),
            SectionLabel::new(EDUCATION, SectionKind::Education),
            SectionLabel::new(WORK_EXPERIENCE, SectionKind::WorkExperience),
            SectionLabel::new(COVER_LETTER_INFO, SectionKind::CoverLetterInfo),
        ])
    }
}

impl SectionSet {
    pub fn new(labels: Vec<SectionLabel>) -> Self {
        Self { labels }
    }

    /// The default set plus the optional APPLICATIONS AND GAMES section.
    pub fn with_applications_and_games() -> Self {
        Self::default().with_extra(APPLICATIONS_AND_GAMES)
    }

    /// Adds an extra titled section after the existing résumé sections.
    pub fn with_extra(mut self, title: impl Into<String>) -> Self {
        let at = self
            .labels
            .iter()
            .rposition(SectionLabel::is_rendered_title)
            .map_or(self.labels.len(), |idx| idx + 1);
        self.labels.insert(at, SectionLabel::new(title, SectionKind::Extra));
        self
    }

    pub fn labels(&self) -> &[SectionLabel] {
        &self.labels
    }

    /// Returns the label whose token opens `line`, if any.
    ///
    /// Matching is case-sensitive and anchored at the first byte of the line.
    /// When several tokens match (one title being a prefix of another), the
    /// longest token wins.
    pub fn match_line(&self, line: &str) -> Option<&SectionLabel> {
        self.labels
            .iter()
            .filter(|l| line.starts_with(&l.token()))
            .max_by_key(|l| l.title.len())
    }

    /// Titles printed in the rendered résumé, in configured order.
    pub fn rendered_titles(&self) -> Vec<&str> {
        self.labels
            .iter()
            .filter(|l| l.is_rendered_title())
            .map(|l| l.title.as_str())
            .collect()
    }

    /// Extra sections, in configured order.
    pub fn extras(&self) -> impl Iterator<Item = &SectionLabel> {
        self.labels.iter().filter(|l| l.kind == SectionKind::Extra)
    }
}
