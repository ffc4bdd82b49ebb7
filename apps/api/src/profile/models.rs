use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Recognised `COVER LETTER INFO` keys.
pub const FULL_NAME: &str = "Full Name";
pub const ADDRESS: &str = "Address";
pub const EMAIL: &str = "Email";
pub const PHONE: &str = "Phone";
pub const COMPANY_NAME: &str = "Company Name";

/// Key/value pairs parsed from the `COVER LETTER INFO` section.
///
/// Keys absent from the source text are absent here; there is no default
/// substitution. Unrecognised keys are kept so callers can inspect them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoverLetterInfo(BTreeMap<String, String>);

impl CoverLetterInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for `key` if present and non-empty.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    pub fn full_name(&self) -> Option<&str> {
        self.get(FULL_NAME)
    }

    pub fn address(&self) -> Option<&str> {
        self.get(ADDRESS)
    }

    pub fn email(&self) -> Option<&str> {
        self.get(EMAIL)
    }

    pub fn phone(&self) -> Option<&str> {
        self.get(PHONE)
    }

    pub fn company_name(&self) -> Option<&str> {
        self.get(COMPANY_NAME)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for CoverLetterInfo {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// An additional titled section beyond the fixed résumé fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraSection {
    pub title: String,
    pub body: String,
}

/// Structured result of parsing one generation-service response.
///
/// Transient: built per request and discarded after rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedProfile {
    /// Name and contact details, newline- or comma-delimited.
    pub header: String,
    pub summary: String,
    pub education: String,
    /// One element per job entry, in generation order.
    pub work_experience: Vec<String>,
    pub cover_letter_info: CoverLetterInfo,
    /// Configured extra sections that were present in the source, in configured order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extras: Vec<ExtraSection>,
    /// Titles of configured sections whose label never appeared in the source.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_sections: Vec<String>,
}

impl ParsedProfile {
    /// True if no section label was recognised at all.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty()
            && self.summary.is_empty()
            && self.education.is_empty()
            && self.work_experience.is_empty()
            && self.cover_letter_info.is_empty()
            && self.extras.is_empty()
    }

    pub fn extra(&self, title: &str) -> Option<&str> {
        self.extras
            .iter()
            .find(|e| e.title == title)
            .map(|e| e.body.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_letter_info_missing_key_is_none() {
        let info: CoverLetterInfo = [(FULL_NAME, "Jane Doe")].into_iter().collect();
        assert_eq!(info.full_name(), Some("Jane Doe"));
        assert_eq!(info.company_name(), None);
        assert_eq!(info.email(), None);
    }

    #[test]
    fn test_cover_letter_info_blank_value_is_none() {
        let mut info = CoverLetterInfo::new();
        info.insert(COMPANY_NAME, "   ");
        assert_eq!(info.company_name(), None);
        assert_eq!(info.len(), 1);
    }

    #[test]
    fn test_cover_letter_info_serializes_as_flat_map() {
        let info: CoverLetterInfo = [(FULL_NAME, "Jane Doe"), (COMPANY_NAME, "Acme")]
            .into_iter()
            .collect();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"Full Name": "Jane Doe", "Company Name": "Acme"})
        );
    }

    #[test]
    fn test_default_profile_is_empty() {
        assert!(ParsedProfile::default().is_empty());
    }
}
