//! Résumé body composition.
//!
//! Output shape (the normalized document handed to the layout engine):
//!
//! ```text
//! <header block>
//!
//! SUMMARY
//! <summary>
//!
//! EDUCATION
//! <education>
//!
//! RELEVANT WORK EXPERIENCE
//! <entry 1>
//!
//! <entry 2>
//! ```
//!
//! The order is fixed regardless of the order sections appeared in the source.
//! The three core titles are always emitted, even over an empty body; extra
//! sections are appended after work experience only when non-empty.

use crate::profile::labels::{EDUCATION, SUMMARY, WORK_EXPERIENCE};
use crate::profile::ParsedProfile;

pub fn compose_resume(profile: &ParsedProfile) -> String {
    let mut segments: Vec<String> = Vec::with_capacity(4 + profile.extras.len());

    segments.push(profile.header.trim().to_string());
    segments.push(titled(SUMMARY, profile.summary.trim()));
    segments.push(titled(EDUCATION, profile.education.trim()));

    let entries: Vec<&str> = profile
        .work_experience
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .collect();
    segments.push(titled(WORK_EXPERIENCE, &entries.join("\n\n")));

    for extra in &profile.extras {
        let body = extra.body.trim();
        if !body.is_empty() {
            segments.push(titled(&extra.title, body));
        }
    }

    segments.join("\n\n")
}

fn titled(title: &str, body: &str) -> String {
    if body.is_empty() {
        title.to_string()
    } else {
        format!("{title}\n{body}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::models::ExtraSection;
    use crate::profile::{parse_profile, SectionSet};

    fn profile() -> ParsedProfile {
        ParsedProfile {
            header: "Jane Doe\n123 Main St\n555-1234\njane@x.com".to_string(),
            summary: "I build things.".to_string(),
            education: "B.S. CS".to_string(),
            work_experience: vec![
                "Engineer at Acme\n- did X".to_string(),
                "Intern at Initech\n- did Y".to_string(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_compose_resume_exact_layout() {
        let body = compose_resume(&profile());
        assert_eq!(
            body,
            "Jane Doe\n123 Main St\n555-1234\njane@x.com\n\n\
             SUMMARY\nI build things.\n\n\
             EDUCATION\nB.S. CS\n\n\
             RELEVANT WORK EXPERIENCE\nEngineer at Acme\n- did X\n\nIntern at Initech\n- did Y"
        );
    }

    #[test]
    fn test_section_order_is_fixed_regardless_of_source_order() {
        let raw = "RELEVANT WORK EXPERIENCE:\nEngineer\n\nEDUCATION:\nB.S.\n\nSUMMARY:\nHi.\n\nHEADER:\nJane";
        let body = compose_resume(&parse_profile(raw, &SectionSet::default()));
        let header = body.find("Jane").unwrap();
        let summary = body.find("SUMMARY").unwrap();
        let education = body.find("EDUCATION").unwrap();
        let work = body.find("RELEVANT WORK EXPERIENCE").unwrap();
        assert!(header < summary && summary < education && education < work);
    }

    #[test]
    fn test_empty_sections_keep_their_titles() {
        let body = compose_resume(&ParsedProfile::default());
        assert_eq!(body, "\n\nSUMMARY\n\nEDUCATION\n\nRELEVANT WORK EXPERIENCE");
    }

    #[test]
    fn test_extras_follow_work_experience_when_non_empty() {
        let mut p = profile();
        p.extras = vec![
            ExtraSection {
                title: "APPLICATIONS AND GAMES".to_string(),
                body: "Built a roguelike.".to_string(),
            },
            ExtraSection {
                title: "AWARDS".to_string(),
                body: "   ".to_string(),
            },
        ];
        let body = compose_resume(&p);
        assert!(body.ends_with("\n\nAPPLICATIONS AND GAMES\nBuilt a roguelike."));
        assert!(!body.contains("AWARDS"));
    }
}
