//! Prompt constants for the two generation calls.
//!
//! The analysis prompt asks for the labeled-section convention the parser
//! reads; its label list is rendered from the configured `SectionSet`, so the
//! prompt and the parser always agree. Templates use `{placeholder}` markers
//! replaced with `str::replace` before sending.

use crate::profile::labels::SectionKind;
use crate::profile::models::{ADDRESS, COMPANY_NAME, EMAIL, FULL_NAME, PHONE};
use crate::profile::SectionSet;

// ────────────────────────────────────────────────────────────────────────────
// Analysis (labeled sections)
// ────────────────────────────────────────────────────────────────────────────

pub const ANALYSIS_SYSTEM: &str = "\
You are an expert resume writer. You rewrite a candidate's resume so it targets a \
specific job description, using only facts present in the original resume. \
Never invent employers, dates, degrees, or metrics.\n\
\n\
Respond with plain text in the exact labeled format requested. \
Do NOT use markdown. Do NOT add any commentary before or after the labeled sections.";

pub const ANALYSIS_PROMPT_TEMPLATE: &str = "\
Tailor the resume below to the job description.\n\
\n\
Return the result using these labels, each on its own line followed by a colon, \
in this order:\n\
\n\
{label_format}\n\
\n\
FORMAT RULES:\n\
1. Each label must start its own line exactly as written, including the colon.\n\
2. HEADER: the candidate's name on the first line, then address, phone, and email, one per line.\n\
3. Separate work-experience entries with one blank line. Inside an entry: title and company \
on the first line, dates and location on the second line, then one achievement per line \
starting with \"- \".\n\
4. Do not put blank lines inside a work-experience entry.\n\
5. Leave out any section the resume gives you nothing for, but keep its label.\n\
\n\
RESUME:\n\
{resume_text}\n\
\n\
JOB DESCRIPTION:\n\
{job_description}";

fn section_guidance(kind: SectionKind) -> String {
    match kind {
        SectionKind::Header => "<name>\n<address>\n<phone>\n<email>".to_string(),
        SectionKind::Summary => "<two to four sentences aimed at the role>".to_string(),
        SectionKind::Education => "<degrees, schools, years>".to_string(),
        SectionKind::WorkExperience => {
            "<entry 1>\n\n<entry 2>\n\n<as many entries as the resume supports>".to_string()
        }
        SectionKind::CoverLetterInfo => [FULL_NAME, ADDRESS, EMAIL, PHONE, COMPANY_NAME]
            .iter()
            .map(|key| format!("{key}: <value>"))
            .collect::<Vec<_>>()
            .join("\n"),
        SectionKind::Extra => "<relevant items, one per line starting with \"- \">".to_string(),
    }
}

/// Renders the label block for `sections`, one label and placeholder per section.
pub fn label_format(sections: &SectionSet) -> String {
    sections
        .labels()
        .iter()
        .map(|label| format!("{}\n{}", label.token(), section_guidance(label.kind)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn build_analysis_prompt(resume_text: &str, job_description: &str, sections: &SectionSet) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{label_format}", &label_format(sections))
        .replace("{resume_text}", resume_text.trim())
        .replace("{job_description}", job_description.trim())
}

// ────────────────────────────────────────────────────────────────────────────
// Cover-letter prose
// ────────────────────────────────────────────────────────────────────────────

pub const COVER_LETTER_SYSTEM: &str = "\
You are an expert career coach who writes concise, specific cover letters. \
You write in the first person as the candidate and only claim experience the resume supports.\n\
\n\
Respond with the letter body only: plain-text paragraphs separated by one blank line. \
Do NOT include a date, addresses, a salutation such as \"Dear ...\", or a closing such as \
\"Sincerely\". Do NOT use markdown.";

pub const COVER_LETTER_PROMPT_TEMPLATE: &str = "\
Write the body of a cover letter for the job description below, based on the resume.\n\
\n\
RULES:\n\
1. Three or four paragraphs, under 350 words in total.\n\
2. Open with the role and why the candidate fits it; close with a call to action.\n\
3. Reference concrete achievements from the resume that match the job's requirements.\n\
\n\
RESUME:\n\
{resume_text}\n\
\n\
JOB DESCRIPTION:\n\
{job_description}";

pub fn build_cover_letter_prompt(resume_text: &str, job_description: &str) -> String {
    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{resume_text}", resume_text.trim())
        .replace("{job_description}", job_description.trim())
}
