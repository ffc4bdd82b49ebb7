//! Résumé + cover-letter pipeline.
//!
//! 1. analysis call → labeled sections (`generation::prompts`)
//! 2. `parse_profile` → `ParsedProfile`
//! 3. cover-letter prose call
//! 4. `compose_resume` / `compose_cover_letter_body` with the injected date
//! 5. both renders on `spawn_blocking`, concurrently
//!
//! No retries here: an upstream failure aborts the whole request before any
//! document is rendered.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::compose::{compose_cover_letter_body, compose_resume};
use crate::errors::AppError;
use crate::generation::prompts::{
    build_analysis_prompt, build_cover_letter_prompt, ANALYSIS_SYSTEM, COVER_LETTER_SYSTEM,
};
use crate::layout::{DocumentKind, FontSet};
use crate::profile::{parse_profile, ParsedProfile};
use crate::render::{render, RenderOptions, RenderOutput};
use crate::state::AppState;

/// Everything one tailoring request produces.
#[derive(Debug, Clone, Serialize)]
pub struct TailoredDocuments {
    pub request_id: Uuid,
    pub fields: ParsedProfile,
    pub resume_body: String,
    pub cover_letter_body: String,
    #[serde(skip)]
    pub resume: RenderOutput,
    #[serde(skip)]
    pub cover_letter: RenderOutput,
}

/// Renders on the blocking pool. Each call owns its own layout state.
pub async fn render_blocking(
    body: String,
    kind: DocumentKind,
    fonts: Arc<FontSet>,
    options: Arc<RenderOptions>,
) -> Result<RenderOutput, AppError> {
    let output = tokio::task::spawn_blocking(move || render(&body, kind, &fonts, &options))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in {kind} render: {e}")))??;
    Ok(output)
}

pub async fn build_resume_and_cover_letter(
    state: &AppState,
    resume_text: &str,
    job_description: &str,
    today: NaiveDate,
) -> Result<TailoredDocuments, AppError> {
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume text cannot be empty".to_string()));
    }
    if job_description.trim().is_empty() {
        return Err(AppError::Validation("job description cannot be empty".to_string()));
    }

    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        resume_chars = resume_text.len(),
        job_description_chars = job_description.len(),
        "Generating tailored documents"
    );

    let analysis = state
        .generator
        .generate_text(
            ANALYSIS_SYSTEM,
            &build_analysis_prompt(resume_text, job_description, &state.sections),
        )
        .await?;

    let fields = parse_profile(&analysis, &state.sections);
    if !fields.missing_sections.is_empty() {
        warn!(
            %request_id,
            missing = ?fields.missing_sections,
            "Generated text is missing sections; continuing with empty fields"
        );
    }

    let prose = state
        .generator
        .generate_text(
            COVER_LETTER_SYSTEM,
            &build_cover_letter_prompt(resume_text, job_description),
        )
        .await?;

    let resume_body = compose_resume(&fields);
    let cover_letter_body = compose_cover_letter_body(&prose, &fields.cover_letter_info, today);

    let (resume, cover_letter) = tokio::try_join!(
        render_blocking(
            resume_body.clone(),
            DocumentKind::Resume,
            state.fonts.clone(),
            state.render_options.clone(),
        ),
        render_blocking(
            cover_letter_body.clone(),
            DocumentKind::CoverLetter,
            state.fonts.clone(),
            state.render_options.clone(),
        ),
    )?;

    info!(
        %request_id,
        resume_pages = resume.page_count,
        cover_letter_pages = cover_letter.page_count,
        "Tailored documents rendered"
    );

    Ok(TailoredDocuments {
        request_id,
        fields,
        resume_body,
        cover_letter_body,
        resume,
        cover_letter,
    })
}
