//! Axum route handlers for the tailoring and rendering API.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extract::extract_upload_text_blocking;
use crate::generation::pipeline::{build_resume_and_cover_letter, render_blocking, TailoredDocuments};
use crate::layout::DocumentKind;
use crate::profile::ParsedProfile;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TailorRequest {
    pub resume_text: String,
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct TailorResponse {
    pub request_id: Uuid,
    pub fields: ParsedProfile,
    pub resume_body: String,
    pub cover_letter_body: String,
    pub resume_pages: usize,
    pub cover_letter_pages: usize,
    /// Base64-encoded PDF.
    pub resume_pdf: String,
    /// Base64-encoded PDF.
    pub cover_letter_pdf: String,
}

impl From<TailoredDocuments> for TailorResponse {
    fn from(docs: TailoredDocuments) -> Self {
        Self {
            request_id: docs.request_id,
            resume_pages: docs.resume.page_count,
            cover_letter_pages: docs.cover_letter.page_count,
            resume_pdf: STANDARD.encode(&docs.resume.bytes),
            cover_letter_pdf: STANDARD.encode(&docs.cover_letter.bytes),
            fields: docs.fields,
            resume_body: docs.resume_body,
            cover_letter_body: docs.cover_letter_body,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub body: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}

/// POST /api/v1/tailor
///
/// Generates, parses, composes and renders a tailored résumé and cover letter.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Json(request): Json<TailorRequest>,
) -> Result<Json<TailorResponse>, AppError> {
    let docs =
        build_resume_and_cover_letter(&state, &request.resume_text, &request.job_description, today())
            .await?;
    Ok(Json(docs.into()))
}

/// POST /api/v1/tailor/upload
///
/// Multipart form: a `resume` file (PDF or plain text) and a `job_description` text field.
pub async fn handle_tailor_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TailorResponse>, AppError> {
    let mut resume_text: Option<String> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("resume") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("could not read resume upload: {e}")))?;
                resume_text = Some(extract_upload_text_blocking(file_name, content_type, data).await?);
            }
            Some("job_description") => {
                job_description = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("could not read job_description: {e}"))
                })?);
            }
            _ => {}
        }
    }

    let resume_text =
        resume_text.ok_or_else(|| AppError::Validation("missing 'resume' file part".to_string()))?;
    let job_description = job_description
        .ok_or_else(|| AppError::Validation("missing 'job_description' part".to_string()))?;

    let docs = build_resume_and_cover_letter(&state, &resume_text, &job_description, today()).await?;
    Ok(Json(docs.into()))
}

/// POST /api/v1/render/:kind
///
/// Renders an already-normalized body. `kind` is `resume` or `cover_letter`.
pub async fn handle_render(
    State(state): State<AppState>,
    Path(kind): Path<DocumentKind>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    if request.body.trim().is_empty() {
        return Err(AppError::Validation("body cannot be empty".to_string()));
    }

    let output = render_blocking(
        request.body,
        kind,
        state.fonts.clone(),
        state.render_options.clone(),
    )
    .await?;

    info!(kind = %kind, pages = output.page_count, "Rendered document on request");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"{kind}.pdf\""),
            ),
        ],
        output.bytes,
    )
        .into_response())
}
