//! Upload text extraction: PDFs through `pdf-extract`, anything else as UTF-8.

use bytes::Bytes;
use tracing::debug;

use crate::errors::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

fn is_pdf(file_name: Option<&str>, content_type: Option<&str>, data: &[u8]) -> bool {
    data.starts_with(PDF_MAGIC)
        || content_type.is_some_and(|ct| ct.eq_ignore_ascii_case("application/pdf"))
        || file_name.is_some_and(|name| name.to_ascii_lowercase().ends_with(".pdf"))
}

/// Extracts plain text from an uploaded résumé.
pub fn extract_upload_text(
    file_name: Option<&str>,
    content_type: Option<&str>,
    data: &[u8],
) -> Result<String, AppError> {
    if data.is_empty() {
        return Err(AppError::Validation("uploaded file is empty".to_string()));
    }

    let text = if is_pdf(file_name, content_type, data) {
        pdf_extract::extract_text_from_mem(data)
            .map_err(|e| AppError::Validation(format!("could not read PDF: {e}")))?
    } else {
        String::from_utf8(data.to_vec())
            .map_err(|_| AppError::Validation("uploaded file is not UTF-8 text or PDF".to_string()))?
    };

    debug!(
        file_name = file_name.unwrap_or("<unnamed>"),
        chars = text.len(),
        "Extracted upload text"
    );

    if text.trim().is_empty() {
        return Err(AppError::Validation("no text found in uploaded file".to_string()));
    }
    Ok(text)
}

/// Runs [`extract_upload_text`] on the blocking pool; PDF parsing of
/// untrusted uploads is CPU-bound.
pub async fn extract_upload_text_blocking(
    file_name: Option<String>,
    content_type: Option<String>,
    data: Bytes,
) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || {
        extract_upload_text(file_name.as_deref(), content_type.as_deref(), &data)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in upload extraction: {e}")))?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_upload() {
        let text = extract_upload_text(Some("resume.txt"), Some("text/plain"), "Jane Doe\nEngineer".as_bytes()).unwrap();
        assert_eq!(text, "Jane Doe\nEngineer");
    }

    #[test]
    fn test_pdf_is_detected_by_magic_name_or_type() {
        assert!(is_pdf(None, None, b"%PDF-1.7 ..."));
        assert!(is_pdf(Some("CV.PDF"), None, b"whatever"));
        assert!(is_pdf(None, Some("application/pdf"), b"whatever"));
        assert!(!is_pdf(Some("cv.txt"), Some("text/plain"), b"Jane"));
    }

    #[test]
    fn test_empty_and_binary_uploads_are_rejected() {
        assert!(matches!(extract_upload_text(None, None, b""), Err(AppError::Validation(_))));
        assert!(matches!(
            extract_upload_text(None, None, &[0xFF, 0xFE, 0x00]),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(extract_upload_text(None, None, b"  \n "), Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_blocking_extraction_matches_inline() {
        let text = extract_upload_text_blocking(
            Some("resume.txt".to_string()),
            Some("text/plain".to_string()),
            Bytes::from_static(b"Jane Doe\nEngineer"),
        )
        .await
        .unwrap();
        assert_eq!(text, "Jane Doe\nEngineer");

        let err = extract_upload_text_blocking(Some("cv.pdf".to_string()), None, Bytes::from_static(b"%PDF-1.4 x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_corrupt_pdf_is_a_validation_error() {
        let err = extract_upload_text(Some("cv.pdf"), None, b"%PDF-1.4 truncated").unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
