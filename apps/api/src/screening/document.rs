//! Resume documents: the uploaded bytes and the plain text we can pull out of them.

use bytes::Bytes;
use tracing::debug;

use crate::screening::extractor::ExtractionError;

/// One uploaded resume as received from the multipart body.
#[derive(Debug, Clone)]
pub struct ResumeFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
    Unsupported,
}

impl ResumeFile {
    /// Content type wins when it is specific; otherwise fall back to the extension.
    pub fn kind(&self) -> DocumentKind {
        match self.content_type.as_deref() {
            Some("application/pdf") => return DocumentKind::Pdf,
            Some(ct) if ct.starts_with("text/plain") || ct == "text/markdown" => {
                return DocumentKind::PlainText
            }
            _ => {}
        }

        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => DocumentKind::Pdf,
            "txt" | "md" | "text" => DocumentKind::PlainText,
            _ => DocumentKind::Unsupported,
        }
    }
}

/// Pulls plain text out of a resume. PDF parsing is CPU-bound and runs on the
/// blocking pool.
pub async fn extract_text(file: &ResumeFile) -> Result<String, ExtractionError> {
    let text = match file.kind() {
        DocumentKind::Pdf => {
            let bytes = file.bytes.clone();
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
                .await
                .map_err(|e| ExtractionError::Task(e.to_string()))?
                .map_err(|e| ExtractionError::Pdf(e.to_string()))?
        }
        DocumentKind::PlainText => String::from_utf8(file.bytes.to_vec())
            .map_err(|_| ExtractionError::Encoding)?,
        DocumentKind::Unsupported => {
            return Err(ExtractionError::UnsupportedFormat(file.file_name.clone()))
        }
    };

    if text.trim().is_empty() {
        return Err(ExtractionError::EmptyDocument);
    }

    debug!("Extracted {} chars from '{}'", text.len(), file.file_name);
    Ok(text)
}
