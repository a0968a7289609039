use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

use crate::screening::document::ResumeFile;

/// `resumes/{yyyy}/{mm}/{uuid}-{file_name}`
pub fn resume_key(file_name: &str, at: DateTime<Utc>, id: Uuid) -> String {
    format!(
        "resumes/{}/{}-{}",
        at.format("%Y/%m"),
        id,
        sanitize_file_name(file_name)
    )
}

/// Keeps the last path segment and replaces anything outside `[A-Za-z0-9._-]`.
fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

/// Stores the original upload and returns its object key.
pub async fn upload_resume(s3: &S3Client, bucket: &str, file: &ResumeFile) -> Result<String> {
    let key = resume_key(&file.file_name, Utc::now(), Uuid::new_v4());
    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(file.bytes.clone()))
        .content_type(
            file.content_type
                .as_deref()
                .unwrap_or("application/octet-stream"),
        )
        .send()
        .await
        .map_err(|e| anyhow::anyhow!("S3 upload failed: {e}"))?;

    info!("Uploaded resume to s3://{bucket}/{key}");
    Ok(key)
}
