//! Multipart extraction for the upload route

use crate::services::upload::{FilePart, UploadError, FILE_FIELD};
use axum::extract::multipart::MultipartError;
use axum::extract::Multipart;
use axum::http::{header::CONTENT_LENGTH, HeaderMap, StatusCode};
use bytes::BytesMut;

/// Room for multipart boundaries and part headers on top of the file bound.
pub const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Reject a request up front when its declared length cannot fit the bound.
pub fn check_content_length(headers: &HeaderMap, max_file_size: usize) -> Result<(), UploadError> {
    let declared = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    match declared {
        Some(len) if len > (max_file_size + MULTIPART_OVERHEAD_BYTES) as u64 => {
            Err(UploadError::TooLarge {
                limit: max_file_size,
            })
        }
        _ => Ok(()),
    }
}

fn map_multipart_error(err: MultipartError, max_file_size: usize) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::TooLarge {
            limit: max_file_size,
        }
    } else {
        UploadError::Malformed(err.body_text())
    }
}

/// Read the `audiofile` part into memory, chunk by chunk.
///
/// Stops as soon as the part grows past `max_file_size`. Other fields are
/// skipped; a second file field is ignored.
pub async fn extract_file_part(
    mut multipart: Multipart,
    max_file_size: usize,
) -> Result<FilePart, UploadError> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| map_multipart_error(e, max_file_size))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(str::to_string).unwrap_or_default();
        let content_type = field.content_type().map(str::to_string);

        let mut buffer = BytesMut::new();
        while let Some(chunk) = field
            .chunk()
            .await
            .map_err(|e| map_multipart_error(e, max_file_size))?
        {
            if buffer.len() + chunk.len() > max_file_size {
                tracing::debug!(
                    limit_bytes = max_file_size,
                    "Upload rejected: file part exceeds size limit"
                );
                return Err(UploadError::TooLarge {
                    limit: max_file_size,
                });
            }
            buffer.extend_from_slice(&chunk);
        }

        return Ok(FilePart {
            filename,
            content_type,
            data: buffer.freeze(),
        });
    }

    Err(UploadError::MissingFile)
}
