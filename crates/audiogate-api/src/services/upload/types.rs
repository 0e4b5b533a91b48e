//! Types used by the audio upload service

use audiogate_core::models::AudioFile;
use audiogate_core::AppError;
use audiogate_storage::StorageError;
use bytes::Bytes;

/// Multipart field that carries the uploaded file.
pub const FILE_FIELD: &str = "audiofile";

/// Content type recorded when the client does not declare one.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Longest content type the metadata row can hold.
pub const MAX_CONTENT_TYPE_LENGTH: usize = 255;

/// The file part as read from the request, before any validation.
#[derive(Debug, Clone)]
pub struct FilePart {
    /// Client-supplied filename, unsanitized.
    pub filename: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// Result of a successful upload.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub record: AudioFile,
    pub file_url: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("upload exceeds the {limit} byte limit")]
    TooLarge { limit: usize },

    #[error("multipart file field is missing")]
    MissingFile,

    #[error("malformed multipart body: {0}")]
    Malformed(String),

    #[error("content type is longer than {limit} characters")]
    ContentTypeTooLong { limit: usize },

    #[error("storage write failed: {0}")]
    StorageWriteFailed(#[source] StorageError),

    /// The object exists under `storage_key` but no metadata row does.
    #[error("metadata insert failed for stored object {storage_key}")]
    MetadataPersistFailed {
        storage_key: String,
        #[source]
        source: AppError,
    },
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { limit } => AppError::PayloadTooLarge(format!(
                "File size limit exceeded. Max size: {} MB",
                limit / (1024 * 1024)
            )),
            UploadError::MissingFile => AppError::BadRequest(format!(
                "Invalid file upload request: missing '{}' file field",
                FILE_FIELD
            )),
            UploadError::Malformed(msg) => {
                AppError::BadRequest(format!("Invalid file upload request: {}", msg))
            }
            UploadError::ContentTypeTooLong { limit } => AppError::BadRequest(format!(
                "Invalid file upload request: content type exceeds {} characters",
                limit
            )),
            UploadError::StorageWriteFailed(e) => AppError::Storage(e.to_string()),
            UploadError::MetadataPersistFailed {
                storage_key,
                source,
            } => AppError::MetadataPersistFailed {
                storage_key,
                source: anyhow::Error::new(source),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use audiogate_core::ErrorMetadata;

    #[test]
    fn too_large_message_names_the_limit() {
        let app: AppError = UploadError::TooLarge {
            limit: 10 * 1024 * 1024,
        }
        .into();
        assert_eq!(app.http_status_code(), 400);
        assert_eq!(
            app.client_message(),
            "File size limit exceeded. Max size: 10 MB"
        );
    }

    #[test]
    fn storage_and_metadata_failures_are_distinct() {
        let storage: AppError =
            UploadError::StorageWriteFailed(StorageError::UploadFailed("503".to_string())).into();
        let metadata: AppError = UploadError::MetadataPersistFailed {
            storage_key: "k".to_string(),
            source: AppError::Internal("insert failed".to_string()),
        }
        .into();

        assert_eq!(storage.error_code(), "STORAGE_ERROR");
        assert_eq!(metadata.error_code(), "METADATA_PERSIST_FAILED");
        assert_ne!(storage.client_message(), metadata.client_message());
    }
}
