//! Audio upload service
//!
//! Orchestrates one upload: bound check, filename sanitizing, key derivation,
//! the object write and finally the metadata insert. The object write always
//! happens first. If the insert then fails the object is left in place and the
//! failure is reported as [`UploadError::MetadataPersistFailed`] so it can be
//! reconciled out of band.

use std::sync::Arc;

use audiogate_core::models::AudioFile;
use audiogate_db::AudioRepository;
use audiogate_storage::{generate_storage_key, sanitize_filename, Storage};
use chrono::Utc;
use uuid::Uuid;

use super::types::{
    FilePart, UploadError, UploadOutcome, DEFAULT_CONTENT_TYPE, MAX_CONTENT_TYPE_LENGTH,
};

#[derive(Clone)]
pub struct AudioUploadService {
    storage: Arc<dyn Storage>,
    audio: Arc<dyn AudioRepository>,
    max_file_size: usize,
}

impl AudioUploadService {
    pub fn new(
        storage: Arc<dyn Storage>,
        audio: Arc<dyn AudioRepository>,
        max_file_size: usize,
    ) -> Self {
        Self {
            storage,
            audio,
            max_file_size,
        }
    }

    /// Upper bound on the file part, in bytes.
    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Store `file` for `owner_id` and record its metadata.
    pub async fn upload(&self, owner_id: Uuid, file: FilePart) -> Result<UploadOutcome, UploadError> {
        if file.data.len() > self.max_file_size {
            return Err(UploadError::TooLarge {
                limit: self.max_file_size,
            });
        }

        let original_filename = sanitize_filename(&file.filename);
        let content_type = file
            .content_type
            .filter(|ct| !ct.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());
        // Must fit the metadata column, or the insert would fail after the write.
        if content_type.chars().count() > MAX_CONTENT_TYPE_LENGTH {
            return Err(UploadError::ContentTypeTooLong {
                limit: MAX_CONTENT_TYPE_LENGTH,
            });
        }

        let now = Utc::now();
        let timestamp_nanos = now
            .timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1000));
        let storage_key = generate_storage_key(owner_id, timestamp_nanos, &original_filename);
        let size_bytes = file.data.len() as i64;

        tracing::info!(
            user_id = %owner_id,
            storage_key = %storage_key,
            content_type = %content_type,
            size_bytes,
            "Writing upload to storage"
        );

        if let Err(e) = self.storage.put(&storage_key, &content_type, file.data).await {
            tracing::warn!(
                error = %e,
                user_id = %owner_id,
                storage_key = %storage_key,
                "Storage write failed, no metadata recorded"
            );
            return Err(UploadError::StorageWriteFailed(e));
        }

        let record = AudioFile {
            id: Uuid::new_v4(),
            user_id: owner_id,
            s3_key: storage_key.clone(),
            original_filename,
            content_type,
            size_bytes,
            uploaded_at: Utc::now(),
        };

        if let Err(e) = self.audio.insert(&record).await {
            tracing::error!(
                error = %e,
                user_id = %owner_id,
                audio_id = %record.id,
                storage_key = %storage_key,
                reconcile = true,
                "Object stored but metadata insert failed; orphaned object needs reconciliation"
            );
            return Err(UploadError::MetadataPersistFailed {
                storage_key,
                source: e,
            });
        }

        tracing::info!(
            user_id = %owner_id,
            audio_id = %record.id,
            storage_key = %record.s3_key,
            "Audio file uploaded and metadata saved"
        );

        let file_url = self.storage.object_url(&record.s3_key);
        Ok(UploadOutcome { record, file_url })
    }
}
