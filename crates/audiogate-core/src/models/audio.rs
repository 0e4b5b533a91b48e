use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Metadata row written once per successful upload. Immutable after insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct AudioFile {
    pub id: Uuid,
    pub user_id: Uuid,
    pub s3_key: String,
    pub original_filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
}

/// Response for a successful `POST /audio/upload`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AudioUploadResponse {
    pub id: Uuid,
    #[schema(example = "3f0c.../1718000000000000000/my_song.mp3")]
    pub s3_key: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Upload record as returned by `GET /audio/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AudioFileResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub s3_key: String,
    pub original_filename: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub uploaded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl AudioFileResponse {
    pub fn new(audio: AudioFile, file_url: Option<String>) -> Self {
        AudioFileResponse {
            id: audio.id,
            user_id: audio.user_id,
            s3_key: audio.s3_key,
            original_filename: audio.original_filename,
            content_type: audio.content_type,
            size_bytes: audio.size_bytes,
            uploaded_at: audio.uploaded_at,
            file_url,
        }
    }
}
