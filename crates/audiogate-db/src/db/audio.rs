use audiogate_core::models::AudioFile;
use audiogate_core::AppError;
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Metadata store for uploaded audio. Records are written once and never updated.
#[async_trait::async_trait]
pub trait AudioRepository: Send + Sync {
    async fn insert(&self, audio: &AudioFile) -> Result<(), AppError>;

    /// Fetch a record owned by `user_id`. Another owner's record reads as `None`.
    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> Result<Option<AudioFile>, AppError>;
}

#[derive(Clone)]
pub struct PgAudioRepository {
    pool: PgPool,
}

impl PgAudioRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AudioRepository for PgAudioRepository {
    #[tracing::instrument(skip(self, audio), fields(
        db.system = "postgresql",
        db.table = "audio_files",
        db.operation = "insert",
        audio.id = %audio.id,
        audio.key = %audio.s3_key
    ))]
    async fn insert(&self, audio: &AudioFile) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO audio_files (
                id, user_id, s3_key, original_filename, content_type, size_bytes, uploaded_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(audio.id)
        .bind(audio.user_id)
        .bind(&audio.s3_key)
        .bind(&audio.original_filename)
        .bind(&audio.content_type)
        .bind(audio.size_bytes)
        .bind(audio.uploaded_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    #[tracing::instrument(skip(self), fields(
        db.system = "postgresql",
        db.table = "audio_files",
        db.operation = "select"
    ))]
    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> Result<Option<AudioFile>, AppError> {
        let audio = sqlx::query_as::<Postgres, AudioFile>(
            r#"
            SELECT id, user_id, s3_key, original_filename, content_type, size_bytes, uploaded_at
            FROM audio_files
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(audio)
    }
}
