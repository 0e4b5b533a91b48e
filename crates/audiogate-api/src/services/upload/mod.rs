//! Audio upload pipeline: bound, extract, key, store, then persist.

mod service;
mod types;

pub use service::AudioUploadService;
pub use types::{
    FilePart, UploadError, UploadOutcome, DEFAULT_CONTENT_TYPE, FILE_FIELD, MAX_CONTENT_TYPE_LENGTH,
};
