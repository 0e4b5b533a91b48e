//! Audiogate Storage Library
//!
//! Object storage abstraction for uploaded audio. It includes the [`Storage`]
//! trait, an S3 backend built on `object_store`, and a local filesystem backend.
//!
//! # Storage key format
//!
//! Keys are owner-scoped: `{owner_id}/{unix_nanos}/{base}{ext}`. The filename
//! part is sanitized so a key never escapes its owner's prefix. Key generation
//! is centralized in the [`keys`] module so all backends stay consistent.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use audiogate_core::StorageBackend;
pub use factory::create_storage;
pub use keys::{generate_storage_key, sanitize_filename, FALLBACK_FILENAME};
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::{S3Options, S3Storage};
pub use traits::{Storage, StorageError, StorageResult};
