//! Audiogate Core Library
//!
//! Domain models, the error taxonomy and configuration shared by the storage,
//! database and HTTP crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, DatabaseConfig, LogFormat, ServiceConfig, StorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
