//! Audiogate API Library
//!
//! HTTP handlers, the session guard, the upload orchestrator and application
//! setup for the audio upload service.

mod api_doc;
mod handlers;
mod telemetry;
mod utils;

pub mod auth;
pub mod error;
pub mod services;
pub mod setup;
pub mod state;

// Re-exports
pub use api_doc::get_openapi_spec;
pub use error::ErrorResponse;
pub use setup::routes::build_router;
pub use state::AppState;
