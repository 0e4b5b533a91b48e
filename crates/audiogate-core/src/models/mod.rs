//! Data models for the application
//!
//! Identity records owned by the user directory and upload records owned by
//! the upload pipeline, plus the JSON views handed to clients.

mod audio;
mod user;

pub use audio::*;
pub use user::*;
