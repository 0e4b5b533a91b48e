//! Database repositories for data access layer
//!
//! `user` backs the user directory used by registration, login and the session
//! guard; `audio` stores one metadata row per successful upload.

pub mod audio;
pub mod user;

pub use audio::{AudioRepository, PgAudioRepository};
pub use user::{PgUserDirectory, UserDirectory};
