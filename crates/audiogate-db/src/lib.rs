//! Audiogate Database Library
//!
//! Repository traits for identities and upload records with their PostgreSQL
//! adapters. Handlers depend on the traits so tests can swap in fakes.

pub mod db;

pub use db::*;

use sqlx::migrate::Migrator;

/// Embedded schema migrations, applied at startup.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");
