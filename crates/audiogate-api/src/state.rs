//! Application state shared by all handlers.
//!
//! Everything here is read-only after startup. Repositories and the store are
//! trait objects so tests can swap in in-memory fakes.

use crate::auth::TokenService;
use crate::services::upload::AudioUploadService;
use audiogate_core::Config;
use audiogate_db::{AudioRepository, UserDirectory};
use audiogate_storage::Storage;
use std::sync::Arc;

pub struct AppState {
    pub config: Config,
    pub users: Arc<dyn UserDirectory>,
    pub audio: Arc<dyn AudioRepository>,
    pub storage: Arc<dyn Storage>,
    pub tokens: Arc<TokenService>,
    pub uploads: AudioUploadService,
}

impl AppState {
    pub fn new(
        config: Config,
        users: Arc<dyn UserDirectory>,
        audio: Arc<dyn AudioRepository>,
        storage: Arc<dyn Storage>,
    ) -> Self {
        let tokens = Arc::new(TokenService::from_config(&config));
        let uploads =
            AudioUploadService::new(storage.clone(), audio.clone(), config.max_audio_size_bytes());

        Self {
            config,
            users,
            audio,
            storage,
            tokens,
            uploads,
        }
    }
}
