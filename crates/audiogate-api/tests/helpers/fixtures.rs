use async_trait::async_trait;
use audiogate_core::models::{AudioFile, NewUser, User};
use audiogate_core::AppError;
use audiogate_db::{AudioRepository, UserDirectory};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

/// User directory fake with the same duplicate-email behavior as Postgres.
#[derive(Default)]
pub struct InMemoryUserDirectory {
    users: Mutex<Vec<User>>,
    insert_calls: AtomicUsize,
}

impl InMemoryUserDirectory {
    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn remove(&self, id: Uuid) {
        self.users.lock().unwrap().retain(|u| u.id != id);
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, AppError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict(
                "User with this email already exists".to_string(),
            ));
        }
        let user = user.into_user();
        users.push(user.clone());
        Ok(user)
    }
}

/// Audio metadata fake; `fail_inserts` simulates a lost database.
#[derive(Default)]
pub struct InMemoryAudioRepository {
    rows: Mutex<Vec<AudioFile>>,
    insert_calls: AtomicUsize,
    fail_inserts: AtomicBool,
}

impl InMemoryAudioRepository {
    pub fn fail_inserts(&self, fail: bool) {
        self.fail_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn insert_calls(&self) -> usize {
        self.insert_calls.load(Ordering::SeqCst)
    }

    pub fn rows(&self) -> Vec<AudioFile> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioRepository for InMemoryAudioRepository {
    async fn insert(&self, audio: &AudioFile) -> Result<(), AppError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_inserts.load(Ordering::SeqCst) {
            return Err(AppError::Internal("database unavailable".to_string()));
        }
        self.rows.lock().unwrap().push(audio.clone());
        Ok(())
    }

    async fn find_for_user(&self, user_id: Uuid, id: Uuid) -> Result<Option<AudioFile>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id && a.user_id == user_id)
            .cloned())
    }
}

/// Deterministic payload of `len` bytes that starts like an MP3 frame.
pub fn audio_bytes(len: usize) -> Vec<u8> {
    let mut data: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
    if len >= 2 {
        data[0] = 0xFF;
        data[1] = 0xFB;
    }
    data
}
