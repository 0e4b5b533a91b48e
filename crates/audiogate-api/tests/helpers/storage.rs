use async_trait::async_trait;
use audiogate_core::StorageBackend;
use audiogate_storage::{Storage, StorageError, StorageResult};
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Object store fake that keeps every put in memory.
#[derive(Default)]
pub struct RecordingStorage {
    objects: Mutex<HashMap<String, (String, Bytes)>>,
    put_calls: Mutex<Vec<String>>,
    fail_puts: AtomicBool,
}

impl RecordingStorage {
    pub fn fail_puts(&self, fail: bool) {
        self.fail_puts.store(fail, Ordering::SeqCst);
    }

    /// Keys of every attempted put, including failed ones.
    pub fn put_calls(&self) -> Vec<String> {
        self.put_calls.lock().unwrap().clone()
    }

    pub fn object(&self, key: &str) -> Option<(String, Bytes)> {
        self.objects.lock().unwrap().get(key).cloned()
    }

    pub fn object_count(&self) -> usize {
        self.objects.lock().unwrap().len()
    }
}

#[async_trait]
impl Storage for RecordingStorage {
    async fn put(&self, storage_key: &str, content_type: &str, data: Bytes) -> StorageResult<()> {
        self.put_calls.lock().unwrap().push(storage_key.to_string());
        if self.fail_puts.load(Ordering::SeqCst) {
            return Err(StorageError::BackendError("connection reset".to_string()));
        }
        self.objects
            .lock()
            .unwrap()
            .insert(storage_key.to_string(), (content_type.to_string(), data));
        Ok(())
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        Ok(self.objects.lock().unwrap().contains_key(storage_key))
    }

    fn object_url(&self, storage_key: &str) -> Option<String> {
        Some(format!("http://objects.test/audio/{}", storage_key))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
