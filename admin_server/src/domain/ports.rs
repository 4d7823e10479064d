use async_trait::async_trait;

use crate::domain::entities::{HostSession, Term};

// Port for the term catalog. Writes always replace the whole collection.
#[async_trait]
pub trait TermStore: Send + Sync {
    async fn load(&self) -> Result<Vec<Term>, String>;
    async fn persist(&self, terms: &[Term]) -> Result<(), String>;
}

// Port for host session storage used by the PIN gate.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, token: String, session: HostSession) -> Result<(), String>;
    async fn get(&self, token: &str) -> Result<Option<HostSession>, String>;
    async fn remove(&self, token: &str) -> Result<bool, String>;
}

// Port for writing uploaded image bytes.
#[async_trait]
pub trait ImageSink: Send + Sync {
    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<(), String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_millis(&self) -> u64;

    fn now_epoch_seconds(&self) -> u64 {
        self.now_epoch_millis() / 1000
    }
}
