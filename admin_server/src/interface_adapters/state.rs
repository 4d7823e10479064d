use async_trait::async_trait;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::{Clock, HostSession, ImageSink, SessionStore, Term, TermStore};

// Gate and upload settings resolved at startup.
#[derive(Clone, Debug)]
pub struct AdminSettings {
    pub host_pin: Option<String>,
    pub host_session_ttl_seconds: u64,
    // URL prefix the upload directory is served under.
    pub public_image_prefix: String,
}

// Application state shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<Mutex<HashMap<String, HostSession>>>,
    pub terms: JsonFileTermStore,
    pub images: DiskImageSink,
    pub settings: Arc<AdminSettings>,
}

// terms.json adapter. Every write replaces the whole file.
#[derive(Clone, Debug)]
pub struct JsonFileTermStore {
    pub path: PathBuf,
}

impl JsonFileTermStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    // Heal a missing file by creating an empty array.
    async fn ensure_file(&self) -> std::io::Result<()> {
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent).await?;
                }
                tokio::fs::write(&self.path, "[]").await
            }
            Err(err) => Err(err),
        }
    }
}

#[async_trait]
impl TermStore for JsonFileTermStore {
    async fn load(&self) -> Result<Vec<Term>, String> {
        self.ensure_file().await.map_err(|e| e.to_string())?;
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| e.to_string())?;

        match serde_json::from_str::<Vec<Term>>(&raw) {
            Ok(terms) => Ok(terms),
            Err(error) => {
                warn!(path = %self.path.display(), %error, "failed to parse terms file");
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, terms: &[Term]) -> Result<(), String> {
        let json = serde_json::to_string_pretty(terms).map_err(|e| e.to_string())?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| e.to_string())
    }
}

// In-memory host session store adapter.
#[derive(Clone)]
pub struct InMemorySessionStore {
    pub sessions: Arc<Mutex<HashMap<String, HostSession>>>,
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, token: String, session: HostSession) -> Result<(), String> {
        let mut sessions = self.sessions.lock().await;
        sessions.insert(token, session);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<HostSession>, String> {
        let sessions = self.sessions.lock().await;
        Ok(sessions.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        let mut sessions = self.sessions.lock().await;
        Ok(sessions.remove(token).is_some())
    }
}

// Writes uploaded images into the public directory.
#[derive(Clone, Debug)]
pub struct DiskImageSink {
    pub dir: PathBuf,
}

#[async_trait]
impl ImageSink for DiskImageSink {
    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<(), String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| e.to_string())?;
        tokio::fs::write(self.dir.join(file_name), bytes)
            .await
            .map_err(|e| e.to_string())
    }
}

// System clock adapter used by admin use cases.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_epoch_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}
