use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{Clock, HostSession, ImageSink, SessionStore, Term, TermStore};

pub(crate) type SessionTable = Arc<Mutex<HashMap<String, HostSession>>>;

// Shared fixed time source (epoch millis) for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_millis(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub insert: bool,
    pub get: bool,
    pub remove: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingSessionStore {
    sessions: SessionTable,
    failures: FailureFlags,
}

impl RecordingSessionStore {
    pub(crate) fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_session(&self, token: impl Into<String>, session: HostSession) {
        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.insert(token.into(), session);
    }

    pub(crate) fn get_test_session(&self, token: &str) -> Option<HostSession> {
        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.get(token).cloned()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.sessions.lock().expect("sessions mutex poisoned").is_empty()
    }
}

#[async_trait]
impl SessionStore for RecordingSessionStore {
    async fn insert(&self, token: String, session: HostSession) -> Result<(), String> {
        if self.failures.insert {
            return Err("insert failed".to_string());
        }

        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        guard.insert(token, session);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<HostSession>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }

        let guard = self.sessions.lock().expect("sessions mutex poisoned");
        Ok(guard.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        if self.failures.remove {
            return Err("remove failed".to_string());
        }

        let mut guard = self.sessions.lock().expect("sessions mutex poisoned");
        Ok(guard.remove(token).is_some())
    }
}

// In-memory term catalog that counts whole-collection writes.
#[derive(Clone)]
pub(crate) struct MemoryTermStore {
    terms: Arc<Mutex<Vec<Term>>>,
    persists: Arc<Mutex<usize>>,
    fail_persist: bool,
}

impl MemoryTermStore {
    pub(crate) fn new() -> Self {
        Self {
            terms: Arc::new(Mutex::new(Vec::new())),
            persists: Arc::new(Mutex::new(0)),
            fail_persist: false,
        }
    }

    pub(crate) fn failing_persist(mut self) -> Self {
        self.fail_persist = true;
        self
    }

    pub(crate) fn seed(&self, terms: Vec<Term>) {
        *self.terms.lock().expect("terms mutex poisoned") = terms;
    }

    pub(crate) fn snapshot(&self) -> Vec<Term> {
        self.terms.lock().expect("terms mutex poisoned").clone()
    }

    pub(crate) fn persist_count(&self) -> usize {
        *self.persists.lock().expect("persist counter poisoned")
    }
}

#[async_trait]
impl TermStore for MemoryTermStore {
    async fn load(&self) -> Result<Vec<Term>, String> {
        Ok(self.snapshot())
    }

    async fn persist(&self, terms: &[Term]) -> Result<(), String> {
        if self.fail_persist {
            return Err("persist failed".to_string());
        }

        *self.terms.lock().expect("terms mutex poisoned") = terms.to_vec();
        *self.persists.lock().expect("persist counter poisoned") += 1;
        Ok(())
    }
}

// Records file names and sizes instead of touching disk.
#[derive(Clone)]
pub(crate) struct RecordingImageSink {
    written: Arc<Mutex<Vec<(String, usize)>>>,
}

impl RecordingImageSink {
    pub(crate) fn new() -> Self {
        Self {
            written: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn written(&self) -> Vec<(String, usize)> {
        self.written.lock().expect("sink mutex poisoned").clone()
    }
}

#[async_trait]
impl ImageSink for RecordingImageSink {
    async fn write(&self, file_name: &str, bytes: &[u8]) -> Result<(), String> {
        let mut guard = self.written.lock().expect("sink mutex poisoned");
        guard.push((file_name.to_string(), bytes.len()));
        Ok(())
    }
}
