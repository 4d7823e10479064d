use crate::domain::ports::PortError;
use crate::domain::{LobbyCode, LobbyDirectory, LobbyMember, Term, TermSource};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) fn sample_terms(count: usize) -> Vec<Term> {
    (1..=count)
        .map(|n| Term {
            id: format!("t{n}"),
            title: format!("Term {n}"),
            description: format!("Description {n}"),
            image: format!("/resimler/kartlar/t{n}.png"),
        })
        .collect()
}

pub(crate) struct FakeTermSource {
    terms: Option<Vec<Term>>,
    fetches: Arc<AtomicUsize>,
}

impl FakeTermSource {
    pub(crate) fn new(terms: Vec<Term>) -> Self {
        Self {
            terms: Some(terms),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            terms: None,
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn fetch_count(&self) -> Arc<AtomicUsize> {
        self.fetches.clone()
    }
}

#[async_trait]
impl TermSource for FakeTermSource {
    async fn fetch_terms(&self) -> Result<Vec<Term>, PortError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.terms
            .clone()
            .ok_or_else(|| "term catalog offline".into())
    }
}

#[derive(Default)]
pub(crate) struct FakeLobbyDirectory {
    members: HashMap<String, Vec<LobbyMember>>,
    fail: bool,
}

impl FakeLobbyDirectory {
    pub(crate) fn failing() -> Self {
        Self {
            members: HashMap::new(),
            fail: true,
        }
    }

    pub(crate) fn with_members(mut self, code: &str, members: Vec<LobbyMember>) -> Self {
        self.members.insert(code.to_string(), members);
        self
    }
}

#[async_trait]
impl LobbyDirectory for FakeLobbyDirectory {
    async fn lobby_members(&self, code: &LobbyCode) -> Result<Vec<LobbyMember>, PortError> {
        if self.fail {
            return Err("lobby backend offline".into());
        }
        self.members
            .get(code.as_str())
            .cloned()
            .ok_or_else(|| format!("lobby {code} not found").into())
    }
}
