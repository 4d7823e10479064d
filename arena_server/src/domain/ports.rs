use async_trait::async_trait;

use super::lobby_code::LobbyCode;
use super::term::Term;

pub type PortError = Box<dyn std::error::Error + Send + Sync>;

/// A player as the lobby backend reports them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LobbyMember {
    pub id: u64,
    pub username: String,
    pub score: Option<u32>,
}

#[async_trait]
pub trait TermSource: Send + Sync {
    async fn fetch_terms(&self) -> Result<Vec<Term>, PortError>;
}

#[async_trait]
pub trait LobbyDirectory: Send + Sync {
    async fn lobby_members(&self, code: &LobbyCode) -> Result<Vec<LobbyMember>, PortError>;
}
