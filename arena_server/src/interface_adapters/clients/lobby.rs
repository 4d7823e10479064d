use crate::domain::ports::PortError;
use crate::domain::{LobbyCode, LobbyDirectory, LobbyMember};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

// DTOs of the external lobby backend (camelCase on the wire).

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLobbyRequest {
    pub admin_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair_count: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_theme: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinLobbyRequest {
    pub lobby_code: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum LobbyStatus {
    Waiting,
    InProgress,
    Completed,
}

impl TryFrom<u8> for LobbyStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Waiting),
            1 => Ok(Self::InProgress),
            2 => Ok(Self::Completed),
            other => Err(format!("unknown lobby status {other}")),
        }
    }
}

impl From<LobbyStatus> for u8 {
    fn from(status: LobbyStatus) -> Self {
        match status {
            LobbyStatus::Waiting => 0,
            LobbyStatus::InProgress => 1,
            LobbyStatus::Completed => 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<String>,
}

impl From<&PlayerResponse> for LobbyMember {
    fn from(player: &PlayerResponse) -> Self {
        Self {
            id: player.id,
            username: player.username.clone(),
            score: player.score,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LobbyResponse {
    pub id: u64,
    pub code: String,
    pub status: LobbyStatus,
    pub created_at: String,
    #[serde(default)]
    pub players: Vec<PlayerResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pair_count: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color_theme: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveLobbyResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub message: String,
    pub time: String,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamErrorBody {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Debug)]
pub enum LobbyClientError {
    Transport(reqwest::Error),
    Upstream { status: StatusCode, message: String },
    Decode(reqwest::Error),
}

impl fmt::Display for LobbyClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LobbyClientError::Transport(err) => write!(f, "lobby transport error: {err}"),
            LobbyClientError::Upstream { status, message } => {
                write!(f, "lobby upstream error {status}: {message}")
            }
            LobbyClientError::Decode(err) => write!(f, "lobby response decode error: {err}"),
        }
    }
}

impl std::error::Error for LobbyClientError {}

// Thin reqwest client for the lobby backend. No retries.
#[derive(Clone)]
pub struct LobbyClient {
    http: Client,
    pub base_url: String,
}

impl LobbyClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub async fn create_lobby(
        &self,
        request: &CreateLobbyRequest,
    ) -> Result<LobbyResponse, LobbyClientError> {
        let url = format!("{}/api/lobby/create", self.base_url);
        self.send(self.http.post(url).json(request)).await
    }

    pub async fn join_lobby(
        &self,
        request: &JoinLobbyRequest,
    ) -> Result<LobbyResponse, LobbyClientError> {
        let url = format!("{}/api/lobby/join", self.base_url);
        self.send(self.http.post(url).json(request)).await
    }

    pub async fn lobby_by_code(&self, code: &LobbyCode) -> Result<LobbyResponse, LobbyClientError> {
        let url = format!("{}/api/lobby/{}", self.base_url, code);
        self.send(self.http.get(url)).await
    }

    pub async fn players(&self, lobby_id: u64) -> Result<Vec<PlayerResponse>, LobbyClientError> {
        let url = format!("{}/api/lobby/{lobby_id}/players", self.base_url);
        self.send(self.http.get(url)).await
    }

    pub async fn leave_lobby(&self, user_id: u64) -> Result<LeaveLobbyResponse, LobbyClientError> {
        let url = format!("{}/api/lobby/{user_id}/leave", self.base_url);
        self.send(self.http.post(url)).await
    }

    pub async fn health(&self) -> Result<HealthCheckResponse, LobbyClientError> {
        let url = format!("{}/health", self.base_url);
        self.send(self.http.get(url)).await
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, LobbyClientError> {
        let res = request.send().await.map_err(LobbyClientError::Transport)?;
        let status = res.status();

        // Prefer the backend's own error text, then a generic status line.
        if !status.is_success() {
            let body = res.json::<UpstreamErrorBody>().await.unwrap_or_default();
            let message = body
                .error
                .or(body.message)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            return Err(LobbyClientError::Upstream { status, message });
        }

        res.json::<T>().await.map_err(LobbyClientError::Decode)
    }
}

#[async_trait]
impl LobbyDirectory for LobbyClient {
    async fn lobby_members(&self, code: &LobbyCode) -> Result<Vec<LobbyMember>, PortError> {
        let lobby = self.lobby_by_code(code).await?;
        Ok(lobby.players.iter().map(LobbyMember::from).collect())
    }
}
