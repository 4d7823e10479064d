use super::registry::{GameError, GameHandle, GameRegistry};
use super::types::DeckRecipe;
use crate::domain::lobby_code::to_code;
use crate::domain::player::{local_players, lobby_players};
use crate::domain::setup::{SetupError, resolve_pair_count};
use crate::domain::{ColorTheme, DuplicateLevel, InvalidLobbyCode, LobbyDirectory, TermSource};
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Upper bound on generated offline seats.
pub const MAX_LOCAL_PLAYERS: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct StartGameRequest {
    pub game_id: String,
    pub pair_count: Option<usize>,
    pub duplicate_level: DuplicateLevel,
    pub theme: ColorTheme,
    pub lobby_code: Option<String>,
    pub local_players: Option<usize>,
}

#[derive(Debug)]
pub enum StartGameError {
    InvalidLobbyCode(InvalidLobbyCode),
    TermsUnavailable(String),
    NotEnoughTerms { available: usize },
    Registry(GameError),
}

impl fmt::Display for StartGameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartGameError::InvalidLobbyCode(err) => write!(f, "{err}"),
            StartGameError::TermsUnavailable(message) => {
                write!(f, "terms unavailable: {message}")
            }
            StartGameError::NotEnoughTerms { available } => {
                write!(f, "{}", SetupError::NotEnoughTerms { available: *available })
            }
            StartGameError::Registry(err) => write!(f, "{err}"),
        }
    }
}

pub struct StartGameUseCase {
    pub terms: Arc<dyn TermSource>,
    pub lobby: Arc<dyn LobbyDirectory>,
    pub registry: Arc<GameRegistry>,
}

impl StartGameUseCase {
    pub async fn execute(&self, request: StartGameRequest) -> Result<GameHandle, StartGameError> {
        let lobby_code = request
            .lobby_code
            .as_deref()
            .map(to_code)
            .transpose()
            .map_err(StartGameError::InvalidLobbyCode)?;

        let terms = self
            .terms
            .fetch_terms()
            .await
            .map_err(|err| StartGameError::TermsUnavailable(err.to_string()))?;

        let pair_count = resolve_pair_count(terms.len(), request.pair_count).map_err(|err| match err {
            SetupError::NotEnoughTerms { available } => StartGameError::NotEnoughTerms { available },
        })?;

        let players = match &lobby_code {
            Some(code) => match self.lobby.lobby_members(code).await {
                Ok(members) => lobby_players(&members, request.theme),
                Err(err) => {
                    warn!(lobby_code = %code, error = %err, "lobby players unavailable; starting without players");
                    Vec::new()
                }
            },
            None => local_players(
                request.local_players.unwrap_or(0).min(MAX_LOCAL_PLAYERS),
                request.theme,
            ),
        };

        let recipe = DeckRecipe {
            terms,
            pair_count,
            duplicate_level: request.duplicate_level,
        };
        let handle = self
            .registry
            .create_game(request.game_id, recipe, players, request.theme)
            .await
            .map_err(StartGameError::Registry)?;
        self.registry
            .clone()
            .spawn_cleanup_watcher(handle.game_id.clone(), handle.subscribe());

        info!(
            game_id = %handle.game_id,
            pair_count,
            lobby_code = lobby_code.as_ref().map(|code| code.as_str()),
            "game created"
        );
        Ok(handle)
    }
}
