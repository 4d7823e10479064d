use crate::domain::{LobbyDirectory, TermSource};
use crate::interface_adapters::clients::LobbyClient;
use crate::use_cases::{GameRegistry, StartGameUseCase};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    // Running games keyed by id.
    pub registry: Arc<GameRegistry>,
    // Deck source for new games.
    pub terms: Arc<dyn TermSource>,
    // Player lookup for lobby-backed games.
    pub lobby_directory: Arc<dyn LobbyDirectory>,
    // Raw lobby backend access for the proxy routes.
    pub lobby: LobbyClient,
}

impl AppState {
    pub fn start_game(&self) -> StartGameUseCase {
        StartGameUseCase {
            terms: self.terms.clone(),
            lobby: self.lobby_directory.clone(),
            registry: self.registry.clone(),
        }
    }
}
