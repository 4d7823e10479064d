// Registry for spawning and managing running games.

use super::game::{GameSession, game_task};
use super::types::{DeckRecipe, FlipReply, GameCommand, GameSnapshot};
use crate::domain::tuning::RoundTuning;
use crate::domain::{ColorTheme, GameStatus, Player};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, RwLock, mpsc, oneshot, watch};
use tracing::info;

/// Shared configuration for spawning games.
#[derive(Debug, Clone)]
pub struct GameSettings {
    /// Capacity for inbound commands per game.
    pub command_channel_capacity: usize,
    /// Timing rules applied to every round.
    pub tuning: RoundTuning,
    /// How long a finished game stays around for late viewers.
    pub completed_game_grace: Duration,
    /// Games with no change for this long are dropped.
    pub idle_game_timeout: Duration,
}

/// Errors returned by registry and handle operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    /// Game already exists and cannot be re-created.
    AlreadyExists,
    /// The game task has stopped.
    Closed,
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::AlreadyExists => write!(f, "game already exists"),
            GameError::Closed => write!(f, "game is no longer running"),
        }
    }
}

/// Channels into and out of one game task.
#[derive(Clone)]
pub struct GameHandle {
    /// Identifier clients use to target this game.
    pub game_id: Arc<str>,
    /// Sender for commands into the game task.
    pub command_tx: mpsc::Sender<GameCommand>,
    /// Latest published snapshot.
    snapshot_rx: watch::Receiver<GameSnapshot>,
    shutdown: Arc<Notify>,
}

impl GameHandle {
    pub fn snapshot(&self) -> GameSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.snapshot_rx.clone()
    }

    pub async fn flip(&self, card_id: String) -> Result<FlipReply, GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(GameCommand::Flip {
                card_id,
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| GameError::Closed)?;
        reply_rx.await.map_err(|_| GameError::Closed)
    }

    pub async fn restart(&self) -> Result<GameSnapshot, GameError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(GameCommand::Restart {
                reply: Some(reply_tx),
            })
            .await
            .map_err(|_| GameError::Closed)?;
        reply_rx.await.map_err(|_| GameError::Closed)
    }
}

impl fmt::Debug for GameHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameHandle")
            .field("game_id", &self.game_id)
            .finish_non_exhaustive()
    }
}

/// Thread-safe registry for active games.
#[derive(Debug)]
pub struct GameRegistry {
    settings: GameSettings,
    games: RwLock<HashMap<String, GameHandle>>,
}

impl GameRegistry {
    pub fn new(settings: GameSettings) -> Self {
        Self {
            settings,
            games: RwLock::new(HashMap::new()),
        }
    }

    /// Deals the first round and spawns the game task.
    pub async fn create_game(
        &self,
        game_id: String,
        recipe: DeckRecipe,
        players: Vec<Player>,
        theme: ColorTheme,
    ) -> Result<GameHandle, GameError> {
        let mut games = self.games.write().await;
        if games.contains_key(&game_id) {
            return Err(GameError::AlreadyExists);
        }

        let game_id: Arc<str> = Arc::from(game_id);
        let session = GameSession::new(
            game_id.clone(),
            recipe,
            players,
            theme,
            self.settings.tuning,
            tokio::time::Instant::now().into_std(),
        );

        let (command_tx, command_rx) = mpsc::channel(self.settings.command_channel_capacity);
        let (snapshot_tx, snapshot_rx) = watch::channel(session.snapshot());
        let shutdown = Arc::new(Notify::new());

        tokio::spawn(game_task(session, command_rx, snapshot_tx, shutdown.clone()));

        let handle = GameHandle {
            game_id: game_id.clone(),
            command_tx,
            snapshot_rx,
            shutdown,
        };
        games.insert(game_id.to_string(), handle.clone());
        Ok(handle)
    }

    pub async fn get_game(&self, game_id: &str) -> Option<GameHandle> {
        let games = self.games.read().await;
        games.get(game_id).cloned()
    }

    /// Stops the game task. Returns false when no such game exists.
    pub async fn remove_game(&self, game_id: &str) -> bool {
        let removed = self.games.write().await.remove(game_id);
        match removed {
            Some(handle) => {
                handle.shutdown.notify_one();
                true
            }
            None => false,
        }
    }

    pub async fn game_count(&self) -> usize {
        self.games.read().await.len()
    }

    /// Removes the game once it has been complete, or untouched, for too long.
    ///
    /// Ends quietly if the game task stops first.
    pub fn spawn_cleanup_watcher(
        self: Arc<Self>,
        game_id: Arc<str>,
        mut updates: watch::Receiver<GameSnapshot>,
    ) {
        tokio::spawn(async move {
            loop {
                let complete = updates.borrow_and_update().status == GameStatus::Complete;
                let wait = if complete {
                    self.settings.completed_game_grace
                } else {
                    self.settings.idle_game_timeout
                };
                match tokio::time::timeout(wait, updates.changed()).await {
                    Ok(Ok(())) => continue,
                    Ok(Err(_)) => return,
                    Err(_) => {
                        if self.remove_game(&game_id).await {
                            info!(game_id = %game_id, complete, "game reaped");
                        }
                        return;
                    }
                }
            }
        });
    }
}
