use super::types::{DeckRecipe, FlipReply, GameCommand, GameSnapshot};
use crate::domain::tuning::RoundTuning;
use crate::domain::{ClickOutcome, ColorTheme, Player, Round};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Notify, mpsc, watch};
use tracing::{debug, info};

/// A single game: its round plus what is needed to deal it again.
#[derive(Debug)]
pub struct GameSession {
    game_id: Arc<str>,
    theme: ColorTheme,
    recipe: DeckRecipe,
    round: Round,
    revision: u64,
}

impl GameSession {
    pub fn new(
        game_id: Arc<str>,
        recipe: DeckRecipe,
        players: Vec<Player>,
        theme: ColorTheme,
        tuning: RoundTuning,
        now: Instant,
    ) -> Self {
        let mut round = Round::new(tuning);
        round.start(recipe.deal(), players, now);
        Self {
            game_id,
            theme,
            recipe,
            round,
            revision: 0,
        }
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn round(&self) -> &Round {
        &self.round
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(
            &self.game_id,
            self.revision,
            self.theme,
            self.recipe.duplicate_level,
            &self.round,
        )
    }

    pub fn flip(&mut self, card_id: &str, now: Instant) -> ClickOutcome {
        let outcome = self.round.click(card_id, now);
        if outcome.changes_state() {
            self.revision += 1;
        }
        outcome
    }

    pub fn restart(&mut self, now: Instant) {
        self.round.restart(self.recipe.deal(), now);
        self.revision += 1;
    }

    pub fn advance(&mut self, now: Instant) -> bool {
        let changed = self.round.advance(now);
        if changed {
            self.revision += 1;
        }
        changed
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.round.next_deadline()
    }
}

fn now() -> Instant {
    tokio::time::Instant::now().into_std()
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await,
        None => std::future::pending().await,
    }
}

/// Owns a session and serializes every change to it.
///
/// Commands arrive on `command_rx`; the latest snapshot is published on
/// `snapshot_tx` after each accepted change or fired timer.
pub async fn game_task(
    mut session: GameSession,
    mut command_rx: mpsc::Receiver<GameCommand>,
    snapshot_tx: watch::Sender<GameSnapshot>,
    shutdown: Arc<Notify>,
) {
    info!(game_id = %session.game_id(), "game started");

    loop {
        let deadline = session.next_deadline();

        tokio::select! {
            _ = shutdown.notified() => {
                break;
            }
            command = command_rx.recv() => {
                let Some(command) = command else {
                    break;
                };
                match command {
                    GameCommand::Flip { card_id, reply } => {
                        let outcome = session.flip(&card_id, now());
                        debug!(game_id = %session.game_id(), card_id = %card_id, ?outcome, "flip");
                        let snapshot = session.snapshot();
                        if outcome.changes_state() {
                            snapshot_tx.send_replace(snapshot.clone());
                        }
                        if let Some(reply) = reply {
                            let _ = reply.send(FlipReply { outcome, snapshot });
                        }
                    }
                    GameCommand::Restart { reply } => {
                        session.restart(now());
                        info!(game_id = %session.game_id(), "game restarted");
                        let snapshot = session.snapshot();
                        snapshot_tx.send_replace(snapshot.clone());
                        if let Some(reply) = reply {
                            let _ = reply.send(snapshot);
                        }
                    }
                }
            }
            _ = sleep_until(deadline) => {
                if session.advance(now()) {
                    snapshot_tx.send_replace(session.snapshot());
                }
            }
        }
    }

    info!(game_id = %session.game_id(), "game stopped");
}
