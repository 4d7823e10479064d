// Use-case level inputs/outputs for a game session.

use crate::domain::{
    Card, ClickOutcome, ColorTheme, DuplicateLevel, GameStatus, Player, RankedPlayer, Round,
    Term, TurnPopup, create_deck,
};
use tokio::sync::oneshot;

#[derive(Debug)]
pub enum GameCommand {
    Flip {
        card_id: String,
        reply: Option<oneshot::Sender<FlipReply>>,
    },
    Restart {
        reply: Option<oneshot::Sender<GameSnapshot>>,
    },
}

#[derive(Debug, Clone)]
pub struct FlipReply {
    pub outcome: ClickOutcome,
    pub snapshot: GameSnapshot,
}

/// Everything needed to deal a fresh deck for the same game.
#[derive(Debug, Clone)]
pub struct DeckRecipe {
    pub terms: Vec<Term>,
    pub pair_count: usize,
    pub duplicate_level: DuplicateLevel,
}

impl DeckRecipe {
    pub fn deal(&self) -> Vec<Card> {
        create_deck(
            &self.terms,
            self.pair_count,
            self.duplicate_level,
            &mut rand::rng(),
        )
    }
}

/// A card as players may see it. `face` is only present once turned up.
#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: String,
    pub is_flipped: bool,
    pub is_matched: bool,
    pub tilt: f32,
    pub face: Option<Term>,
}

impl From<&Card> for CardView {
    fn from(card: &Card) -> Self {
        let face_up = card.is_flipped || card.is_matched;
        Self {
            id: card.id.clone(),
            is_flipped: card.is_flipped,
            is_matched: card.is_matched,
            tilt: card.tilt,
            face: face_up.then(|| card.term.clone()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GameSnapshot {
    pub game_id: String,
    /// Bumped on every accepted change.
    pub revision: u64,
    pub status: GameStatus,
    pub theme: ColorTheme,
    pub duplicate_level: DuplicateLevel,
    pub pair_count: usize,
    pub matches: usize,
    pub progress: u8,
    pub active_index: usize,
    pub active_player_id: Option<String>,
    pub locked: bool,
    pub selected_ids: Vec<String>,
    pub turn_popup: Option<TurnPopup>,
    pub cards: Vec<CardView>,
    pub players: Vec<Player>,
    pub ranking: Vec<RankedPlayer>,
}

impl GameSnapshot {
    pub fn capture(
        game_id: &str,
        revision: u64,
        theme: ColorTheme,
        duplicate_level: DuplicateLevel,
        round: &Round,
    ) -> Self {
        Self {
            game_id: game_id.to_string(),
            revision,
            status: round.status(),
            theme,
            duplicate_level,
            pair_count: round.pair_count(),
            matches: round.matches(),
            progress: round.progress(),
            active_index: round.active_index(),
            active_player_id: round.active_player().map(|player| player.id.clone()),
            locked: round.is_locked(),
            selected_ids: round.selected_ids().to_vec(),
            turn_popup: round.turn_popup().cloned(),
            cards: round.cards().iter().map(CardView::from).collect(),
            players: round.players().to_vec(),
            ranking: round.ranking(),
        }
    }
}
