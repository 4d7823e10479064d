// Wire protocol DTOs and conversions for the public arena API.
// Lobby backend DTOs live with the lobby client.

use crate::domain::{
    ClickOutcome, ColorTheme, DuplicateLevel, GameStatus, IgnoreReason, Player, RankedPlayer,
    Term, TurnPopup,
};
use crate::use_cases::{CardView, FlipReply, GameSnapshot};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateGameRequest {
    pub pair_count: Option<usize>,
    pub duplicate_level: Option<DuplicateLevel>,
    pub color_theme: Option<ColorTheme>,
    pub lobby_code: Option<String>,
    pub local_players: Option<usize>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameResponse {
    pub game_id: String,
    pub snapshot: GameSnapshotDto,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipRequest {
    pub card_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlipResponse {
    pub accepted: bool,
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignored_reason: Option<&'static str>,
    pub snapshot: GameSnapshotDto,
}

impl From<FlipReply> for FlipResponse {
    fn from(reply: FlipReply) -> Self {
        let (outcome, ignored_reason) = match reply.outcome {
            ClickOutcome::Ignored(reason) => ("ignored", Some(ignore_reason_name(reason))),
            ClickOutcome::Flipped => ("flipped", None),
            ClickOutcome::Matched => ("matched", None),
            ClickOutcome::Mismatched => ("mismatched", None),
            ClickOutcome::Completed => ("completed", None),
            ClickOutcome::MismatchResolved => ("mismatch_resolved", None),
        };
        Self {
            accepted: reply.outcome.is_accepted(),
            outcome,
            ignored_reason,
            snapshot: GameSnapshotDto::from(&reply.snapshot),
        }
    }
}

fn ignore_reason_name(reason: IgnoreReason) -> &'static str {
    match reason {
        IgnoreReason::NotPlaying => "not_playing",
        IgnoreReason::Locked => "locked",
        IgnoreReason::UnknownCard => "unknown_card",
        IgnoreReason::AlreadyFaceUp => "already_face_up",
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutQuery {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub cards: Option<usize>,
}

/// Messages the client sends to the server over the WebSocket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ClientMessage {
    Flip(FlipRequest),
    Restart,
}

/// Messages the server sends to connected clients over the WebSocket.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum ServerMessage {
    // Latest state of the game; sent on connect and after every change.
    Snapshot(GameSnapshotDto),
    // Rejected client message.
    Error { message: String },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDto {
    pub id: String,
    pub is_flipped: bool,
    pub is_matched: bool,
    pub tilt: f32,
    // Term content stays hidden while the card is face down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<Term>,
}

impl From<&CardView> for CardDto {
    fn from(card: &CardView) -> Self {
        Self {
            id: card.id.clone(),
            is_flipped: card.is_flipped,
            is_matched: card.is_matched,
            tilt: card.tilt,
            term: card.face.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerDto {
    pub id: String,
    pub name: String,
    pub score: u32,
    pub color: String,
}

impl From<&Player> for PlayerDto {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id.clone(),
            name: player.name.clone(),
            score: player.score,
            color: player.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPlayerDto {
    pub rank: usize,
    pub original_index: usize,
    pub id: String,
    pub name: String,
    pub score: u32,
    pub color: String,
}

impl From<&RankedPlayer> for RankedPlayerDto {
    fn from(ranked: &RankedPlayer) -> Self {
        Self {
            rank: ranked.rank,
            original_index: ranked.original_index,
            id: ranked.player.id.clone(),
            name: ranked.player.name.clone(),
            score: ranked.player.score,
            color: ranked.player.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnPopupDto {
    pub player_id: String,
    pub name: String,
    pub color: String,
}

impl From<&TurnPopup> for TurnPopupDto {
    fn from(popup: &TurnPopup) -> Self {
        Self {
            player_id: popup.player_id.clone(),
            name: popup.name.clone(),
            color: popup.color.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshotDto {
    pub game_id: String,
    pub revision: u64,
    pub status: GameStatus,
    pub color_theme: ColorTheme,
    pub duplicate_level: DuplicateLevel,
    pub pair_count: usize,
    pub matches: usize,
    pub progress: u8,
    pub active_index: usize,
    pub active_player_id: Option<String>,
    pub locked: bool,
    pub selected_ids: Vec<String>,
    pub turn_popup: Option<TurnPopupDto>,
    pub cards: Vec<CardDto>,
    pub players: Vec<PlayerDto>,
    pub ranking: Vec<RankedPlayerDto>,
}

impl From<&GameSnapshot> for GameSnapshotDto {
    fn from(snapshot: &GameSnapshot) -> Self {
        Self {
            game_id: snapshot.game_id.clone(),
            revision: snapshot.revision,
            status: snapshot.status,
            color_theme: snapshot.theme,
            duplicate_level: snapshot.duplicate_level,
            pair_count: snapshot.pair_count,
            matches: snapshot.matches,
            progress: snapshot.progress,
            active_index: snapshot.active_index,
            active_player_id: snapshot.active_player_id.clone(),
            locked: snapshot.locked,
            selected_ids: snapshot.selected_ids.clone(),
            turn_popup: snapshot.turn_popup.as_ref().map(TurnPopupDto::from),
            cards: snapshot.cards.iter().map(CardDto::from).collect(),
            players: snapshot.players.iter().map(PlayerDto::from).collect(),
            ranking: snapshot.ranking.iter().map(RankedPlayerDto::from).collect(),
        }
    }
}
