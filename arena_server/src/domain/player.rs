use serde::Serialize;

use super::ports::LobbyMember;
use super::theme::ColorTheme;

const ALIAS_ADJECTIVES: [&str; 10] = [
    "Galaktik",
    "Parildayan",
    "Cesur",
    "Neon",
    "Isiltili",
    "Mistik",
    "Turbo",
    "Sirli",
    "Ucan",
    "Ritmik",
];

const ALIAS_NOUNS: [&str; 10] = [
    "Meteor",
    "Gezgin",
    "Samur",
    "Panter",
    "Komutan",
    "Yildirim",
    "Sihirbaz",
    "Kartal",
    "Ruzgar",
    "Astronot",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub score: u32,
    pub color: String,
}

impl Player {
    pub fn from_member(member: &LobbyMember, color: &str) -> Self {
        Self {
            id: format!("player-{}", member.id),
            name: member.username.clone(),
            score: member.score.unwrap_or(0),
            color: color.to_string(),
        }
    }
}

/// A player's position on the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedPlayer {
    pub rank: usize,
    pub original_index: usize,
    pub player: Player,
}

/// Orders by score descending; ties keep their seating order.
pub fn ranking(players: &[Player]) -> Vec<RankedPlayer> {
    let mut indexed: Vec<(usize, &Player)> = players.iter().enumerate().collect();
    indexed.sort_by(|(ia, a), (ib, b)| b.score.cmp(&a.score).then(ia.cmp(ib)));
    indexed
        .into_iter()
        .enumerate()
        .map(|(position, (original_index, player))| RankedPlayer {
            rank: position + 1,
            original_index,
            player: player.clone(),
        })
        .collect()
}

pub fn alias(seed: u32) -> String {
    let value = seed as usize;
    let adjective = ALIAS_ADJECTIVES[value % ALIAS_ADJECTIVES.len()];
    let noun = ALIAS_NOUNS[(value / ALIAS_ADJECTIVES.len() + value) % ALIAS_NOUNS.len()];
    format!("{adjective} {noun}")
}

/// Builds `count` offline players with aliases seeded by seat.
pub fn local_players(count: usize, theme: ColorTheme) -> Vec<Player> {
    (0..count)
        .map(|index| Player {
            id: format!("local-{}", index + 1),
            name: alias(index as u32),
            score: 0,
            color: theme.player_color(index).to_string(),
        })
        .collect()
}

pub fn lobby_players(members: &[LobbyMember], theme: ColorTheme) -> Vec<Player> {
    members
        .iter()
        .enumerate()
        .map(|(index, member)| Player::from_member(member, theme.player_color(index)))
        .collect()
}
