use rand::Rng;
use serde::{Deserialize, Serialize};

use super::term::Term;

pub const MIN_PAIR_COUNT: usize = 4;
pub const MAX_PAIR_COUNT: usize = 18;
pub const DEFAULT_PAIR_TARGET: usize = 6;

// Cards carry a tilt in degrees strictly inside (-MAX_TILT, MAX_TILT).
const MAX_TILT: f32 = 3.0;
const COPY_LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

/// How many face-down copies of each selected term go into the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum DuplicateLevel {
    #[default]
    Two,
    Three,
    Four,
}

impl DuplicateLevel {
    pub fn copies(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
        }
    }
}

impl TryFrom<u8> for DuplicateLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            4 => Ok(Self::Four),
            other => Err(format!("duplicate level must be 2, 3 or 4 (got {other})")),
        }
    }
}

impl From<DuplicateLevel> for u8 {
    fn from(level: DuplicateLevel) -> Self {
        level.copies() as u8
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub id: String,
    /// Id of the term this card shows; equal match ids form a group.
    pub match_id: String,
    pub term: Term,
    pub is_flipped: bool,
    pub is_matched: bool,
    pub tilt: f32,
}

/// Uniform in-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Builds a shuffled deck of `pair_count` random terms, `level` copies each.
///
/// A pool smaller than `pair_count` yields a smaller deck; callers gate on
/// pool size before building.
pub fn create_deck<R: Rng + ?Sized>(
    pool: &[Term],
    pair_count: usize,
    level: DuplicateLevel,
    rng: &mut R,
) -> Vec<Card> {
    let mut picked: Vec<&Term> = pool.iter().collect();
    shuffle(&mut picked, rng);
    picked.truncate(pair_count);

    let mut deck = Vec::with_capacity(picked.len() * level.copies());
    for term in picked {
        for letter in COPY_LETTERS.iter().take(level.copies()) {
            let suffix = rng.random::<u32>() & 0x00ff_ffff;
            deck.push(Card {
                id: format!("{}-{letter}-{suffix:06x}", term.id),
                match_id: term.id.clone(),
                term: term.clone(),
                is_flipped: false,
                is_matched: false,
                tilt: random_tilt(rng),
            });
        }
    }

    shuffle(&mut deck, rng);
    deck
}

fn random_tilt<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    // random() is in [0, 1); the 0.999 factor keeps both ends strictly inside.
    let unit: f32 = rng.random();
    (unit - 0.5) * 2.0 * MAX_TILT * 0.999
}
