use std::fmt;

use super::deck::{DEFAULT_PAIR_TARGET, MAX_PAIR_COUNT, MIN_PAIR_COUNT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupError {
    NotEnoughTerms { available: usize },
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetupError::NotEnoughTerms { available } => write!(
                f,
                "at least {MIN_PAIR_COUNT} terms are needed to start a game (have {available})"
            ),
        }
    }
}

pub fn max_pairs(pool_len: usize) -> usize {
    pool_len.min(MAX_PAIR_COUNT)
}

pub fn has_enough_terms(pool_len: usize) -> bool {
    max_pairs(pool_len) >= MIN_PAIR_COUNT
}

/// Picks the pair count for a pool, clamping any requested value into range.
pub fn resolve_pair_count(pool_len: usize, requested: Option<usize>) -> Result<usize, SetupError> {
    if !has_enough_terms(pool_len) {
        return Err(SetupError::NotEnoughTerms {
            available: pool_len,
        });
    }

    let upper = max_pairs(pool_len);
    Ok(match requested {
        Some(count) => count.clamp(MIN_PAIR_COUNT, upper),
        None => upper.min(DEFAULT_PAIR_TARGET),
    })
}
