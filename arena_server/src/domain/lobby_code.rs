use std::fmt;

use rand::Rng;
use serde::Serialize;

pub const CODE_LEN: usize = 2;

/// Uppercase Latin letters without Q, W and X.
pub const ALPHABET: [char; 23] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'R', 'S', 'T',
    'U', 'V', 'Y', 'Z',
];

/// A validated lobby code: exactly `CODE_LEN` letters from `ALPHABET`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct LobbyCode(String);

impl LobbyCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LobbyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLobbyCode {
    pub input: String,
}

impl fmt::Display for InvalidLobbyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid lobby code {:?}: expected {CODE_LEN} letters A-Z without Q, W, X",
            self.input
        )
    }
}

impl std::error::Error for InvalidLobbyCode {}

/// Accepts any casing and surrounding whitespace.
pub fn is_valid_code(value: &str) -> bool {
    is_normalized_code(&normalize(value))
}

/// Trims and uppercases `input` before validating it.
pub fn to_code(input: &str) -> Result<LobbyCode, InvalidLobbyCode> {
    let normalized = normalize(input);
    if is_normalized_code(&normalized) {
        Ok(LobbyCode(normalized))
    } else {
        Err(InvalidLobbyCode {
            input: input.to_string(),
        })
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_ascii_uppercase()
}

fn is_normalized_code(value: &str) -> bool {
    value.chars().count() == CODE_LEN && value.chars().all(|ch| ALPHABET.contains(&ch))
}

pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> LobbyCode {
    let code = (0..CODE_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())])
        .collect();
    LobbyCode(code)
}
