// Use cases layer: game sessions and the workflows that start them.

pub mod game;
pub mod registry;
pub mod start_game;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use registry::{GameError, GameHandle, GameRegistry, GameSettings};
pub use start_game::{StartGameError, StartGameRequest, StartGameUseCase};
pub use types::{CardView, DeckRecipe, FlipReply, GameCommand, GameSnapshot};
